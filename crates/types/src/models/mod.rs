//! Shared domain models: chains, tokens, routers, LP tokens and payout types

pub mod chain;
pub mod lp_token;
pub mod payout;
pub mod router;
pub mod token;

pub use chain::{AddressBook, ChainId};
pub use lp_token::{LpToken, ResolvedLpToken};
pub use payout::PayoutType;
pub use router::Router;
pub use token::Token;
