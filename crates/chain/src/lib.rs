//! Zap-out Chain
//!
//! Chain access for the zap-out client: a JSON-RPC reader and the contract
//! bindings it encodes calls with.

pub mod abi;
pub mod rpc_reader;

pub use abi::{approve_calldata, zap_out_calldata};
pub use rpc_reader::RpcChainReader;
pub use zapout_types::{ChainError, ChainReader, ChainResult};
