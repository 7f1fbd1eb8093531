//! Zap-out Service
//!
//! Snapshot readers, the estimator, selection coordination, transaction
//! orchestration and the form that composes them.

pub mod estimator;
pub mod form;
pub mod orchestrator;
pub mod readers;
pub mod route;
pub mod selection;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use estimator::{Estimate, EstimateError, EstimatePlan, EstimateRequest, Estimator};
pub use form::{RefreshOutcome, RefreshRequest, SubmitAction, SubmitOutcome, ViewLoader, ZapOutForm};
pub use orchestrator::{MutationTracker, TransactionOrchestrator, ZapOutError};
pub use readers::{BalanceSnapshot, SnapshotKeys, SnapshotReader};
pub use route::{RouteError, ZapOutRoute};
pub use selection::{SelectionCoordinator, SelectionError, SelectionEvent};
pub use validation::{validate_amount, ValidationError};
