//! User notifications for transaction progress

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Handle of a shown notification, used to replace it in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for NotificationId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for NotificationId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
	/// Broadcast, awaiting confirmation
	Pending,
	Resolved,
	Rejected,
}

/// Sink for transaction notifications
pub trait Notifier: Send + Sync {
	/// Show a notification, replacing `replace` when given, and return its handle
	fn notify(
		&self,
		kind: NotificationKind,
		message: &str,
		replace: Option<NotificationId>,
	) -> NotificationId;
}
