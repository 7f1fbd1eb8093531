//! Notifier that reports transaction progress through `tracing`

use tracing::{info, warn};
use zapout_types::{NotificationId, NotificationKind, Notifier};

/// Logs every notification; replaced notifications keep their id
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
	fn notify(
		&self,
		kind: NotificationKind,
		message: &str,
		replace: Option<NotificationId>,
	) -> NotificationId {
		let id = replace.unwrap_or_default();
		match kind {
			NotificationKind::Pending => info!(notification = %id, "⏳ {}", message),
			NotificationKind::Resolved => info!(notification = %id, "✅ {}", message),
			NotificationKind::Rejected => warn!(notification = %id, "❌ {}", message),
		}
		id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_replacement_keeps_id() {
		let notifier = TracingNotifier;
		let pending = notifier.notify(NotificationKind::Pending, "Approving", None);
		let resolved = notifier.notify(NotificationKind::Resolved, "Approved", Some(pending));
		assert_eq!(pending, resolved);
		assert_ne!(
			notifier.notify(NotificationKind::Rejected, "failed", None),
			pending
		);
	}
}
