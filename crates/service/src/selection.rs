//! Router, LP token and payout selection
//!
//! The coordinator keeps the three choices consistent with each other and
//! with the registry. Every change returns the [`SelectionEvent`]s it caused
//! so the owner can reset state that depended on the old selection.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use zapout_types::{LpToken, PayoutType, Registry, RegistryError, Router};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
	#[error("no router has LP tokens")]
	NoRouters,
	#[error("router '{0}' is not selectable")]
	RouterNotSelectable(String),
	#[error("LP token '{lp_token}' does not belong to router '{router}'")]
	LpTokenNotInRouter { lp_token: String, router: String },
	#[error("no LP token selected")]
	NoLpToken,
	#[error("payout type '{payout}' is not available for {lp_token}")]
	PayoutUnavailable { payout: PayoutType, lp_token: String },
	#[error(transparent)]
	Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
	RouterChanged {
		previous: String,
		current: String,
	},
	LpTokenChanged {
		previous: Option<String>,
		current: Option<String>,
	},
	PayoutChanged {
		previous: PayoutType,
		current: PayoutType,
	},
}

impl SelectionEvent {
	/// Whether state derived from the old LP token (pending zap-out
	/// display, estimates) must be reset
	pub fn resets_zap_out(&self) -> bool {
		match self {
			SelectionEvent::RouterChanged { .. } | SelectionEvent::LpTokenChanged { .. } => true,
			SelectionEvent::PayoutChanged { .. } => false,
		}
	}
}

#[derive(Debug, Clone)]
pub struct SelectionCoordinator {
	registry: Arc<Registry>,
	router: String,
	lp_token: Option<String>,
	payout: PayoutType,
}

impl SelectionCoordinator {
	/// First router with LP tokens, its first LP token and the first
	/// selectable payout type
	pub fn new(registry: Arc<Registry>) -> Result<Self, SelectionError> {
		let router = registry
			.routers_with_lp_tokens()
			.first()
			.map(|router| router.name.clone())
			.ok_or(SelectionError::NoRouters)?;
		let lp_token = registry
			.lp_tokens_for_router(&router)
			.first()
			.map(|lp| lp.symbol.clone());

		let mut coordinator = Self {
			registry,
			router,
			lp_token,
			payout: PayoutType::NativeWrapped,
		};
		coordinator.reconcile_payout();
		Ok(coordinator)
	}

	pub fn registry(&self) -> &Arc<Registry> {
		&self.registry
	}

	/// Routers offered in the selector, in registry order
	pub fn routers(&self) -> Vec<&Router> {
		self.registry.routers_with_lp_tokens()
	}

	pub fn router(&self) -> Result<&Router, SelectionError> {
		Ok(self.registry.router(&self.router)?)
	}

	/// LP tokens of the selected router
	pub fn lp_tokens(&self) -> Vec<&LpToken> {
		self.registry.lp_tokens_for_router(&self.router)
	}

	pub fn lp_token(&self) -> Option<&LpToken> {
		self.lp_token
			.as_deref()
			.and_then(|symbol| self.registry.lp_token(symbol).ok())
	}

	pub fn payout(&self) -> PayoutType {
		self.payout
	}

	/// Payout types offered for the selected LP token
	pub fn payouts(&self) -> Vec<PayoutType> {
		match self.lp_token() {
			Some(lp_token) => {
				PayoutType::selectable_for(lp_token, self.registry.native_wrapped_symbol())
			},
			None => Vec::new(),
		}
	}

	pub fn select_router(&mut self, name: &str) -> Result<Vec<SelectionEvent>, SelectionError> {
		if name == self.router {
			return Ok(Vec::new());
		}
		if !self.routers().iter().any(|router| router.name == name) {
			return Err(SelectionError::RouterNotSelectable(name.to_string()));
		}

		let previous = std::mem::replace(&mut self.router, name.to_string());
		let mut events = vec![SelectionEvent::RouterChanged {
			previous,
			current: self.router.clone(),
		}];

		let first = self.lp_tokens().first().map(|lp| lp.symbol.clone());
		events.extend(self.set_lp_token(first));
		debug!("Router changed to {}", self.router);
		Ok(events)
	}

	pub fn select_lp_token(&mut self, symbol: &str) -> Result<Vec<SelectionEvent>, SelectionError> {
		if !self.lp_tokens().iter().any(|lp| lp.symbol == symbol) {
			return Err(SelectionError::LpTokenNotInRouter {
				lp_token: symbol.to_string(),
				router: self.router.clone(),
			});
		}
		if self.lp_token.as_deref() == Some(symbol) {
			return Ok(Vec::new());
		}
		Ok(self.set_lp_token(Some(symbol.to_string())))
	}

	pub fn select_payout(
		&mut self,
		payout: PayoutType,
	) -> Result<Vec<SelectionEvent>, SelectionError> {
		let lp_token = self.lp_token().ok_or(SelectionError::NoLpToken)?;
		if !payout.is_selectable_for(lp_token, self.registry.native_wrapped_symbol()) {
			return Err(SelectionError::PayoutUnavailable {
				payout,
				lp_token: lp_token.symbol.clone(),
			});
		}
		if payout == self.payout {
			return Ok(Vec::new());
		}

		let previous = std::mem::replace(&mut self.payout, payout);
		Ok(vec![SelectionEvent::PayoutChanged {
			previous,
			current: payout,
		}])
	}

	/// Router whose address goes into the zap-out call: the LP token's owner
	pub fn zap_out_router(&self) -> Result<&Router, SelectionError> {
		let lp_token = self.lp_token().ok_or(SelectionError::NoLpToken)?;
		let owner = self.registry.owning_router(lp_token)?;
		if owner.name != self.router {
			warn!(
				"LP token {} is owned by {} but {} is displayed; using the owner",
				lp_token.symbol, owner.name, self.router
			);
		}
		Ok(owner)
	}

	fn set_lp_token(&mut self, symbol: Option<String>) -> Vec<SelectionEvent> {
		let previous = std::mem::replace(&mut self.lp_token, symbol);
		let mut events = vec![SelectionEvent::LpTokenChanged {
			previous,
			current: self.lp_token.clone(),
		}];
		events.extend(self.reconcile_payout());
		events
	}

	/// Reset the payout to the first selectable variant when the current one
	/// no longer applies
	fn reconcile_payout(&mut self) -> Option<SelectionEvent> {
		let payouts = self.payouts();
		let first = *payouts.first()?;
		if payouts.contains(&self.payout) {
			return None;
		}
		let previous = std::mem::replace(&mut self.payout, first);
		Some(SelectionEvent::PayoutChanged {
			previous,
			current: first,
		})
	}
}
