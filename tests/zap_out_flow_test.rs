//! End-to-end form flows against the mock chain, signer and notifier

mod mocks;

use mocks::entities::*;
use mocks::{MockEntities, TestForm};
use zapout::mocks::{MockChainReader, MockFailure};
use zapout::models::{ChainId, NotificationKind, PayoutType, ReadState, WalletContext};
use zapout::service::{SubmitAction, SubmitOutcome};
use zapout::{ChainError, MutationKind, MutationState, ValidationError, ZapOutError, U256};

fn units(text: &str, decimals: u8) -> U256 {
	MockEntities::units(text, decimals)
}

#[tokio::test]
async fn test_allowance_checked_after_balance() {
	let mut test = TestForm::refreshed(MockEntities::eth_usdc_chain("100", "50")).await;
	test.form.set_amount("75");

	assert_eq!(
		test.form.validation_error(),
		Some(ValidationError::ExceedsAllowance)
	);
	let result = test.form.submit().await;
	assert!(matches!(
		result,
		Err(ZapOutError::Validation(ValidationError::ExceedsAllowance))
	));
	assert!(test.signer.zap_outs().is_empty());
	assert!(test.notifier.records().is_empty());
}

#[tokio::test]
async fn test_empty_balance_rejects_any_amount() {
	let mut test = TestForm::refreshed(MockEntities::eth_usdc_chain("0", "50")).await;
	assert_eq!(test.form.balance_label(), "Balance: 0.000000");

	test.form.set_amount("1");
	let error = test.form.validation_error().unwrap();
	assert_eq!(error, ValidationError::ExceedsBalance);
	assert_eq!(error.to_string(), "Must be less than your LP balance!");
}

#[tokio::test]
async fn test_approve_then_zap_out_action() {
	let mut test = TestForm::refreshed(MockEntities::eth_usdc_chain("100", "0")).await;
	assert_eq!(test.form.submit_action(), SubmitAction::Approve);
	assert_eq!(test.form.submit_action().label(), "Approve");
	// Unapproved forms accept any amount text
	test.form.set_amount("not a number");
	assert_eq!(test.form.validation_error(), None);

	let balance_reads = test.chain.calls("balanceOf");
	let outcome = test.form.submit().await.unwrap();
	assert!(matches!(outcome, SubmitOutcome::Approved(_)));

	assert_eq!(
		test.signer.approvals(),
		vec![(
			MockEntities::address(ETH_USDC_LP),
			MockEntities::address(ZAPPER),
			U256::MAX
		)]
	);
	// Initial read plus exactly one refetch after confirmation
	assert_eq!(test.chain.calls("allowance"), 2);
	assert_eq!(test.chain.calls("balanceOf"), balance_reads);
	assert_eq!(test.form.submit_action(), SubmitAction::ZapOut);
	assert!(matches!(test.form.approve_state(), MutationState::Confirmed(_)));

	let records = test.notifier.records();
	assert_eq!(
		test.notifier.kinds(),
		vec![NotificationKind::Pending, NotificationKind::Resolved]
	);
	assert_eq!(records[0].message, "Approving ETH-USDC VLP");
	assert_eq!(records[1].replaced, Some(records[0].id));
}

#[tokio::test]
async fn test_token_a_estimate_adds_swapped_share() {
	let chain = MockEntities::eth_usdc_chain("100", "100").with_quote(
		vec![MockEntities::address(USDC), MockEntities::address(ETH)],
		units("10", 18),
	);
	let mut test = TestForm::new(chain);
	test.form.select_payout(PayoutType::TokenA).unwrap();
	test.form.set_amount("100");
	assert_eq!(test.form.estimate_label(), "Loading...");

	assert!(test.form.refresh().await);
	// 40 ETH from the pool share plus 10 ETH quoted for 30 USDC
	assert_eq!(test.form.estimate_label(), "50.000000");
	assert_eq!(test.chain.calls("getAmountsOut"), 1);
}

#[tokio::test]
async fn test_native_wrapped_is_not_estimated() {
	let test = TestForm::refreshed(MockEntities::eth_usdc_chain("100", "100")).await;
	assert_eq!(test.form.selection().payout(), PayoutType::NativeWrapped);
	assert_eq!(test.form.estimate_label(), "-");
	assert_eq!(test.chain.calls("getAmountsOut"), 0);
}

#[tokio::test]
async fn test_zap_out_submits_route_and_resets() {
	let mut test = TestForm::refreshed(MockEntities::eth_usdc_chain("100", "100")).await;
	test.form.select_payout(PayoutType::TokenB).unwrap();
	test.form.refresh().await;
	let reads = test.chain.total_calls();

	test.form.set_amount("10");
	let outcome = test.form.submit().await.unwrap();
	assert!(matches!(outcome, SubmitOutcome::ZappedOut(_)));

	let calls = test.signer.zap_outs();
	assert_eq!(calls.len(), 1);
	let call = &calls[0];
	assert_eq!(call.from_token, MockEntities::address(ETH_USDC_LP));
	assert_eq!(call.amount, units("10", 18));
	assert_eq!(call.to_token, MockEntities::address(USDC));
	assert_eq!(call.router, MockEntities::address(VIPER));
	assert_eq!(call.recipient, MockEntities::account());
	assert_eq!(
		call.path0,
		vec![MockEntities::address(ETH), MockEntities::address(USDC)]
	);
	assert!(call.path1.is_empty());

	assert_eq!(test.form.amount_text(), "0.0");
	assert_eq!(
		test.notifier.records()[1].message,
		"Zapped out 10.0 ETH-USDC VLP to USDC"
	);
	// Balance, allowance, supply and both reserves are read again
	assert_eq!(test.chain.total_calls(), reads + 5);
}

#[tokio::test]
async fn test_rejected_zap_out_keeps_error_until_dismissed() {
	let mut test = TestForm::refreshed(MockEntities::eth_usdc_chain("100", "100")).await;
	test.signer.set_failure(Some(MockFailure::Reject));
	test.form.set_amount("1");

	let result = test.form.submit().await;
	assert!(matches!(
		result,
		Err(ZapOutError::Mutation {
			kind: MutationKind::ZapOut,
			source: ChainError::Rejected
		})
	));
	assert_eq!(test.notifier.kinds(), vec![NotificationKind::Rejected]);
	assert!(test.form.zap_out_state().is_failed());
	assert_eq!(test.form.amount_text(), "1");

	assert!(test.form.dismiss_errors());
	assert_eq!(test.form.zap_out_state(), MutationState::Idle);
}

#[tokio::test]
async fn test_reverted_zap_out_replaces_pending() {
	let mut test = TestForm::refreshed(MockEntities::eth_usdc_chain("100", "100")).await;
	test.signer.set_failure(Some(MockFailure::Revert));
	test.form.set_amount("1");

	assert!(test.form.submit().await.is_err());
	let records = test.notifier.records();
	assert_eq!(
		test.notifier.kinds(),
		vec![NotificationKind::Pending, NotificationKind::Rejected]
	);
	assert_eq!(records[1].replaced, Some(records[0].id));
	assert_eq!(test.signer.zap_outs().len(), 1);
}

#[tokio::test]
async fn test_stale_refresh_dropped_after_lp_change() {
	let mut test = TestForm::new(MockEntities::eth_usdc_chain("100", "100"));
	let request = test.form.refresh_request();
	let loader = test.form.loader();

	test.form.select_lp_token("WONE-USDC VLP").unwrap();
	let outcome = loader.load(request).await;
	assert!(!test.form.apply(outcome));
	assert_eq!(test.form.snapshot().lp_balance, ReadState::NotRequested);
	assert_eq!(test.form.balance_label(), "Loading...");

	assert!(test.form.refresh().await);
	// Nothing is held in the WONE-USDC pool
	assert_eq!(test.form.balance_label(), "Balance: 0.000000");
}

#[tokio::test]
async fn test_stale_refresh_dropped_after_chain_change() {
	let mut test = TestForm::new(MockEntities::eth_usdc_chain("100", "100"));
	let request = test.form.refresh_request();
	let loader = test.form.loader();

	test.form.set_wallet(WalletContext::connected(
		ChainId::new(1666700000),
		MockEntities::account(),
	));
	assert!(!test.form.apply(loader.load(request).await));
	// The LP token has no address on the new chain
	assert!(test.form.refresh_request().keys.is_none());
	assert_eq!(test.form.submit_action(), SubmitAction::Loading);
}

#[tokio::test]
async fn test_reselected_lp_token_shows_cached_reads() {
	let mut test = TestForm::refreshed(MockEntities::eth_usdc_chain("100", "100")).await;
	test.form.select_lp_token("WONE-USDC VLP").unwrap();
	test.form.select_lp_token("ETH-USDC VLP").unwrap();

	assert_eq!(test.form.balance_label(), "Balance: 100.000000");
	assert_eq!(test.form.submit_action(), SubmitAction::ZapOut);
}

#[tokio::test]
async fn test_router_change_resets_settled_zap_out() {
	let mut test = TestForm::refreshed(MockEntities::eth_usdc_chain("100", "100")).await;
	test.signer.set_failure(Some(MockFailure::Reject));
	test.form.set_amount("1");
	assert!(test.form.submit().await.is_err());

	test.form.select_router("SushiSwap").unwrap();
	let lp_token = test.form.selection().lp_token().unwrap();
	assert_eq!(lp_token.symbol, "WONE-ETH SLP");
	assert_eq!(lp_token.router, "SushiSwap");
	assert_eq!(test.form.zap_out_state(), MutationState::Idle);
	assert!(!test
		.form
		.selection()
		.payouts()
		.contains(&PayoutType::NativeWrapped));
}

#[tokio::test]
async fn test_read_error_blocks_submit() {
	let chain = MockEntities::eth_usdc_chain("100", "100");
	chain.fail("allowance", ChainError::Rpc("node unavailable".into()));
	let mut test = TestForm::refreshed(chain).await;

	assert_eq!(
		test.form.read_error(),
		Some(ChainError::Rpc("node unavailable".into()))
	);
	assert_eq!(test.form.submit_action(), SubmitAction::Loading);
	assert!(matches!(
		test.form.submit().await,
		Err(ZapOutError::Read(ChainError::Rpc(_)))
	));
	// The balance read itself succeeded
	assert_eq!(test.form.balance_label(), "Balance: 100.000000");
}

#[tokio::test]
async fn test_input_max_fills_full_balance() {
	let mut test = TestForm::refreshed(MockEntities::eth_usdc_chain("12.5", "100")).await;
	assert!(test.form.input_max());
	assert_eq!(test.form.amount_text(), "12.5");
	assert_eq!(test.form.validation_error(), None);
}

#[tokio::test]
async fn test_unfunded_chain_reads_zero() {
	let mut test = TestForm::new(MockChainReader::new());
	test.form.refresh().await;
	assert_eq!(test.form.balance_label(), "Balance: 0.000000");
	assert_eq!(test.form.submit_action(), SubmitAction::Approve);
}

#[tokio::test]
async fn test_reload_recovers_from_read_error() {
	let chain = MockEntities::eth_usdc_chain("100", "100");
	chain.fail("allowance", ChainError::Timeout { timeout_ms: 2000 });
	let mut test = TestForm::refreshed(chain).await;
	assert!(test.form.read_error().is_some());

	// Cached errors stay until the view is reloaded
	test.chain.clear_failures();
	assert!(test.form.refresh().await);
	assert!(test.form.read_error().is_some());

	let reads = test.chain.calls("allowance");
	assert!(test.form.reload().await);
	assert_eq!(test.form.read_error(), None);
	assert_eq!(test.chain.calls("allowance"), reads + 1);
	assert_eq!(test.form.submit_action(), SubmitAction::ZapOut);
}
