//! Zap-out Client
//!
//! Loads the configuration, reads the configured account's position in the
//! first LP token and prints what the form would show.

use std::sync::Arc;

use zapout::{
	init_tracing, load_config, log_client_info, log_client_shutdown, log_registry_summary,
	ReadOnlySigner, ZapOutBuilder,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let settings = load_config()?;
	init_tracing(&settings.logging)?;
	log_client_info();

	let mut form = ZapOutBuilder::new()
		.with_settings(settings)
		.with_signer(Arc::new(ReadOnlySigner))
		.build()?;

	if let Some(chain_id) = form.wallet().chain_id {
		log_registry_summary(form.selection().registry(), chain_id);
	}
	form.refresh().await;

	let selection = form.selection();
	let router = selection.router()?;
	println!("Router:     {}", router.name);
	match selection.lp_token() {
		Some(lp_token) => {
			let native = selection.registry().native_wrapped_symbol();
			let payouts: Vec<String> = selection
				.payouts()
				.iter()
				.map(|payout| payout.label(lp_token, native))
				.collect();
			println!("LP token:   {}", lp_token.symbol);
			println!("Payouts:    {}", payouts.join(", "));
			println!("Receive:    {}", selection.payout().label(lp_token, native));
		},
		None => println!("LP token:   -"),
	}
	println!("{}", form.balance_label());
	println!("Estimate:   {}", form.estimate_label());
	println!("Action:     {}", form.submit_action().label());
	if let Some(error) = form.read_error() {
		println!("Read error: {}", error);
	}

	log_client_shutdown();
	Ok(())
}
