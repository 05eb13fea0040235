//! Run command implementation

use crate::config::{load_api_key, Config, SignalSource};
use crate::decision::{CycleOutcome, DecisionEngine, EngineSettings};
use crate::execution::{DryRunEngine, ExecutionEngine, SimmerEngine, TradeOrder};
use crate::fetch::{Fetcher, HttpTransport};
use crate::market::GammaClient;
use crate::momentum::{CandleProvider, JsonFileStore, SignalProvider, SpotPriceProvider};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Submit orders to the trading API instead of a dry run
    #[arg(long)]
    pub live: bool,

    /// Override the spot-price state file (applied to the loaded config)
    #[arg(long)]
    pub state_file: Option<PathBuf>,
}

impl RunArgs {
    /// Run one decision cycle and act on it
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let api_key = load_api_key()?;

        let policy = config.fetch.retry_policy();
        let transport = Arc::new(HttpTransport::new(policy.timeout)?);
        let fetcher = Fetcher::new(transport, policy);

        let markets = Box::new(GammaClient::new(&config.endpoints.gamma, fetcher.clone()));
        let signals = signal_provider(config, fetcher.clone());
        let engine = DecisionEngine::new(EngineSettings::from_config(config), markets, signals);

        tracing::info!(
            asset = %config.asset,
            window = %config.window,
            signal_source = %config.signal_source,
            live = self.live,
            "Starting decision cycle"
        );

        let outcome = engine.run_cycle(Utc::now()).await;
        println!("{}", render_outcome(&outcome));

        let Some(decision) = outcome.decision() else {
            return Ok(());
        };

        let executor: Box<dyn ExecutionEngine> = if self.live {
            Box::new(SimmerEngine::new(&config.endpoints.simmer, api_key, fetcher))
        } else {
            Box::new(DryRunEngine::new())
        };

        let order = TradeOrder::from_decision(decision, config.max_position);
        match executor.submit(order).await {
            Ok(receipt) if receipt.dry_run => println!("[DRY RUN] No trade executed."),
            Ok(receipt) => println!("Order submitted: {}", receipt.order_id),
            Err(e) => {
                tracing::error!(error = %e, "Order submission failed");
                println!("Order submission failed: {}", e);
            }
        }

        Ok(())
    }
}

/// Momentum provider selected by the configured signal source
fn signal_provider(config: &Config, fetcher: Fetcher) -> Box<dyn SignalProvider> {
    match config.signal_source() {
        SignalSource::Binance => Box::new(CandleProvider::new(
            &config.endpoints.binance,
            fetcher,
            config.lookback_minutes,
        )),
        SignalSource::CoinGecko => Box::new(SpotPriceProvider::new(
            &config.endpoints.coingecko,
            fetcher,
            JsonFileStore::new(&config.state_file),
        )),
    }
}

/// One-line summary of a cycle
pub fn render_outcome(outcome: &CycleOutcome) -> String {
    match outcome {
        CycleOutcome::Trade {
            market,
            signal,
            decision,
        } => format!(
            "ACTION: {} {} on {} (momentum {}%, yes price {})",
            decision.side.to_string().to_uppercase(),
            decision.asset,
            market.slug,
            signal.momentum_pct.round_dp(3),
            market.yes_price()
        ),
        CycleOutcome::Skip(reason) => format!("SKIP: {}", reason),
    }
}
