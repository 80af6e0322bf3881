use std::{env, fs::File, path::Path, sync::Arc};

use tokio_util::sync::CancellationToken;

use loyalty_engine::accrual_client::HttpAccrualClient;
use loyalty_engine::admission::OrderAdmission;
use loyalty_engine::balance_repository::InMemoryBalances;
use loyalty_engine::config::Config;
use loyalty_engine::dlq::StdErrDLQ;
use loyalty_engine::domain::{BalanceStore, OrderStore};
use loyalty_engine::engine::Engine;
use loyalty_engine::ingestion::CsvReader;
use loyalty_engine::ledger::BalanceLedger;
use loyalty_engine::order_repository::InMemoryOrders;
use loyalty_engine::poller::ReconciliationPoller;

const USAGE: &str = "usage: loyalty_engine <commands.csv> [--watch]";

fn init_tracing() {
    // stdout carries the report, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut args = env::args().skip(1);
    let file_path = args.next().ok_or(USAGE)?;
    let watch = args.any(|arg| arg == "--watch");

    let config = Config::from_env()?;
    tracing::info!(accrual = %config.accrual_base_url(), "Configuration loaded");

    let file = File::open(Path::new(&file_path))?;

    // Set up the components
    let orders: Arc<dyn OrderStore> = Arc::new(InMemoryOrders::new());
    let balances: Arc<dyn BalanceStore> = Arc::new(InMemoryBalances::new());
    let accrual = Arc::new(HttpAccrualClient::new(
        config.accrual_base_url(),
        config.accrual_timeout,
    )?);

    let admission = OrderAdmission::new(orders.clone());
    let ledger = BalanceLedger::new(orders.clone(), balances);
    let poller = ReconciliationPoller::new(
        orders,
        ledger.clone(),
        accrual,
        config.pull_interval,
        config.cycle_deadline,
    );

    let mut engine = Engine::new(
        CsvReader::new(file)?,
        StdErrDLQ::default(),
        admission,
        ledger,
        poller.clone(),
    );
    engine.process().await?;

    if watch {
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn({
            let shutdown = shutdown.clone();
            async move { poller.run(shutdown).await }
        });

        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutdown requested, waiting for the current cycle");
        shutdown.cancel();
        handle.await?;
    }

    engine.flush(std::io::stdout()).await?;

    Ok(())
}
