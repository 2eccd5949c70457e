use anyhow::Result;
use clap::Parser;
use tracing::info;
use transaction_spammer::{config, dispatcher, payload, telemetry};

use config::Config;
use dispatcher::Dispatcher;
use payload::{BankRoster, PayloadGenerator};
use telemetry::init_tracing;

#[derive(Parser, Debug)]
#[command(version, about = "Spams a settlement API with randomized interbank transfers")]
struct Cli {
    /// Number of transactions to send
    #[arg(short, long)]
    transactions: Option<usize>,

    /// Concurrent workers (0 = half the available CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Send a hello health-check before the batch
    #[arg(long)]
    hello: bool,

    /// Override the target base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut cfg = Config::load()?;
    if let Some(base_url) = cli.base_url {
        cfg.target.base_url = base_url;
    }
    if let Some(transactions) = cli.transactions {
        cfg.spam.transactions = transactions;
    }
    if let Some(workers) = cli.workers {
        cfg.spam.workers = workers;
    }

    let roster = match cfg.banks.clone() {
        Some(banks) => BankRoster::new(banks)?,
        None => BankRoster::default(),
    };
    let generator = PayloadGenerator::new(roster, cfg.spam.sum_lo, cfg.spam.sum_hi)?;
    let dispatcher = Dispatcher::new(&cfg.target)?;

    if cli.hello {
        let body = dispatcher.hello().await?;
        info!(body = %body.trim_end(), "hello endpoint answered");
    }

    let workers = cfg.spam.effective_workers();
    let payloads = generator.batch(cfg.spam.transactions);
    info!(
        transactions = payloads.len(),
        workers,
        target = %cfg.target.transaction_url(),
        "dispatching batch"
    );

    let report = dispatcher.dispatch(payloads, workers).await;
    info!(
        delivered = report.delivered,
        rejected = report.rejected,
        failed = report.failed,
        "batch complete"
    );

    Ok(())
}
