//! Policy Accounting - CLI Binary
//!
//! # Usage
//!
//! ```bash
//! policy-accounting migrate
//! policy-accounting seed
//! policy-accounting invoices --policy <ID> --date 2015-05-01
//! ```
//!
//! # Environment Variables
//!
//! * `ACCOUNTING_DATABASE_URL` - PostgreSQL connection string
//! * `ACCOUNTING_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `ACCOUNTING_LOG_JSON` - Emit JSON log lines (default: false)
//! * `ACCOUNTING_CURRENCY` - Currency for seeded premiums (default: USD)
//! * `ACCOUNTING_DUE_GRACE_MONTHS` - Months from bill date to due date (default: 1)
//! * `ACCOUNTING_CANCEL_GRACE_DAYS` - Days from due date to cancel date (default: 14)

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_cli::{run, Cli, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = CliConfig::from_env().context("loading ACCOUNTING_* configuration")?;
    if let Some(url) = cli.database_url.clone() {
        config.database_url = url;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }

    init_tracing(&config.log_level, config.log_json);
    tracing::debug!(
        database_url = %config.redacted_database_url(),
        currency = %config.currency,
        due_grace_months = config.due_grace_months,
        cancel_grace_days = config.cancel_grace_days,
        pending_rule = ?config.pending_rule,
        "configuration loaded"
    );

    run(cli.command, &config).await
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
