//! Subcommand handlers

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use core_kernel::Money;
use domain_billing::{
    AccountingStore, BillingConfig, CancellationDecision, PaymentOutcome, PolicyAccounting,
};
use infra_db::{create_pool, run_migrations, DatabaseConfig, DatabasePool, PostgresAccountingStore};

use crate::cli::Commands;
use crate::config::CliConfig;
use crate::report::PolicyReport;
use crate::seed::seed_demo_data;

/// Runs one subcommand against the configured database
pub async fn run(command: Commands, config: &CliConfig) -> Result<()> {
    let pool = connect(config).await?;

    if let Commands::Migrate = command {
        run_migrations(&pool).await.context("applying migrations")?;
        println!("Database ready");
        return Ok(());
    }

    let store: Arc<dyn AccountingStore> = Arc::new(PostgresAccountingStore::new(pool));
    execute(command, store, config).await
}

/// Runs a subcommand against any accounting store
pub async fn execute(
    command: Commands,
    store: Arc<dyn AccountingStore>,
    config: &CliConfig,
) -> Result<()> {
    let billing = config.billing_config();

    match command {
        Commands::Migrate => anyhow::bail!("migrations need a database connection"),

        Commands::Seed => {
            let currency = config.currency().context("invalid ACCOUNTING_CURRENCY")?;
            let seeded = seed_demo_data(store, &billing, currency).await?;
            for (number, id) in seeded.policies {
                println!("{}: {}", number, id);
            }
        }

        Commands::Invoices(args) => {
            let accounting = open(&store, args.policy, &billing).await?;
            let report = PolicyReport::build(&accounting, store.as_ref(), args.date).await?;
            println!("{}", report);
        }

        Commands::Balance(args) => {
            let accounting = open(&store, args.policy, &billing).await?;
            println!("{}", accounting.balance(args.date).await?);
        }

        Commands::Pending(args) => {
            let accounting = open(&store, args.policy, &billing).await?;
            let pending = accounting.is_cancellation_pending(args.date).await?;
            println!("{}", if pending { "cancellation pending" } else { "in good standing" });
        }

        Commands::Pay(args) => {
            let accounting = open(&store, args.policy, &billing).await?;
            let amount = Money::new(args.amount, accounting.policy().currency());
            match accounting.make_payment(args.contact, args.date, amount).await? {
                PaymentOutcome::Recorded(payment) => println!("Recorded payment {}", payment.id),
                PaymentOutcome::Refused(reason) => println!("Payment refused: {}", reason),
            }
        }

        Commands::MakeInvoices(args) => {
            let accounting = open(&store, args.policy, &billing).await?;
            let invoices = accounting.make_invoices().await?;
            println!("Generated {} invoices", invoices.len());
        }

        Commands::EvaluateCancel(args) => {
            let mut accounting = open(&store, args.policy, &billing).await?;
            match accounting.evaluate_cancel(args.date).await? {
                CancellationDecision::Canceled(record) => {
                    println!("Policy canceled on {}: {}", record.cancellation_date, record.reason)
                }
                CancellationDecision::RemainsActive => println!("Policy should not cancel"),
                CancellationDecision::AlreadyCanceled => println!("Policy is already canceled"),
            }
        }
    }

    Ok(())
}

async fn connect(config: &CliConfig) -> Result<DatabasePool> {
    info!("Connecting to database...");
    let pool = create_pool(DatabaseConfig::new(&config.database_url))
        .await
        .context("connecting to database")?;
    Ok(pool)
}

async fn open(
    store: &Arc<dyn AccountingStore>,
    policy_id: core_kernel::PolicyId,
    billing: &BillingConfig,
) -> Result<PolicyAccounting> {
    PolicyAccounting::open_with_config(store.clone(), policy_id, billing.clone())
        .await
        .with_context(|| format!("opening policy {}", policy_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{PayArgs, PolicyDateArgs};
    use domain_billing::InMemoryAccountingStore;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_execute_against_in_memory_store() {
        let store: Arc<dyn AccountingStore> = Arc::new(InMemoryAccountingStore::new());
        let config = CliConfig::default();
        let seeded = seed_demo_data(store.clone(), &config.billing_config(), config.currency().unwrap())
            .await
            .unwrap();
        let (_, policy) = seeded.policies[0].clone();

        execute(
            Commands::Pay(PayArgs {
                policy,
                amount: dec!(365),
                contact: None,
                date: chrono::NaiveDate::from_ymd_opt(2015, 1, 10),
            }),
            store.clone(),
            &config,
        )
        .await
        .unwrap();

        execute(
            Commands::EvaluateCancel(PolicyDateArgs {
                policy,
                date: chrono::NaiveDate::from_ymd_opt(2015, 3, 1),
            }),
            store.clone(),
            &config,
        )
        .await
        .unwrap();

        assert!(!store.get_policy(policy).await.unwrap().is_canceled());
    }

    #[tokio::test]
    async fn test_unknown_policy_is_reported() {
        let store: Arc<dyn AccountingStore> = Arc::new(InMemoryAccountingStore::new());
        let result = execute(
            Commands::Balance(PolicyDateArgs {
                policy: core_kernel::PolicyId::new(),
                date: None,
            }),
            store,
            &CliConfig::default(),
        )
        .await;

        assert!(result.is_err());
    }
}
