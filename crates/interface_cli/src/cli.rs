//! CLI argument definitions using clap.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use core_kernel::{ContactId, PolicyId};

#[derive(Parser, Debug)]
#[command(name = "policy-accounting")]
#[command(version)]
#[command(about = "Invoice, balance, payment and cancellation operations on insurance policies", long_about = None)]
pub struct Cli {
    /// Database URL, overriding ACCOUNTING_DATABASE_URL
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Log level, overriding ACCOUNTING_LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the database schema migrations
    Migrate,

    /// Load the demo contacts, policies, invoices and payment
    Seed,

    /// Show invoices billed by a date, payments, and the balance
    Invoices(ReportArgs),

    /// Show the account balance
    Balance(PolicyDateArgs),

    /// Show whether the policy is cancellation pending
    Pending(PolicyDateArgs),

    /// Record a payment
    Pay(PayArgs),

    /// Regenerate the policy's invoices
    MakeInvoices(PolicyArgs),

    /// Cancel the policy if an installment went unpaid past its cancel date
    EvaluateCancel(PolicyDateArgs),
}

#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// Policy id
    #[arg(long)]
    pub policy: PolicyId,
}

#[derive(Args, Debug)]
pub struct PolicyDateArgs {
    /// Policy id
    #[arg(long)]
    pub policy: PolicyId,

    /// Evaluation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Policy id
    #[arg(long)]
    pub policy: PolicyId,

    /// Report date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
}

#[derive(Args, Debug)]
pub struct PayArgs {
    /// Policy id
    #[arg(long)]
    pub policy: PolicyId,

    /// Amount in the policy's currency
    #[arg(long)]
    pub amount: Decimal,

    /// Paying contact, defaults to the named insured
    #[arg(long)]
    pub contact: Option<ContactId>,

    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pay() {
        let policy = PolicyId::new();
        let cli = Cli::try_parse_from([
            "policy-accounting",
            "pay",
            "--policy",
            &policy.to_string(),
            "--amount",
            "400.00",
            "--date",
            "2015-02-01",
        ])
        .unwrap();

        match cli.command {
            Commands::Pay(args) => {
                assert_eq!(args.policy, policy);
                assert_eq!(args.amount, Decimal::new(40000, 2));
                assert!(args.contact.is_none());
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2015, 2, 1));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invoices_requires_date() {
        let policy = PolicyId::new().to_string();
        let result = Cli::try_parse_from(["policy-accounting", "invoices", "--policy", &policy]);
        assert!(result.is_err());
    }

    #[test]
    fn test_evaluate_cancel_subcommand_name() {
        let policy = PolicyId::new().to_string();
        let cli = Cli::try_parse_from(["policy-accounting", "evaluate-cancel", "--policy", &policy]).unwrap();
        assert!(matches!(cli.command, Commands::EvaluateCancel(PolicyDateArgs { date: None, .. })));
    }
}
