//! Policy Accounting - Operator CLI
//!
//! Command line surface over the accounting engine: schema migration, demo
//! data, the invoice report, balances, payments and cancellation evaluation.
//!
//! # Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `migrate` | Apply database migrations |
//! | `seed` | Load demo contacts and policies |
//! | `invoices --policy ID --date D` | Invoices billed by `D`, payments, balance |
//! | `balance --policy ID [--date D]` | Account balance |
//! | `pending --policy ID [--date D]` | Cancellation-pending check |
//! | `pay --policy ID --amount A [--contact C] [--date D]` | Record a payment |
//! | `make-invoices --policy ID` | Regenerate invoices |
//! | `evaluate-cancel --policy ID [--date D]` | Cancel for non-payment |

pub mod cli;
pub mod commands;
pub mod config;
pub mod report;
pub mod seed;

pub use cli::{Cli, Commands};
pub use commands::{execute, run};
pub use config::CliConfig;
