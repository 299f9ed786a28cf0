//! CLI configuration

use serde::{Deserialize, Serialize};

use core_kernel::Currency;
use domain_billing::{BillingConfig, PendingRule};

/// Operator configuration, loaded from `ACCOUNTING_*` environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Currency used for seeded premiums
    pub currency: String,
    /// Months from bill date to due date
    pub due_grace_months: u32,
    /// Days from due date to cancel date
    pub cancel_grace_days: u32,
    /// Cancellation-pending rule
    pub pending_rule: PendingRule,
}

impl Default for CliConfig {
    fn default() -> Self {
        let billing = BillingConfig::default();
        Self {
            database_url: "postgres://localhost/accounting".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            currency: Currency::USD.code().to_string(),
            due_grace_months: billing.due_grace_months,
            cancel_grace_days: billing.cancel_grace_days,
            pending_rule: billing.pending_rule,
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment, falling back to defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::Environment::with_prefix("ACCOUNTING").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Engine configuration derived from these settings
    pub fn billing_config(&self) -> BillingConfig {
        BillingConfig {
            due_grace_months: self.due_grace_months,
            cancel_grace_days: self.cancel_grace_days,
            pending_rule: self.pending_rule,
            ..BillingConfig::default()
        }
    }

    /// The database URL with any password replaced by `***`
    pub fn redacted_database_url(&self) -> String {
        let url = &self.database_url;
        let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
            return url.clone();
        };
        let Some(at) = url[scheme_end..].find('@').map(|i| scheme_end + i) else {
            return url.clone();
        };
        match url[scheme_end..at].find(':') {
            Some(colon) => format!("{}***{}", &url[..scheme_end + colon + 1], &url[at..]),
            None => url.clone(),
        }
    }

    /// Parses the configured currency code
    pub fn currency(&self) -> Result<Currency, core_kernel::MoneyError> {
        self.currency.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.billing_config(), BillingConfig::default());
        assert_eq!(config.currency().unwrap(), Currency::USD);
    }

    #[test]
    fn test_billing_config_carries_overrides() {
        let config = CliConfig {
            cancel_grace_days: 30,
            pending_rule: PendingRule::OutstandingBalance,
            ..CliConfig::default()
        };

        let billing = config.billing_config();
        assert_eq!(billing.cancel_grace_days, 30);
        assert_eq!(billing.pending_rule, PendingRule::OutstandingBalance);
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let config = CliConfig {
            currency: "XYZ".to_string(),
            ..CliConfig::default()
        };
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_redacted_url_hides_password() {
        let config = CliConfig {
            database_url: "postgres://billing:s3cret@db:5432/accounting".to_string(),
            ..CliConfig::default()
        };
        assert_eq!(
            config.redacted_database_url(),
            "postgres://billing:***@db:5432/accounting"
        );
    }

    #[test]
    fn test_redacted_url_without_credentials_is_unchanged() {
        let config = CliConfig::default();
        assert_eq!(config.redacted_database_url(), "postgres://localhost/accounting");
    }
}
