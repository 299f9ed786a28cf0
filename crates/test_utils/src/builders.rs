//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{ContactId, Money};
use domain_billing::{
    AccountingStore, BillingConfig, BillingError, BillingSchedule, Contact,
    InMemoryAccountingStore, Policy, PolicyAccounting,
};
use std::sync::Arc;

use crate::fixtures::{ContactFixtures, DateFixtures, MoneyFixtures};

/// Builder for constructing test policies
pub struct TestPolicyBuilder {
    effective_date: NaiveDate,
    annual_premium: Money,
    billing_schedule: String,
    named_insured: Option<ContactId>,
    agent: Option<ContactId>,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            effective_date: DateFixtures::effective_date(),
            annual_premium: MoneyFixtures::usd_1200(),
            billing_schedule: BillingSchedule::Annual.name().to_string(),
            named_insured: None,
            agent: None,
        }
    }

    /// Sets the effective date
    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = date;
        self
    }

    /// Sets the annual premium
    pub fn with_annual_premium(mut self, premium: Money) -> Self {
        self.annual_premium = premium;
        self
    }

    /// Sets a schedule from the schedule table
    pub fn with_schedule(mut self, schedule: BillingSchedule) -> Self {
        self.billing_schedule = schedule.name().to_string();
        self
    }

    /// Sets a raw billing schedule name, which may be unknown
    pub fn with_billing_schedule(mut self, name: impl Into<String>) -> Self {
        self.billing_schedule = name.into();
        self
    }

    /// Sets the named insured
    pub fn with_named_insured(mut self, id: ContactId) -> Self {
        self.named_insured = Some(id);
        self
    }

    /// Sets the agent
    pub fn with_agent(mut self, id: ContactId) -> Self {
        self.agent = Some(id);
        self
    }

    /// Builds the policy
    pub fn build(self) -> Policy {
        let mut policy = Policy::new("Test Policy", self.effective_date, self.annual_premium)
            .with_billing_schedule(self.billing_schedule);
        policy.named_insured = self.named_insured;
        policy.agent = self.agent;
        policy
    }
}

/// A policy with its agent and named insured in an in-memory store
pub struct AccountingFixture {
    pub store: Arc<InMemoryAccountingStore>,
    pub agent: Contact,
    pub named_insured: Contact,
    pub policy: Policy,
}

impl AccountingFixture {
    /// The store as the engine consumes it
    pub fn store(&self) -> Arc<dyn AccountingStore> {
        self.store.clone()
    }

    /// Opens an accounting session on the fixture's policy
    pub async fn open(&self) -> Result<PolicyAccounting, BillingError> {
        PolicyAccounting::open(self.store(), self.policy.id).await
    }

    /// Opens an accounting session with a custom configuration
    pub async fn open_with_config(
        &self,
        config: BillingConfig,
    ) -> Result<PolicyAccounting, BillingError> {
        PolicyAccounting::open_with_config(self.store(), self.policy.id, config).await
    }
}

/// Builder for an [`AccountingFixture`]
pub struct AccountingFixtureBuilder {
    policy: TestPolicyBuilder,
    with_named_insured: bool,
}

impl Default for AccountingFixtureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountingFixtureBuilder {
    /// Creates a builder for an Annual 1200 policy effective 2015-01-01
    pub fn new() -> Self {
        Self {
            policy: TestPolicyBuilder::new(),
            with_named_insured: true,
        }
    }

    /// Sets the billing schedule
    pub fn schedule(mut self, schedule: BillingSchedule) -> Self {
        self.policy = self.policy.with_schedule(schedule);
        self
    }

    /// Sets a raw billing schedule name
    pub fn billing_schedule(mut self, name: impl Into<String>) -> Self {
        self.policy = self.policy.with_billing_schedule(name);
        self
    }

    /// Sets the annual premium
    pub fn annual_premium(mut self, premium: Money) -> Self {
        self.policy = self.policy.with_annual_premium(premium);
        self
    }

    /// Sets the effective date
    pub fn effective_date(mut self, date: NaiveDate) -> Self {
        self.policy = self.policy.with_effective_date(date);
        self
    }

    /// Leaves the policy without a named insured
    pub fn without_named_insured(mut self) -> Self {
        self.with_named_insured = false;
        self
    }

    /// Seeds an in-memory store with the contacts and the policy
    pub async fn build(self) -> AccountingFixture {
        let agent = ContactFixtures::agent();
        let named_insured = ContactFixtures::named_insured();

        let mut policy = self.policy.with_agent(agent.id);
        if self.with_named_insured {
            policy = policy.with_named_insured(named_insured.id);
        }
        let policy = policy.build();

        let store = InMemoryAccountingStore::with_records(
            vec![agent.clone(), named_insured.clone()],
            vec![policy.clone()],
        )
        .await;

        AccountingFixture {
            store: Arc::new(store),
            agent,
            named_insured,
            policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_builder_defaults() {
        let policy = TestPolicyBuilder::new().build();

        assert_eq!(policy.billing_schedule, "Annual");
        assert_eq!(policy.effective_date, DateFixtures::effective_date());
        assert!(policy.named_insured.is_none());
    }

    #[test]
    fn test_policy_builder_customization() {
        let agent = ContactId::new();
        let policy = TestPolicyBuilder::new()
            .with_schedule(BillingSchedule::Quarterly)
            .with_agent(agent)
            .build();

        assert_eq!(policy.billing_schedule, "Quarterly");
        assert_eq!(policy.agent, Some(agent));
    }

    #[tokio::test]
    async fn test_fixture_seeds_store() {
        let fixture = AccountingFixtureBuilder::new().build().await;

        let stored = fixture.store.get_policy(fixture.policy.id).await.unwrap();
        assert_eq!(stored.named_insured, Some(fixture.named_insured.id));
        assert!(fixture.store.get_contact(fixture.agent.id).await.unwrap().is_some());
    }
}
