//! Demo data
//!
//! Six contacts and four policies effective in early 2015, with invoices
//! generated and one payment recorded on the quarterly policy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{Currency, Money, PolicyId};
use domain_billing::{
    AccountingStore, BillingConfig, BillingError, BillingSchedule, Contact, Payment,
    PaymentOutcome, Policy, PolicyAccounting,
};

/// What seeding wrote
#[derive(Debug, Clone)]
pub struct SeededPolicies {
    pub policies: Vec<(String, PolicyId)>,
    /// The demo payment, `None` if the engine refused it
    pub demo_payment: Option<Payment>,
}

struct DemoPolicy {
    number: &'static str,
    effective: (i32, u32, u32),
    premium: i64,
    schedule: BillingSchedule,
    named_insured: usize,
    agent: usize,
}

const DEMO_POLICIES: [DemoPolicy; 4] = [
    DemoPolicy { number: "Policy One", effective: (2015, 1, 1), premium: 365, schedule: BillingSchedule::Annual, named_insured: 1, agent: 2 },
    DemoPolicy { number: "Policy Two", effective: (2015, 2, 1), premium: 1600, schedule: BillingSchedule::Quarterly, named_insured: 3, agent: 4 },
    DemoPolicy { number: "Policy Three", effective: (2015, 1, 1), premium: 1200, schedule: BillingSchedule::Monthly, named_insured: 5, agent: 0 },
    DemoPolicy { number: "Policy Four", effective: (2015, 2, 1), premium: 500, schedule: BillingSchedule::TwoPay, named_insured: 5, agent: 0 },
];

fn date((y, m, d): (i32, u32, u32)) -> Result<NaiveDate, BillingError> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| BillingError::DateOutOfRange(format!("{}-{}-{}", y, m, d)))
}

/// Writes the demo contacts, policies, invoices and payment into `store`
pub async fn seed_demo_data(
    store: Arc<dyn AccountingStore>,
    config: &BillingConfig,
    currency: Currency,
) -> Result<SeededPolicies, BillingError> {
    let contacts = [
        Contact::agent("John Doe"),
        Contact::named_insured("John Doe"),
        Contact::agent("Bob Smith"),
        Contact::named_insured("Anna White"),
        Contact::agent("Joe Lee"),
        Contact::named_insured("Ryan Bucket"),
    ];
    for contact in &contacts {
        store.insert_contact(contact).await?;
    }

    let mut seeded = SeededPolicies {
        policies: Vec::new(),
        demo_payment: None,
    };
    for demo in &DEMO_POLICIES {
        let policy = Policy::new(
            demo.number,
            date(demo.effective)?,
            Money::new(Decimal::from(demo.premium), currency),
        )
        .with_billing_schedule(demo.schedule.name())
        .with_named_insured(contacts[demo.named_insured].id)
        .with_agent(contacts[demo.agent].id);

        store.insert_policy(&policy).await?;
        PolicyAccounting::open_with_config(store.clone(), policy.id, config.clone()).await?;
        info!(policy_id = %policy.id, policy_number = demo.number, "seeded policy");
        seeded.policies.push((demo.number.to_string(), policy.id));
    }

    // Anna White pays 400 on Policy Two's effective date
    let (_, quarterly) = &seeded.policies[1];
    let accounting = PolicyAccounting::open_with_config(store.clone(), *quarterly, config.clone()).await?;
    let outcome = accounting
        .make_payment(
            Some(contacts[3].id),
            Some(date((2015, 2, 1))?),
            Money::new(Decimal::from(400), currency),
        )
        .await?;
    seeded.demo_payment = recorded_payment(outcome);

    Ok(seeded)
}

fn recorded_payment(outcome: PaymentOutcome) -> Option<Payment> {
    match outcome {
        PaymentOutcome::Recorded(payment) => Some(payment),
        PaymentOutcome::Refused(reason) => {
            warn!(%reason, "demo payment was refused");
            None
        }
    }
}
