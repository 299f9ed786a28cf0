//! PostgreSQL adapter tests
//!
//! Each test starts its own container, so they need Docker:
//! `cargo test -p infra_db -- --ignored`

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::{Currency, Money};
use domain_billing::{
    AccountingStore, CancellationDecision, Contact, InvoiceState, PaymentOutcome, Policy,
    PolicyAccounting,
};
use test_utils::create_isolated_test_database;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_annual(store: &Arc<dyn AccountingStore>) -> (Policy, Contact) {
    let insured = Contact::named_insured("Ryan Bucket");
    let policy = Policy::new("Policy One", date(2015, 1, 1), Money::new(dec!(1200), Currency::USD))
        .with_billing_schedule("Annual")
        .with_named_insured(insured.id);

    store.insert_contact(&insured).await.unwrap();
    store.insert_policy(&policy).await.unwrap();
    (policy, insured)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_policy_and_contact_round_trip() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.store();
    let (policy, insured) = seed_annual(&store).await;

    let loaded = store.get_policy(policy.id).await.unwrap();
    assert_eq!(loaded.policy_number, "Policy One");
    assert_eq!(loaded.annual_premium, policy.annual_premium);
    assert_eq!(store.get_contact(insured.id).await.unwrap(), Some(insured));

    db.truncate().await.unwrap();
    assert!(store.get_policy(policy.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_regenerating_invoices_supersedes_history() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.store();
    let (policy, _) = seed_annual(&store).await;

    let accounting = PolicyAccounting::open(store.clone(), policy.id).await.unwrap();
    accounting.make_invoices().await.unwrap();

    let active = store.active_invoices(policy.id).await.unwrap();
    let history = store.invoice_history(policy.id).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(history.len(), 2);
    assert_eq!(
        history.iter().filter(|i| i.state == InvoiceState::Superseded).count(),
        1
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unpaid_policy_cancels_once() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.store();
    let (policy, _) = seed_annual(&store).await;

    let mut accounting = PolicyAccounting::open(store.clone(), policy.id).await.unwrap();
    let decision = accounting.evaluate_cancel(Some(date(2015, 2, 15))).await.unwrap();
    assert!(matches!(decision, CancellationDecision::Canceled(_)));

    let mut again = PolicyAccounting::open(store.clone(), policy.id).await.unwrap();
    let decision = again.evaluate_cancel(Some(date(2015, 3, 1))).await.unwrap();
    assert_eq!(decision, CancellationDecision::AlreadyCanceled);
    assert_eq!(store.cancellations(policy.id).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_payment_reduces_balance() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.store();
    let (policy, _) = seed_annual(&store).await;

    let accounting = PolicyAccounting::open(store.clone(), policy.id).await.unwrap();
    let outcome = accounting
        .make_payment(None, Some(date(2015, 1, 10)), Money::new(dec!(1200), Currency::USD))
        .await
        .unwrap();

    assert!(matches!(outcome, PaymentOutcome::Recorded(_)));
    assert!(accounting.balance(Some(date(2015, 1, 10))).await.unwrap().is_zero());
}
