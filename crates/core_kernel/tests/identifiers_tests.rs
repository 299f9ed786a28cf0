//! Unit tests for the Identifiers module
//!
//! Tests cover the accounting identifier types, their parsing, conversion,
//! serialization and display formatting.

use core_kernel::{CancellationId, ContactId, InvoiceId, PaymentId, PolicyId};
use std::collections::HashSet;
use uuid::Uuid;

mod policy_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = PolicyId::new();
        let id2 = PolicyId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = PolicyId::from(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_into_uuid() {
        let id = PolicyId::new();
        let uuid: Uuid = id.into();
        assert_eq!(&uuid, id.as_uuid());
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("POL-not-a-uuid".parse::<PolicyId>().is_err());
        assert!("".parse::<PolicyId>().is_err());
    }
}

mod prefix_tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(PolicyId::prefix(), "POL");
        assert_eq!(InvoiceId::prefix(), "INV");
        assert_eq!(PaymentId::prefix(), "PAY");
        assert_eq!(ContactId::prefix(), "CNT");
        assert_eq!(CancellationId::prefix(), "CXL");
    }

    #[test]
    fn test_display_uses_prefix() {
        assert!(InvoiceId::new().to_string().starts_with("INV-"));
        assert!(PaymentId::new().to_string().starts_with("PAY-"));
        assert!(CancellationId::new().to_string().starts_with("CXL-"));
    }

    #[test]
    fn test_round_trip_through_display() {
        let original = PaymentId::new();
        let parsed: PaymentId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&ContactId::from(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn test_deserializes_from_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id: InvoiceId = serde_json::from_str(&format!("\"{}\"", uuid)).unwrap();
        assert_eq!(*id.as_uuid(), uuid);
    }
}

mod hashing_tests {
    use super::*;

    #[test]
    fn test_ids_are_usable_as_set_keys() {
        let id = PolicyId::new();
        let mut set = HashSet::new();
        set.insert(id);
        set.insert(id);
        set.insert(PolicyId::new());
        assert_eq!(set.len(), 2);
    }
}
