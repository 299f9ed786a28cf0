//! Unit tests for the Money module
//!
//! Tests cover creation, checked arithmetic, summation and the installment
//! allocation used to split annual premiums.

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::USD);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert!(!m.is_positive());
        assert!(!m.is_negative());
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_negative_amount() {
        let m = -Money::new(dec!(25), Currency::USD);
        assert!(m.is_negative());
        assert_eq!(m.amount(), dec!(-25));
    }

    #[test]
    fn test_to_minor_rounds_sub_cent_amounts() {
        let m = Money::new(dec!(100.005), Currency::USD);
        assert_eq!(m.to_minor().unwrap(), 10001);
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_sub_can_go_negative() {
        let due = Money::new(dec!(300), Currency::USD);
        let paid = Money::new(dec!(400), Currency::USD);
        assert_eq!(due.checked_sub(&paid).unwrap().amount(), dec!(-100));
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total = Money::sum(Currency::USD, &Vec::<Money>::new()).unwrap();
        assert_eq!(total, Money::zero(Currency::USD));
    }

    #[test]
    fn test_sum_rejects_mixed_currencies() {
        let amounts = vec![
            Money::new(dec!(10), Currency::USD),
            Money::new(dec!(10), Currency::GBP),
        ];
        assert!(matches!(
            Money::sum(Currency::USD, &amounts),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }
}

mod allocation {
    use super::*;

    #[test]
    fn test_single_part_is_whole_amount() {
        let m = Money::new(dec!(365), Currency::USD);
        assert_eq!(m.allocate(1).unwrap(), vec![m]);
    }

    #[test]
    fn test_three_way_split_of_round_premium() {
        let m = Money::new(dec!(100), Currency::USD);
        let parts = m.allocate(3).unwrap();
        let amounts: Vec<_> = parts.iter().map(|p| p.amount()).collect();
        assert_eq!(amounts, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
    }

    #[test]
    fn test_zero_decimal_currency_splits_in_whole_units() {
        let m = Money::new(dec!(1000), Currency::JPY);
        let amounts: Vec<_> = m.allocate(3).unwrap().iter().map(|p| p.amount()).collect();
        assert_eq!(amounts, vec![dec!(334), dec!(333), dec!(333)]);
    }
}
