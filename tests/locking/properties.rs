use std::time::Duration;

use frontend_editing::{ConfigError, LeaseDuration, RENEWAL_MARGIN_SECONDS};
use proptest::prelude::*;

use crate::support::{alice, at, bob, manager_with_lease};

proptest! {
    #[test]
    fn inspect_is_free_exactly_from_expiry(lease in 11u64..5_000, offset in -10_000i64..10_000) {
        let locks = manager_with_lease(lease);
        locks.acquire("doc", &alice(), at(0)).unwrap();

        let seen = locks.inspect("doc", at(offset)).unwrap();
        prop_assert_eq!(seen.is_none(), offset >= lease as i64);
    }

    #[test]
    fn contended_until_expiry(lease in 11u64..5_000, offset in 0i64..10_000) {
        let locks = manager_with_lease(lease);
        locks.try_acquire("doc", &alice(), at(0)).unwrap();

        let outcome = locks.try_acquire("doc", &bob(), at(offset)).unwrap();
        prop_assert_eq!(outcome.is_acquired(), offset >= lease as i64);
    }

    #[test]
    fn renewal_interval_is_lease_minus_margin(lease in 11u64..100_000) {
        let interval = LeaseDuration::from_secs(lease).unwrap().renewal_interval();
        prop_assert_eq!(interval, Duration::from_secs(lease - RENEWAL_MARGIN_SECONDS));
        prop_assert!(interval > Duration::ZERO);
    }

    #[test]
    fn leases_within_margin_are_rejected(lease in 0u64..=10) {
        prop_assert_eq!(
            LeaseDuration::from_secs(lease),
            Err(ConfigError::LeaseTooShort { seconds: lease })
        );
    }
}
