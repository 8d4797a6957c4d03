//! Property tests over the money, split, and slot-grid domain rules.

use chrono::NaiveDate;
use proptest::prelude::*;

use speakwise::domain::booking::{
    decode_slot_id, encode_slot_id, slot_times_for_date, FIRST_SLOT_HOUR, LAST_SLOT_HOUR,
};
use speakwise::domain::foundation::{Money, PaymentId, Timestamp};
use speakwise::domain::payment::Installment;
use speakwise::domain::plan::InstallmentScheme;

proptest! {
    #[test]
    fn money_rejects_negative_minor_units(minor in i64::MIN..0) {
        prop_assert!(Money::from_minor(minor).is_err());
    }

    #[test]
    fn money_accepts_non_negative_minor_units(minor in 0i64..=i64::MAX) {
        let money = Money::from_minor(minor).unwrap();
        prop_assert_eq!(money.as_minor(), minor);
    }

    #[test]
    fn money_checked_add_never_wraps(a in 0i64..=i64::MAX, b in 0i64..=i64::MAX) {
        let a = Money::from_minor(a).unwrap();
        let b = Money::from_minor(b).unwrap();
        match a.checked_add(b) {
            Some(sum) => prop_assert_eq!(sum.as_minor(), a.as_minor() + b.as_minor()),
            None => prop_assert!(a.as_minor().checked_add(b.as_minor()).is_none()),
        }
    }

    #[test]
    fn scheme_total_is_exactly_the_two_amounts(
        first in 0i64..1_000_000_000,
        second in 0i64..1_000_000_000,
    ) {
        let scheme = InstallmentScheme::new(
            Money::from_minor(first).unwrap(),
            Money::from_minor(second).unwrap(),
        );
        prop_assert_eq!(scheme.total().unwrap().as_minor(), first + second);

        // Covering total passes, anything off by a unit fails closed.
        let exact = Money::from_minor(first + second).unwrap();
        prop_assert!(scheme.matches_total(exact).is_ok());
        let over = Money::from_minor(first + second + 1).unwrap();
        prop_assert!(scheme.matches_total(over).is_err());
    }

    #[test]
    fn installment_schedule_covers_the_scheme(
        first in 1i64..1_000_000_000,
        second in 1i64..1_000_000_000,
    ) {
        let scheme = InstallmentScheme::new(
            Money::from_minor(first).unwrap(),
            Money::from_minor(second).unwrap(),
        );
        let payment_id = PaymentId::new();
        let schedule = Installment::schedule(payment_id, &scheme);

        prop_assert_eq!(schedule[0].number, 1);
        prop_assert_eq!(schedule[1].number, 2);
        prop_assert_eq!(schedule[0].amount.as_minor(), first);
        prop_assert_eq!(schedule[1].amount.as_minor(), second);
        prop_assert!(schedule.iter().all(|i| i.payment_id == payment_id));
        prop_assert!(schedule[1].due_date.is_after(&schedule[0].due_date));
        prop_assert!(schedule.iter().all(|i| !i.is_paid()));
    }

    #[test]
    fn slot_ids_round_trip(secs in 0i64..4_000_000_000i64) {
        let start = Timestamp::from_unix_secs(secs).unwrap();
        let id = encode_slot_id(start);
        prop_assert_eq!(decode_slot_id(&id).unwrap(), start);
    }

    #[test]
    fn every_day_has_the_same_slot_grid(days in 0u32..36_500) {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(u64::from(days)))
            .unwrap();
        let times = slot_times_for_date(date);

        let expected = (LAST_SLOT_HOUR - FIRST_SLOT_HOUR + 1) as usize;
        prop_assert_eq!(times.len(), expected);
        for pair in times.windows(2) {
            prop_assert_eq!(pair[1].duration_since(&pair[0]).num_hours(), 1);
        }
        // Every slot stays inside its calendar day.
        prop_assert!(times
            .iter()
            .all(|t| t.as_datetime().date_naive() == date));
    }
}
