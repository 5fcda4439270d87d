// The payment-driven status machine, exercised as a pure function.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use gstbill::invoices::InvoiceStatus;
use gstbill::payments::derive_status;

#[test]
fn test_partial_then_full_payment() {
    let grand = dec!(1000);

    assert_eq!(
        derive_status(InvoiceStatus::Generated, dec!(400), grand),
        InvoiceStatus::PartiallyPaid
    );
    assert_eq!(
        derive_status(InvoiceStatus::PartiallyPaid, dec!(1000), grand),
        InvoiceStatus::Paid
    );
}

#[test]
fn test_no_payments_means_generated() {
    assert_eq!(
        derive_status(InvoiceStatus::PartiallyPaid, Decimal::ZERO, dec!(1000)),
        InvoiceStatus::Generated
    );
}

#[test]
fn test_overpayment_is_still_paid() {
    assert_eq!(
        derive_status(InvoiceStatus::Generated, dec!(1500), dec!(1000)),
        InvoiceStatus::Paid
    );
}

#[test]
fn test_cancelled_absorbs_everything() {
    for paid in [Decimal::ZERO, dec!(400), dec!(1000), dec!(2000)] {
        assert_eq!(
            derive_status(InvoiceStatus::Cancelled, paid, dec!(1000)),
            InvoiceStatus::Cancelled
        );
    }
}

proptest! {
    // The non-cancelled statuses are fully determined by the payment sum;
    // the prior status never changes the answer.
    #[test]
    fn test_transition_ignores_prior_active_status(
        paid_paise in 0u64..10_000_000u64,
        total_paise in 1u64..10_000_000u64
    ) {
        let paid = Decimal::new(paid_paise as i64, 2);
        let total = Decimal::new(total_paise as i64, 2);

        let from_generated = derive_status(InvoiceStatus::Generated, paid, total);
        let from_partial = derive_status(InvoiceStatus::PartiallyPaid, paid, total);
        let from_paid = derive_status(InvoiceStatus::Paid, paid, total);

        prop_assert_eq!(from_generated, from_partial);
        prop_assert_eq!(from_partial, from_paid);
    }

    #[test]
    fn test_never_produces_cancelled_from_active(
        paid_paise in 0u64..10_000_000u64,
        total_paise in 1u64..10_000_000u64
    ) {
        let paid = Decimal::new(paid_paise as i64, 2);
        let total = Decimal::new(total_paise as i64, 2);

        let status = derive_status(InvoiceStatus::Generated, paid, total);
        prop_assert_ne!(status, InvoiceStatus::Cancelled);
    }
}
