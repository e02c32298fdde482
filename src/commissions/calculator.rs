//! Commission calculation functions.
//!
//! Pure functions for commission math - no database access. Amounts stay
//! at full Decimal precision; rounding happens only at the response
//! boundary.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::Booking;

/// Rate applied when a collaborator has no configured commission_rate
pub const DEFAULT_COMMISSION_RATE: Decimal = dec!(0.10);

/// Commission earned on a single booking.
///
/// `rate` is the collaborator's configured rate in [0, 1]; `None` falls
/// back to the 10% default.
pub fn commission(total_price: Decimal, rate: Option<Decimal>) -> Decimal {
    total_price * rate.unwrap_or(DEFAULT_COMMISSION_RATE)
}

/// Commission earned across a collaborator's bookings, a sum-reduce over
/// the per-booking function.
pub fn total_commission<'a, I>(bookings: I, rate: Option<Decimal>) -> Decimal
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings
        .into_iter()
        .map(|booking| commission(booking.total_price, rate))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn booking(total: Decimal) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            total_price: total,
            collaborator_id: Some(Uuid::new_v4()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_commission_default_rate() {
        assert_eq!(commission(dec!(1000), None), dec!(100.0));
    }

    #[test]
    fn test_commission_configured_rate() {
        assert_eq!(commission(dec!(250), Some(dec!(0.15))), dec!(37.5));
    }

    #[test]
    fn test_commission_zero_total() {
        assert_eq!(commission(dec!(0), None), dec!(0));
    }

    #[test]
    fn test_commission_full_precision() {
        // No rounding inside the calculation
        assert_eq!(commission(dec!(33.33), Some(dec!(0.15))), dec!(4.9995));
    }

    #[test]
    fn test_total_commission_sums_per_booking() {
        let bookings = vec![booking(dec!(1000)), booking(dec!(250))];
        assert_eq!(total_commission(&bookings, None), dec!(125.0));
        assert_eq!(
            total_commission(&bookings, Some(dec!(0.15))),
            dec!(187.50)
        );
    }

    #[test]
    fn test_total_commission_empty() {
        assert_eq!(total_commission(&[], None), dec!(0));
    }
}
