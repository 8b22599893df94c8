use std::cmp::Ordering;

use crate::models::money::Money;

pub mod rates;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("amount must not be negative: {0} cents")]
    NegativeAmount(i64),
}

/// Commission charged to a host on a completed local-vendor booking.
pub fn host_booking_fee(amount: Money) -> Result<Money, PricingError> {
    Ok(bps_fee(require_non_negative(amount)?, rates::HOST_BOOKING_FEE_BPS))
}

/// Commission charged on any event table sale transaction.
pub fn table_sale_fee(amount: Money) -> Result<Money, PricingError> {
    Ok(bps_fee(require_non_negative(amount)?, rates::TABLE_SALE_FEE_BPS))
}

/// Pass-through processor cost. The fixed component applies to every
/// charge, including a zero amount.
pub fn processing_fee(amount: Money) -> Result<Money, PricingError> {
    let variable = bps_fee(require_non_negative(amount)?, rates::PROCESSING_FEE_BPS);
    Ok(Money::from_cents(
        variable.cents() + rates::PROCESSING_FEE_FIXED.cents(),
    ))
}

pub fn external_invite_fee() -> Money {
    rates::EXTERNAL_INVITE_COST
}

pub fn subscription_price(tier: rates::SubscriptionTier, cycle: rates::BillingCycle) -> Money {
    match cycle {
        rates::BillingCycle::Monthly => tier.monthly_price(),
        rates::BillingCycle::Yearly => tier.yearly_price(),
    }
}

/// Renders an amount as a USD string: dollar sign, thousands separators,
/// two decimals. Display-only, the sole currency formatter in the repo.
pub fn format_currency(amount: Money) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let remainder = abs % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{remainder:02}")
}

fn require_non_negative(amount: Money) -> Result<Money, PricingError> {
    if amount.is_negative() {
        return Err(PricingError::NegativeAmount(amount.cents()));
    }
    Ok(amount)
}

const BPS_SCALE: i128 = 10_000;

// Half-to-even rounding at the cent boundary. The product is widened to
// i128 so large amounts cannot overflow; the result is at most the input
// and fits back into i64.
fn bps_fee(amount: Money, rate_bps: u32) -> Money {
    let product = amount.cents() as i128 * rate_bps as i128;
    let quotient = product / BPS_SCALE;
    let remainder = product % BPS_SCALE;
    let rounded = match (remainder * 2).cmp(&BPS_SCALE) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 0 => quotient,
        Ordering::Equal => quotient + 1,
    };
    Money::from_cents(rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_fee_is_fifteen_percent() {
        let fee = host_booking_fee(Money::from_cents(10_000)).unwrap();
        assert_eq!(fee, Money::from_cents(1_500));
    }

    #[test]
    fn table_sale_fee_is_five_percent() {
        let fee = table_sale_fee(Money::from_cents(10_000)).unwrap();
        assert_eq!(fee, Money::from_cents(500));
    }

    #[test]
    fn processing_fee_is_linear() {
        let fee = processing_fee(Money::from_cents(10_000)).unwrap();
        assert_eq!(fee, Money::from_cents(320)); // 2.9% + $0.30
    }

    #[test]
    fn processing_fee_floor_applies_at_zero() {
        let fee = processing_fee(Money::ZERO).unwrap();
        assert_eq!(fee, rates::PROCESSING_FEE_FIXED);
    }

    #[test]
    fn zero_amount_yields_zero_rate_fees() {
        assert_eq!(host_booking_fee(Money::ZERO).unwrap(), Money::ZERO);
        assert_eq!(table_sale_fee(Money::ZERO).unwrap(), Money::ZERO);
    }

    #[test]
    fn half_cents_round_to_even() {
        // 10 cents at 5% is 0.5 cents, rounds down to the even 0.
        assert_eq!(table_sale_fee(Money::from_cents(10)).unwrap(), Money::ZERO);
        // 30 cents at 5% is 1.5 cents, rounds up to the even 2.
        assert_eq!(
            table_sale_fee(Money::from_cents(30)).unwrap(),
            Money::from_cents(2)
        );
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let amount = Money::from_cents(-100);
        assert_eq!(
            host_booking_fee(amount),
            Err(PricingError::NegativeAmount(-100))
        );
        assert_eq!(
            table_sale_fee(amount),
            Err(PricingError::NegativeAmount(-100))
        );
        assert_eq!(
            processing_fee(amount),
            Err(PricingError::NegativeAmount(-100))
        );
    }

    #[test]
    fn large_amounts_do_not_overflow() {
        let amount = Money::from_cents(i64::MAX / 2);
        let fee = host_booking_fee(amount).unwrap();
        assert!(fee.cents() > 0);
        assert!(fee < amount);
    }

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_currency(Money::from_cents(123_450)), "$1,234.50");
        assert_eq!(format_currency(Money::ZERO), "$0.00");
        assert_eq!(format_currency(Money::from_cents(5)), "$0.05");
        assert_eq!(
            format_currency(Money::from_cents(100_000_000)),
            "$1,000,000.00"
        );
        assert_eq!(format_currency(Money::from_cents(-50)), "-$0.50");
    }

    #[test]
    fn subscription_prices_follow_the_tier_table() {
        assert_eq!(
            subscription_price(rates::SubscriptionTier::Basic, rates::BillingCycle::Monthly),
            Money::from_cents(1_999)
        );
        assert_eq!(
            subscription_price(rates::SubscriptionTier::Enterprise, rates::BillingCycle::Yearly),
            Money::from_cents(99_999)
        );
    }
}
