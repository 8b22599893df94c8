use serde::{Deserialize, Serialize};

use crate::models::money::Money;

// Marketplace commission rates, in basis points.
pub const HOST_BOOKING_FEE_BPS: u32 = 1_500; // 15%
pub const TABLE_SALE_FEE_BPS: u32 = 500; // 5%

// Linear payment-processor cost model: amount * rate + fixed.
pub const PROCESSING_FEE_BPS: u32 = 290; // 2.9%
pub const PROCESSING_FEE_FIXED: Money = Money::from_cents(30);

// Flat fee charged when inviting a vendor from outside the platform.
pub const EXTERNAL_INVITE_COST: Money = Money::from_cents(200);

// Floor thresholds.
pub const MINIMUM_PAYOUT: Money = Money::from_cents(2_500);
pub const MINIMUM_CHARGE: Money = Money::from_cents(50);

// Credit economy.
pub const PROPOSAL_CREDIT_COST: i64 = 5;
pub const REFERRAL_SIGNUP_REWARD: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Basic,
    Pro,
    Enterprise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl SubscriptionTier {
    pub const fn monthly_price(self) -> Money {
        match self {
            SubscriptionTier::Basic => Money::from_cents(1_999),
            SubscriptionTier::Pro => Money::from_cents(4_999),
            SubscriptionTier::Enterprise => Money::from_cents(9_999),
        }
    }

    pub const fn yearly_price(self) -> Money {
        match self {
            SubscriptionTier::Basic => Money::from_cents(19_999),
            SubscriptionTier::Pro => Money::from_cents(49_999),
            SubscriptionTier::Enterprise => Money::from_cents(99_999),
        }
    }
}
