pub mod geo;
pub mod marketplace;
pub mod money;
pub mod payments;
pub mod referrals;
pub mod users;
pub mod verification;
