pub mod geocoding;
pub mod marketplace;
pub mod payments;
pub mod processor;
pub mod referrals;
pub mod users;
