mod amount;
mod tier;


pub use amount::{AmountParseError, DonationTotal};
pub use tier::DonationTier;
