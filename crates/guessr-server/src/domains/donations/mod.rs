pub mod service;

pub use service::{DonationSummary, DonationTierResolver, NextTier};
