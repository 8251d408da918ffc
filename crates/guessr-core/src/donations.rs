//! Donation tiers and the avatar glyphs they unlock.
//!
//! Tiers are additive: a total that reaches `tier3` also holds `vip`,
//! `tier1` and `tier2`. The table below is the only place thresholds and
//! glyphs are defined; adding a tier means adding a row.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{DonationTier, DonationTotal};

pub struct TierRule {
    pub tier: DonationTier,
    pub threshold: DonationTotal,
    pub avatars: &'static [&'static str],
}

/// Ordered by ascending threshold.
pub const TIER_RULES: &[TierRule] = &[
    TierRule {
        tier: DonationTier::Vip,
        threshold: DonationTotal::ZERO,
        avatars: &["⭐", "🌟", "✨", "🎖️"],
    },
    TierRule {
        tier: DonationTier::Tier1,
        threshold: DonationTotal::from_units(2),
        avatars: &["🦊", "🐼", "🐨", "🦁", "🐯"],
    },
    TierRule {
        tier: DonationTier::Tier2,
        threshold: DonationTotal::from_units(5),
        avatars: &["🦄", "🐉", "🦅", "🦋"],
    },
    TierRule {
        tier: DonationTier::Tier3,
        threshold: DonationTotal::from_units(25),
        avatars: &["👑", "💎", "🏆"],
    },
    TierRule {
        tier: DonationTier::Tier4,
        threshold: DonationTotal::from_units(50),
        avatars: &["🚀", "🌌", "🪐"],
    },
];

/// Tiers unlocked by a donation total, in tier order, each with its glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarTierTable {
    tiers: Vec<(DonationTier, &'static [&'static str])>,
}

impl AvatarTierTable {
    pub fn tiers(&self) -> impl Iterator<Item = DonationTier> + '_ {
        self.tiers.iter().map(|(tier, _)| *tier)
    }

    #[must_use]
    pub fn contains_tier(&self, tier: DonationTier) -> bool {
        self.tiers.iter().any(|(included, _)| *included == tier)
    }

    /// All unlocked glyphs, flattened in tier order.
    pub fn avatars(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tiers
            .iter()
            .flat_map(|(_, avatars)| avatars.iter().copied())
    }

    #[must_use]
    pub fn contains_avatar(&self, avatar: &str) -> bool {
        self.avatars().any(|glyph| glyph == avatar)
    }

    #[must_use]
    pub fn highest_tier(&self) -> DonationTier {
        self.tiers
            .last()
            .map_or(DonationTier::Vip, |(tier, _)| *tier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Serialize for AvatarTierTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tiers.len()))?;
        for (tier, avatars) in &self.tiers {
            map.serialize_entry(tier, avatars)?;
        }
        map.end()
    }
}

#[must_use]
pub fn donation_tier_avatars(total: DonationTotal) -> AvatarTierTable {
    let tiers = TIER_RULES
        .iter()
        .filter(|rule| rule.tier == DonationTier::Vip || total >= rule.threshold)
        .map(|rule| (rule.tier, rule.avatars))
        .collect();
    AvatarTierTable { tiers }
}

/// Only donation-tier glyphs are recognised; anything else is never unlocked.
#[must_use]
pub fn is_avatar_unlocked(avatar: &str, total: DonationTotal) -> bool {
    donation_tier_avatars(total).contains_avatar(avatar)
}

#[must_use]
pub fn unlocked_avatars(total: DonationTotal) -> Vec<&'static str> {
    donation_tier_avatars(total).avatars().collect()
}

#[must_use]
pub fn highest_tier(total: DonationTotal) -> DonationTier {
    donation_tier_avatars(total).highest_tier()
}

/// The first locked tier and how much more is needed to reach it.
#[must_use]
pub fn next_tier(total: DonationTotal) -> Option<(DonationTier, DonationTotal)> {
    TIER_RULES
        .iter()
        .find(|rule| total < rule.threshold)
        .map(|rule| (rule.tier, rule.threshold.saturating_sub(total)))
}
