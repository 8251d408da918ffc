use std::sync::Arc;

use guessr_core::{
    donation_tier_avatars, is_avatar_unlocked, next_tier, AvatarTierTable, DonationLedger,
    DonationTier, DonationTotal,
};
use serde::Serialize;

use crate::infra::metrics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextTier {
    pub tier: DonationTier,
    pub remaining: DonationTotal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonationSummary {
    pub total: DonationTotal,
    pub highest_tier: DonationTier,
    pub tiers: AvatarTierTable,
    pub next_tier: Option<NextTier>,
}

impl DonationSummary {
    #[must_use]
    pub fn for_total(total: DonationTotal) -> Self {
        let tiers = donation_tier_avatars(total);
        Self {
            total,
            highest_tier: tiers.highest_tier(),
            tiers,
            next_tier: next_tier(total).map(|(tier, remaining)| NextTier { tier, remaining }),
        }
    }
}

#[derive(Clone)]
pub struct DonationTierResolver {
    ledger: Arc<dyn DonationLedger>,
}

impl DonationTierResolver {
    pub fn new(ledger: Arc<dyn DonationLedger>) -> Self {
        Self { ledger }
    }

    /// Never fails: a ledger error is logged and reported as `0.00`.
    pub async fn user_total_donations(&self, user_id: i64) -> DonationTotal {
        match self.ledger.sum_donations_for_user(user_id).await {
            Ok(total) => total,
            Err(err) => {
                metrics::store_failure("sum_donations_for_user");
                tracing::warn!(
                    event = "donation_total_failed",
                    user_id,
                    error = %err,
                    "Falling back to zero donation total"
                );
                DonationTotal::ZERO
            }
        }
    }

    pub fn tier_avatars(&self, total: DonationTotal) -> AvatarTierTable {
        donation_tier_avatars(total)
    }

    pub fn is_avatar_unlocked(&self, avatar: &str, total: DonationTotal) -> bool {
        let unlocked = is_avatar_unlocked(avatar, total);
        metrics::avatar_unlock_checked(unlocked);
        unlocked
    }

    pub async fn tier_avatars_for_user(&self, user_id: i64) -> DonationSummary {
        let total = self.user_total_donations(user_id).await;
        DonationSummary::for_total(total)
    }

    pub async fn is_avatar_unlocked_for_user(&self, avatar: &str, user_id: i64) -> bool {
        let total = self.user_total_donations(user_id).await;
        self.is_avatar_unlocked(avatar, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use guessr_core::{StoreError, StoreResult};
    use std::collections::HashMap;

    struct FixedLedger {
        totals: HashMap<i64, DonationTotal>,
    }

    #[async_trait]
    impl DonationLedger for FixedLedger {
        async fn sum_donations_for_user(&self, user_id: i64) -> StoreResult<DonationTotal> {
            Ok(self
                .totals
                .get(&user_id)
                .copied()
                .unwrap_or(DonationTotal::ZERO))
        }
    }

    struct BrokenLedger;

    #[async_trait]
    impl DonationLedger for BrokenLedger {
        async fn sum_donations_for_user(&self, _user_id: i64) -> StoreResult<DonationTotal> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn resolver() -> DonationTierResolver {
        let totals = HashMap::from([
            (1, DonationTotal::from_cents(450)),
            (2, DonationTotal::from_units(60)),
        ]);
        DonationTierResolver::new(Arc::new(FixedLedger { totals }))
    }

    #[tokio::test]
    async fn total_comes_from_ledger() {
        let resolver = resolver();
        assert_eq!(
            resolver.user_total_donations(1).await,
            DonationTotal::from_cents(450)
        );
        assert_eq!(resolver.user_total_donations(99).await, DonationTotal::ZERO);
    }

    #[tokio::test]
    async fn ledger_failure_degrades_to_zero() {
        let resolver = DonationTierResolver::new(Arc::new(BrokenLedger));
        let before = metrics::store_failure_count("sum_donations_for_user");
        assert_eq!(resolver.user_total_donations(1).await, DonationTotal::ZERO);
        assert!(metrics::store_failure_count("sum_donations_for_user") > before);

        let summary = resolver.tier_avatars_for_user(1).await;
        assert_eq!(summary.highest_tier, DonationTier::Vip);
        assert!(!resolver.is_avatar_unlocked_for_user("🦊", 1).await);
    }

    #[tokio::test]
    async fn summary_for_user_includes_next_tier() {
        let summary = resolver().tier_avatars_for_user(1).await;
        assert_eq!(summary.total, DonationTotal::from_cents(450));
        assert_eq!(summary.highest_tier, DonationTier::Tier1);
        assert_eq!(
            summary.next_tier,
            Some(NextTier {
                tier: DonationTier::Tier2,
                remaining: DonationTotal::from_cents(50),
            })
        );

        let top = resolver().tier_avatars_for_user(2).await;
        assert_eq!(top.tiers.len(), 5);
        assert_eq!(top.next_tier, None);
    }

    #[tokio::test]
    async fn avatar_unlock_for_user_uses_total() {
        let resolver = resolver();
        assert!(resolver.is_avatar_unlocked_for_user("🦊", 1).await);
        assert!(!resolver.is_avatar_unlocked_for_user("🦄", 1).await);
        assert!(resolver.is_avatar_unlocked_for_user("🚀", 2).await);
        assert!(!resolver.is_avatar_unlocked_for_user("not-an-avatar", 2).await);
    }

    #[test]
    fn summary_serializes_decimal_strings() {
        let summary = DonationSummary::for_total(DonationTotal::from_units(30));
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["total"], "30.00");
        assert_eq!(json["highest_tier"], "tier3");
        assert_eq!(json["next_tier"]["tier"], "tier4");
        assert_eq!(json["next_tier"]["remaining"], "20.00");
        assert!(json["tiers"]["tier3"].is_array());
    }
}
