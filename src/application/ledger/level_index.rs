//! Level index: who currently holds each tier.
//!
//! One presence marker per `(tier, user)` under the composite scheme
//! `level~UserID`. The index is derived data: handlers keep it in step
//! with every tier-changing write inside the same transaction.

use crate::domain::foundation::UserId;
use crate::domain::membership::{MembershipError, MembershipTier};
use crate::ports::{decode_composite_key, encode_composite_key};

use super::keys::{LEVEL_INDEX_SCHEME, PRESENCE_MARKER};
use super::ClubRecords;

impl ClubRecords<'_> {
    /// Users indexed under `tier`, in store key order.
    pub async fn users_in_tier(
        &mut self,
        tier: MembershipTier,
    ) -> Result<Vec<UserId>, MembershipError> {
        let entries = self
            .tx
            .prefix_scan(LEVEL_INDEX_SCHEME, &[tier.as_str()])
            .await?;

        entries
            .iter()
            .map(|entry| {
                let (_, parts) = decode_composite_key(&entry.key)?;
                let user = parts.get(1).ok_or_else(|| {
                    MembershipError::infrastructure(format!(
                        "level index key for {} has no user part",
                        tier
                    ))
                })?;
                Ok(UserId::new(user.as_str())?)
            })
            .collect()
    }

    /// True if `(tier, user)` is indexed.
    pub async fn index_contains(
        &mut self,
        tier: MembershipTier,
        user: &UserId,
    ) -> Result<bool, MembershipError> {
        Ok(self.users_in_tier(tier).await?.iter().any(|u| u == user))
    }

    /// Adds `(tier, user)` unless already present. Returns true if added.
    pub async fn index_add(
        &mut self,
        tier: MembershipTier,
        user: &UserId,
    ) -> Result<bool, MembershipError> {
        if self.index_contains(tier, user).await? {
            return Ok(false);
        }
        let key = encode_composite_key(LEVEL_INDEX_SCHEME, &[tier.as_str(), user.as_str()])?;
        self.tx.put(&key, PRESENCE_MARKER.to_vec()).await?;
        Ok(true)
    }

    /// Removes `(tier, user)` if present. Returns true if removed.
    pub async fn index_remove(
        &mut self,
        tier: MembershipTier,
        user: &UserId,
    ) -> Result<bool, MembershipError> {
        if !self.index_contains(tier, user).await? {
            return Ok(false);
        }
        let key = encode_composite_key(LEVEL_INDEX_SCHEME, &[tier.as_str(), user.as_str()])?;
        self.tx.delete(&key).await?;
        Ok(true)
    }

    /// Tiers under which `user` is indexed. Used to audit index consistency.
    pub async fn tiers_of(&mut self, user: &UserId) -> Result<Vec<MembershipTier>, MembershipError> {
        let mut tiers = Vec::new();
        for tier in MembershipTier::ALL {
            if self.index_contains(tier, user).await? {
                tiers.push(tier);
            }
        }
        Ok(tiers)
    }
}
