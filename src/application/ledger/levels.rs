//! Level catalog: one record per tier, keyed by the tier name.

use crate::domain::membership::{Level, MembershipError, MembershipTier};

use super::codec::{decode, encode};
use super::keys::level_key;
use super::ClubRecords;

impl ClubRecords<'_> {
    pub async fn level(&mut self, tier: MembershipTier) -> Result<Option<Level>, MembershipError> {
        let key = level_key(tier);
        match self.tx.get(key).await? {
            Some(raw) => Ok(Some(decode(key, &raw)?)),
            None => Ok(None),
        }
    }

    /// The tier's level, failing with `NotFound` if it was never set.
    pub async fn require_level(&mut self, tier: MembershipTier) -> Result<Level, MembershipError> {
        self.level(tier)
            .await?
            .ok_or_else(|| MembershipError::not_found("Level", tier))
    }

    pub async fn put_level(
        &mut self,
        tier: MembershipTier,
        level: &Level,
    ) -> Result<(), MembershipError> {
        let key = level_key(tier);
        self.tx.put(key, encode(key, level)?).await?;
        Ok(())
    }
}
