//! Club settings: the owner identity singleton.

use crate::domain::foundation::UserId;
use crate::domain::membership::MembershipError;

use super::keys::OWNER_KEY;
use super::ClubRecords;

impl ClubRecords<'_> {
    /// The stored owner, or `None` before initialization.
    pub async fn owner(&mut self) -> Result<Option<UserId>, MembershipError> {
        let Some(raw) = self.tx.get(OWNER_KEY).await? else {
            return Ok(None);
        };
        let id = String::from_utf8(raw)
            .map_err(|_| MembershipError::infrastructure("owner record is not UTF-8"))?;
        Ok(Some(UserId::new(id)?))
    }

    /// The stored owner, failing with `NotInitialized` before initialization.
    pub async fn require_owner(&mut self) -> Result<UserId, MembershipError> {
        self.owner().await?.ok_or(MembershipError::NotInitialized)
    }

    pub async fn set_owner(&mut self, owner: &UserId) -> Result<(), MembershipError> {
        self.tx
            .put(OWNER_KEY, owner.as_str().as_bytes().to_vec())
            .await?;
        Ok(())
    }
}
