//! Membership ledger: sequentially keyed records plus the global counter.

use crate::domain::foundation::MembershipId;
use crate::domain::membership::{Membership, MembershipError, User};

use super::codec::{decode, decode_counter, encode};
use super::keys::{membership_key, TOTAL_MEMBERSHIPS_KEY};
use super::ClubRecords;

impl ClubRecords<'_> {
    /// Number of memberships ever created.
    pub async fn total_memberships(&mut self) -> Result<u64, MembershipError> {
        match self.tx.get(TOTAL_MEMBERSHIPS_KEY).await? {
            Some(raw) => decode_counter(TOTAL_MEMBERSHIPS_KEY, &raw),
            None => Ok(0),
        }
    }

    /// Bumps the counter and returns the new membership's id.
    pub async fn allocate_membership_id(&mut self) -> Result<MembershipId, MembershipError> {
        let total = self.total_memberships().await?;
        let next = total
            .checked_add(1)
            .ok_or_else(|| MembershipError::infrastructure("membership counter exhausted"))?;
        self.tx
            .put(TOTAL_MEMBERSHIPS_KEY, next.to_string().into_bytes())
            .await?;
        Ok(MembershipId::new(next))
    }

    pub async fn membership(
        &mut self,
        id: MembershipId,
    ) -> Result<Option<Membership>, MembershipError> {
        let key = membership_key(id);
        match self.tx.get(&key).await? {
            Some(raw) => Ok(Some(decode(&key, &raw)?)),
            None => Ok(None),
        }
    }

    pub async fn require_membership(
        &mut self,
        id: MembershipId,
    ) -> Result<Membership, MembershipError> {
        self.membership(id)
            .await?
            .ok_or_else(|| MembershipError::not_found("Membership", id))
    }

    pub async fn put_membership(&mut self, membership: &Membership) -> Result<(), MembershipError> {
        let key = membership_key(membership.id);
        self.tx.put(&key, encode(&key, membership)?).await?;
        Ok(())
    }

    /// The last membership in the user's history, terminal or not.
    pub async fn latest_membership_of(
        &mut self,
        user: &User,
    ) -> Result<Option<Membership>, MembershipError> {
        match user.latest_membership() {
            Some(id) => Ok(Some(self.require_membership(id).await?)),
            None => Ok(None),
        }
    }

    /// The user's memberships in history order.
    pub async fn memberships_of(&mut self, user: &User) -> Result<Vec<Membership>, MembershipError> {
        let mut memberships = Vec::with_capacity(user.memberships.len());
        for id in &user.memberships {
            memberships.push(self.require_membership(*id).await?);
        }
        Ok(memberships)
    }

    /// Every membership with id `1..=TotalMemberships`, in id order.
    pub async fn all_memberships(&mut self) -> Result<Vec<Membership>, MembershipError> {
        let total = self.total_memberships().await?;
        let mut memberships = Vec::new();
        for n in 1..=total {
            if let Some(membership) = self.membership(MembershipId::new(n)).await? {
                memberships.push(membership);
            }
        }
        Ok(memberships)
    }
}
