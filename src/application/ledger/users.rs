//! User directory.

use crate::domain::foundation::UserId;
use crate::domain::membership::{MembershipError, User};

use super::codec::{decode, encode};
use super::keys::{user_key, USER_PREFIX, USER_RANGE_END};
use super::ClubRecords;

impl ClubRecords<'_> {
    pub async fn user(&mut self, id: &UserId) -> Result<Option<User>, MembershipError> {
        let key = user_key(id);
        match self.tx.get(&key).await? {
            Some(raw) => Ok(Some(decode(&key, &raw)?)),
            None => Ok(None),
        }
    }

    /// The user's record, failing with `NotFound` if unregistered.
    pub async fn require_user(&mut self, id: &UserId) -> Result<User, MembershipError> {
        self.user(id)
            .await?
            .ok_or_else(|| MembershipError::not_found("User", id))
    }

    pub async fn put_user(&mut self, user: &User) -> Result<(), MembershipError> {
        let key = user_key(&user.id);
        self.tx.put(&key, encode(&key, user)?).await?;
        Ok(())
    }

    /// Every registered user, in key order.
    pub async fn all_users(&mut self) -> Result<Vec<User>, MembershipError> {
        self.tx
            .range_scan(USER_PREFIX, USER_RANGE_END)
            .await?
            .iter()
            .map(|entry| decode(&entry.key, &entry.value))
            .collect()
    }
}
