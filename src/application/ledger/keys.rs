//! Persisted key layout.
//!
//! | Key | Value |
//! |-----|-------|
//! | `owner` | raw identity bytes |
//! | `User-<id>` | JSON `User` |
//! | `<tier name>` | JSON `Level` |
//! | `Membership-<n>` | JSON `Membership` |
//! | `TotalMemberships` | decimal counter |
//! | `\0level~UserID\0<tier>\0<user>\0` | single `0x00` presence byte |

use crate::domain::foundation::{MembershipId, UserId};
use crate::domain::membership::MembershipTier;

pub const OWNER_KEY: &str = "owner";
pub const USER_PREFIX: &str = "User-";
/// First key past every `User-` key (`.` sorts right after `-`).
pub const USER_RANGE_END: &str = "User.";
pub const MEMBERSHIP_PREFIX: &str = "Membership-";
pub const TOTAL_MEMBERSHIPS_KEY: &str = "TotalMemberships";
pub const LEVEL_INDEX_SCHEME: &str = "level~UserID";
pub const PRESENCE_MARKER: [u8; 1] = [0x00];

pub fn user_key(id: &UserId) -> String {
    format!("{}{}", USER_PREFIX, id)
}

pub fn membership_key(id: MembershipId) -> String {
    format!("{}{}", MEMBERSHIP_PREFIX, id)
}

pub fn level_key(tier: MembershipTier) -> &'static str {
    tier.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keys_follow_the_layout() {
        let alice = UserId::new("alice").unwrap();
        assert_eq!(user_key(&alice), "User-alice");
        assert_eq!(membership_key(MembershipId::new(12)), "Membership-12");
        assert_eq!(level_key(MembershipTier::Diamond), "Diamond");
    }

    #[test]
    fn user_range_covers_all_user_keys() {
        let key = user_key(&UserId::new("~zzz").unwrap());
        assert!(key.as_str() >= USER_PREFIX && key.as_str() < USER_RANGE_END);
    }
}
