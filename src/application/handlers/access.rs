//! Caller gates shared by the catalog and bootstrap handlers.

use crate::application::ledger::ClubRecords;
use crate::domain::foundation::Caller;
use crate::domain::membership::MembershipError;

/// Passes callers with the `admin` role or the stored owner identity.
pub(crate) async fn require_admin(
    records: &mut ClubRecords<'_>,
    caller: &Caller,
    action: &str,
) -> Result<(), MembershipError> {
    if caller.has_admin_role() {
        return Ok(());
    }
    match records.owner().await? {
        Some(owner) if owner == caller.id => Ok(()),
        _ => Err(MembershipError::unauthorized(&caller.id, action)),
    }
}

/// Passes only the stored owner identity. The admin role is not enough.
pub(crate) async fn require_owner(
    records: &mut ClubRecords<'_>,
    caller: &Caller,
    action: &str,
) -> Result<(), MembershipError> {
    let owner = records.require_owner().await?;
    if owner == caller.id {
        Ok(())
    } else {
        Err(MembershipError::unauthorized(&caller.id, action))
    }
}
