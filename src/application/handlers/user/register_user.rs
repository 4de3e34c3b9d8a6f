//! RegisterUserHandler - Command handler for joining the club directory.

use std::sync::Arc;

use crate::application::ledger::{settle, ClubRecords};
use crate::domain::foundation::Caller;
use crate::domain::membership::{MembershipError, User};
use crate::ports::{LedgerStore, LedgerTransaction, TokenLedger};

/// Command to register the caller.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub caller: Caller,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserResult {
    pub user: User,
    pub bonus_minted: u64,
}

/// Handler for registering users.
///
/// The user key comes from the caller identity. New users receive a
/// one-time token bonus in the same transaction.
pub struct RegisterUserHandler {
    store: Arc<dyn LedgerStore>,
    tokens: Arc<dyn TokenLedger>,
    registration_bonus: u64,
}

impl RegisterUserHandler {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        tokens: Arc<dyn TokenLedger>,
        registration_bonus: u64,
    ) -> Self {
        Self {
            store,
            tokens,
            registration_bonus,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterUserCommand,
    ) -> Result<RegisterUserResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let outcome = self.register(tx.as_mut(), cmd).await;
        let result = settle(tx, outcome).await?;

        tracing::info!(
            user_id = %result.user.id,
            bonus = result.bonus_minted,
            "user registered"
        );
        Ok(result)
    }

    async fn register(
        &self,
        tx: &mut dyn LedgerTransaction,
        cmd: RegisterUserCommand,
    ) -> Result<RegisterUserResult, MembershipError> {
        let mut records = ClubRecords::new(tx);

        if records.user(&cmd.caller.id).await?.is_some() {
            return Err(MembershipError::AlreadyRegistered(cmd.caller.id));
        }

        let user = User::register(cmd.caller.id, cmd.name, cmd.email)?;
        records.put_user(&user).await?;

        if self.registration_bonus > 0 {
            self.tokens
                .mint(records.transaction(), &user.id, self.registration_bonus)
                .await?;
        }

        Ok(RegisterUserResult {
            user,
            bonus_minted: self.registration_bonus,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{member, TestClub};

    fn command(id: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            caller: member(id),
            name: "Ivy Quill".to_string(),
            email: "ivy@club.test".to_string(),
        }
    }

    #[tokio::test]
    async fn registration_creates_user_and_mints_bonus() {
        let club = TestClub::new();
        let handler = RegisterUserHandler::new(club.store(), club.tokens(), 10_000);

        let result = handler.handle(command("ivy")).await.unwrap();

        assert!(result.user.memberships.is_empty());
        assert_eq!(result.bonus_minted, 10_000);
        assert_eq!(club.user("ivy").await, Some(result.user));
        assert_eq!(club.balance("ivy").await, 10_000);
    }

    #[tokio::test]
    async fn second_registration_is_rejected_and_changes_nothing() {
        let club = TestClub::new();
        let handler = RegisterUserHandler::new(club.store(), club.tokens(), 10_000);
        handler.handle(command("ivy")).await.unwrap();
        let before = club.user("ivy").await;

        let err = handler
            .handle(RegisterUserCommand {
                name: "Someone Else".to_string(),
                ..command("ivy")
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            MembershipError::AlreadyRegistered(member("ivy").id)
        );
        assert_eq!(club.user("ivy").await, before);
        assert_eq!(club.balance("ivy").await, 10_000);
    }

    #[tokio::test]
    async fn blank_profile_fields_are_rejected() {
        let club = TestClub::new();
        let handler = RegisterUserHandler::new(club.store(), club.tokens(), 10_000);

        let err = handler
            .handle(RegisterUserCommand {
                email: "   ".to_string(),
                ..command("ivy")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MembershipError::ValidationFailed { .. }));
        assert_eq!(club.user("ivy").await, None);
        assert_eq!(club.balance("ivy").await, 0);
    }

    #[tokio::test]
    async fn zero_bonus_skips_the_mint() {
        let club = TestClub::new();
        let handler = RegisterUserHandler::new(club.store(), club.tokens(), 0);

        handler.handle(command("ivy")).await.unwrap();

        assert_eq!(club.balance("ivy").await, 0);
    }
}
