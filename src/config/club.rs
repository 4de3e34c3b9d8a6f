//! Club configuration: bootstrap identity, bonus and calendar tunables.

use serde::Deserialize;

use crate::domain::foundation::UserId;
use crate::domain::membership::{
    ProrationPolicy, RefundPolicy, DEFAULT_CANCELLATION_GRACE_DAYS, DEFAULT_HOURS_PER_MONTH,
    DEFAULT_UPGRADE_GRACE_HOURS,
};

use super::error::ValidationError;

/// Club rules configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClubConfig {
    /// Only this identity may initialize the club. Unset: first caller wins.
    #[serde(default)]
    pub owner_bootstrap_id: Option<String>,

    /// Tokens minted to every newly registered user
    #[serde(default = "default_registration_bonus")]
    pub registration_bonus: u64,

    /// Months added to "now" before picking a refund bucket
    #[serde(default)]
    pub refund_clock_offset_months: u32,

    /// Memberships ending within this many hours cannot be upgraded
    #[serde(default = "default_upgrade_grace_hours")]
    pub upgrade_grace_hours: i64,

    /// Days of grace after each month boundary when bucketing refunds
    #[serde(default = "default_cancellation_grace_days")]
    pub cancellation_grace_days: i64,

    /// Hours per month when prorating upgrades
    #[serde(default = "default_hours_per_month")]
    pub hours_per_month: i64,
}

impl ClubConfig {
    /// The configured bootstrap identity, if any.
    pub fn bootstrap_id(&self) -> Result<Option<UserId>, ValidationError> {
        match self.owner_bootstrap_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(id) => UserId::new(id)
                .map(Some)
                .map_err(|_| ValidationError::InvalidBootstrapId),
        }
    }

    pub fn proration_policy(&self) -> ProrationPolicy {
        ProrationPolicy {
            grace_hours: self.upgrade_grace_hours,
            hours_per_month: self.hours_per_month,
        }
    }

    pub fn refund_policy(&self) -> RefundPolicy {
        RefundPolicy {
            grace_days: self.cancellation_grace_days,
            clock_offset_months: self.refund_clock_offset_months,
        }
    }

    /// Validate club configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bootstrap_id()?;
        check_range("upgrade_grace_hours", self.upgrade_grace_hours, 0, 24 * 31)?;
        check_range("cancellation_grace_days", self.cancellation_grace_days, 0, 27)?;
        check_range("hours_per_month", self.hours_per_month, 672, 744)?;
        check_range(
            "refund_clock_offset_months",
            i64::from(self.refund_clock_offset_months),
            0,
            12,
        )?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, min, max })
    }
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            owner_bootstrap_id: None,
            registration_bonus: default_registration_bonus(),
            refund_clock_offset_months: 0,
            upgrade_grace_hours: default_upgrade_grace_hours(),
            cancellation_grace_days: default_cancellation_grace_days(),
            hours_per_month: default_hours_per_month(),
        }
    }
}

fn default_registration_bonus() -> u64 {
    10_000
}

fn default_upgrade_grace_hours() -> i64 {
    DEFAULT_UPGRADE_GRACE_HOURS
}

fn default_cancellation_grace_days() -> i64 {
    DEFAULT_CANCELLATION_GRACE_DAYS
}

fn default_hours_per_month() -> i64 {
    DEFAULT_HOURS_PER_MONTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_policies() {
        let config = ClubConfig::default();
        assert_eq!(config.registration_bonus, 10_000);
        assert_eq!(config.proration_policy(), ProrationPolicy::default());
        assert_eq!(config.refund_policy(), RefundPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_bootstrap_id_means_first_caller() {
        let config = ClubConfig {
            owner_bootstrap_id: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.bootstrap_id().unwrap(), None);

        let config = ClubConfig {
            owner_bootstrap_id: Some("founder".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.bootstrap_id().unwrap(),
            Some(UserId::new("founder").unwrap())
        );
    }

    #[test]
    fn refund_offset_is_carried_into_policy() {
        let config = ClubConfig {
            refund_clock_offset_months: 3,
            ..Default::default()
        };
        assert_eq!(config.refund_policy().clock_offset_months, 3);
    }

    #[test]
    fn out_of_range_tunables_are_rejected() {
        let config = ClubConfig {
            hours_per_month: 100,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::OutOfRange {
                field: "hours_per_month",
                min: 672,
                max: 744
            })
        );

        let config = ClubConfig {
            cancellation_grace_days: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
