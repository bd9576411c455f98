//! Account-wide roles and per-project roles.
//!
//! Both are stored as text columns; the string forms below must match the
//! `CHECK` constraints in the accounts migration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_PM: &str = "ROLE_PM";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

pub const PROJECT_ROLE_PM: &str = "PM";
pub const PROJECT_ROLE_EDITOR: &str = "EDITOR";
pub const PROJECT_ROLE_CONTENT_CREATOR: &str = "CONTENT_CREATOR";

/// Account-wide role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_PM")]
    Pm,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Pm => ROLE_PM,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Derive the role from the administrator / PM flags of an account summary.
    ///
    /// Administrator wins over PM.
    pub fn from_flags(is_administrator: bool, is_pm: bool) -> Self {
        if is_administrator {
            Role::Admin
        } else if is_pm {
            Role::Pm
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_PM => Ok(Role::Pm),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Unknown account role '{other}'"
            ))),
        }
    }
}

/// Role an account holds inside a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleInProject {
    #[serde(rename = "PM")]
    Pm,
    #[serde(rename = "EDITOR")]
    Editor,
    #[serde(rename = "CONTENT_CREATOR")]
    ContentCreator,
}

impl RoleInProject {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleInProject::Pm => PROJECT_ROLE_PM,
            RoleInProject::Editor => PROJECT_ROLE_EDITOR,
            RoleInProject::ContentCreator => PROJECT_ROLE_CONTENT_CREATOR,
        }
    }
}

impl fmt::Display for RoleInProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleInProject {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PROJECT_ROLE_PM => Ok(RoleInProject::Pm),
            PROJECT_ROLE_EDITOR => Ok(RoleInProject::Editor),
            PROJECT_ROLE_CONTENT_CREATOR => Ok(RoleInProject::ContentCreator),
            other => Err(CoreError::Validation(format!(
                "Unknown project role '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::User, Role::Pm, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_validation_error() {
        assert_matches!("ROLE_ROOT".parse::<Role>(), Err(CoreError::Validation(_)));
        assert_matches!("pm".parse::<RoleInProject>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn from_flags_prefers_admin() {
        assert_eq!(Role::from_flags(true, true), Role::Admin);
        assert_eq!(Role::from_flags(false, true), Role::Pm);
        assert_eq!(Role::from_flags(false, false), Role::User);
    }

    #[test]
    fn project_role_display_matches_column_value() {
        assert_eq!(RoleInProject::ContentCreator.to_string(), "CONTENT_CREATOR");
        assert_eq!(
            "EDITOR".parse::<RoleInProject>().unwrap(),
            RoleInProject::Editor
        );
    }
}
