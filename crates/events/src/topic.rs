//! Notification topics clients can subscribe to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown topic name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown notification topic '{0}'")]
pub struct UnknownTopic(pub String);

/// One notification stream per entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Project,
    Template,
    Account,
    AccountProject,
    Media,
    Tag,
    Collaborator,
    Link,
    Request,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Topic::Project,
        Topic::Template,
        Topic::Account,
        Topic::AccountProject,
        Topic::Media,
        Topic::Tag,
        Topic::Collaborator,
        Topic::Link,
        Topic::Request,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Project => "project",
            Topic::Template => "template",
            Topic::Account => "account",
            Topic::AccountProject => "account-project",
            Topic::Media => "media",
            Topic::Tag => "tag",
            Topic::Collaborator => "collaborator",
            Topic::Link => "link",
            Topic::Request => "request",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}
