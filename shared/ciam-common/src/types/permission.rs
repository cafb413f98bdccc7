//! Permission Types
//!
//! Permission records and the permission-check request/response contract.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgument, Result};
use crate::validation;

// ============================================================================
// Records
// ============================================================================

/// Permission record as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Strict flag identifying the permission, e.g. `ciam.role.get`.
    pub flag: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Object id of the user that created the permission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to create a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePermission {
    pub flag: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreatePermission {
    pub fn new(flag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Wildcards name groups of permissions and can't be created themselves.
    pub fn validate(&self) -> Result<()> {
        validation::strict_flag(&self.flag, "flag")?;
        validation::not_empty(&self.name, "name")
    }
}

/// Request to update a permission. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePermission {
    pub flag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdatePermission {
    pub fn new(flag: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validation::strict_flag(&self.flag, "flag")?;
        if let Some(name) = &self.name {
            validation::not_empty(name, "name")?;
        }
        Ok(())
    }
}

// ============================================================================
// Permission Check
// ============================================================================

/// How the `id` of a permission check is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckSubjectType {
    /// A user record, addressed by object id.
    User,
    /// A role record, addressed by object id.
    Role,
    /// An external Discord account, addressed by its numeric id.
    DiscordUser,
}

impl CheckSubjectType {
    pub const ALL: [Self; 3] = [Self::User, Self::Role, Self::DiscordUser];

    /// Wire spelling of the subject type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
            Self::DiscordUser => "discordUser",
        }
    }

    /// Validate `id` against the id shape this subject type expects.
    pub fn validate_id(self, id: &str) -> Result<()> {
        match self {
            Self::User | Self::Role => validation::object_id(id, "id"),
            Self::DiscordUser => validation::discord_id(id, "id"),
        }
    }
}

impl fmt::Display for CheckSubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckSubjectType {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self> {
        let names = Self::ALL.map(Self::as_str);
        validation::one_of(s, &names, "subjectType")?;
        Self::ALL
            .into_iter()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| InvalidArgument::new("subjectType", format!("unknown subject '{s}'")))
    }
}

/// Body of `POST /permission/has`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheckRequest {
    pub subject_type: CheckSubjectType,
    /// Object id for users and roles, numeric id for Discord users.
    pub id: String,
    /// Flags that must all be granted. Never empty.
    pub required: Vec<String>,
    /// Temporary grants considered alongside the subject's own permissions.
    #[serde(default)]
    pub additional: Vec<String>,
    /// Ask the service to report which required flags are missing.
    #[serde(default)]
    pub include_missing: bool,
}

impl PermissionCheckRequest {
    pub fn new<I, S>(subject_type: CheckSubjectType, id: impl Into<String>, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject_type,
            id: id.into(),
            required: required.into_iter().map(Into::into).collect(),
            additional: Vec::new(),
            include_missing: false,
        }
    }

    #[must_use]
    pub fn additional<I, S>(mut self, additional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional = additional.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn include_missing(mut self, include_missing: bool) -> Self {
        self.include_missing = include_missing;
        self
    }

    /// Checks run in order: subject id, required flags, additional flags.
    pub fn validate(&self) -> Result<()> {
        self.subject_type.validate_id(&self.id)?;
        validation::not_empty(&self.required, "required")?;
        validation::flags(&self.required, "required")?;
        validation::flags(&self.additional, "additional")
    }
}

/// Answer to a permission check. The service owns the exact shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCheckResult {
    pub allowed: bool,
    /// Only present when `includeMissing` was requested and access was denied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}
