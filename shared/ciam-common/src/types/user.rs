//! User Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation;

/// User record as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Object id of the user.
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Linked Discord account, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_id: Option<String>,
    /// Object ids of the roles held by the user.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Flags granted directly to the user.
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to create a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_id: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl CreateUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = Some(discord_id.into());
        self
    }

    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validation::not_empty(&self.name, "name")?;
        if let Some(discord_id) = &self.discord_id {
            validation::discord_id(discord_id, "discordId")?;
        }
        validation::object_ids(&self.roles, "roles")?;
        validation::flags(&self.permissions, "permissions")
    }
}

/// Request to update a user. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl UpdateUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = Some(discord_id.into());
        self
    }

    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = Some(permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validation::object_id(&self.id, "id")?;
        if let Some(name) = &self.name {
            validation::not_empty(name, "name")?;
        }
        if let Some(discord_id) = &self.discord_id {
            validation::discord_id(discord_id, "discordId")?;
        }
        if let Some(roles) = &self.roles {
            validation::object_ids(roles, "roles")?;
        }
        if let Some(permissions) = &self.permissions {
            validation::flags(permissions, "permissions")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLE_ID: &str = "65a0f1e2d3c4b5a697887766";

    #[test]
    fn test_user_deserializes_camel_case() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "000000000000000000000001",
            "name": "alice",
            "discordId": "80351110224678912",
            "roles": [ROLE_ID],
        }))
        .unwrap();

        assert_eq!(user.discord_id.as_deref(), Some("80351110224678912"));
        assert_eq!(user.roles, vec![ROLE_ID.to_string()]);
        assert!(user.permissions.is_empty());
    }

    #[test]
    fn test_create_user_validation() {
        let ok = CreateUser::new("alice")
            .discord_id("80351110224678912")
            .roles([ROLE_ID])
            .permissions(["ciam.user.get"]);
        assert!(ok.validate().is_ok());

        assert_eq!(CreateUser::new("").validate().unwrap_err().field, "name");
        assert_eq!(
            CreateUser::new("alice").discord_id("abc").validate().unwrap_err().field,
            "discordId"
        );
        assert_eq!(
            CreateUser::new("alice").roles(["admin"]).validate().unwrap_err().field,
            "roles"
        );
        assert_eq!(
            CreateUser::new("alice").permissions([".x"]).validate().unwrap_err().field,
            "permissions"
        );
    }

    #[test]
    fn test_update_user_serializes_only_set_fields() {
        let update = UpdateUser::new("000000000000000000000001").discord_id("42");
        assert!(update.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "id": "000000000000000000000001", "discordId": "42" })
        );
    }
}
