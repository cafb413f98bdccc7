//! Role Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation;

/// Role record as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Object id of the role.
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Flags granted to every holder of the role. Wildcards allowed.
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to create a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRole {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl CreateRole {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
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
        validation::flags(&self.permissions, "permissions")
    }
}

/// Request to update a role. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRole {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl UpdateRole {
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
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
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
        if let Some(permissions) = &self.permissions {
            validation::flags(permissions, "permissions")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_reads_mongo_id() {
        let role: Role = serde_json::from_value(serde_json::json!({
            "_id": "5f1b2c3d4e5f60718293a4b5",
            "name": "moderator",
            "permissions": ["ciam.user.*"],
            "createdAt": "2024-05-01T12:00:00Z",
        }))
        .unwrap();

        assert_eq!(role.id, "5f1b2c3d4e5f60718293a4b5");
        assert_eq!(role.description, "");
        assert_eq!(role.permissions, vec!["ciam.user.*".to_string()]);
        assert!(role.created_at.is_some());
    }

    #[test]
    fn test_create_role_validation() {
        assert!(CreateRole::new("admin")
            .permissions(["ciam.*", "ciam.role.get"])
            .validate()
            .is_ok());
        assert_eq!(CreateRole::new("").validate().unwrap_err().field, "name");
        assert_eq!(
            CreateRole::new("admin")
                .permissions(["ciam..role"])
                .validate()
                .unwrap_err()
                .field,
            "permissions"
        );
    }

    #[test]
    fn test_update_role_validation() {
        assert_eq!(
            UpdateRole::new("nope").name("x").validate().unwrap_err().field,
            "id"
        );

        let update = UpdateRole::new("5f1b2c3d4e5f60718293a4b5").permissions(["a.b"]);
        assert!(update.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "id": "5f1b2c3d4e5f60718293a4b5", "permissions": ["a.b"] })
        );
    }
}
