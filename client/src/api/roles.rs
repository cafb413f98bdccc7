//! Role API

use tracing::debug;

use ciam_common::{validation, CreateRole, Pagination, Role, UpdateRole};

use super::to_body;
use crate::client::CiamClient;
use crate::error::ClientResult;
use crate::response::Lookup;
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> CiamClient<T> {
    /// Fetch a role by object id.
    pub async fn get_role(&self, id: &str) -> ClientResult<Lookup<Role>> {
        validation::object_id(id, "id")?;

        debug!("Fetching role {}", id);
        self.execute(ApiRequest::get(format!("/role/{id}"))).await
    }

    /// Fetch one page of roles.
    pub async fn list_roles(&self, page: Pagination) -> ClientResult<Lookup<Vec<Role>>> {
        page.validate()?;

        debug!(skip = page.skip, limit = page.limit, "Listing roles");
        let roles: Lookup<Vec<Role>> = self
            .execute(ApiRequest::get("/role/list").query(page.to_query()))
            .await?;

        if let Lookup::Found(roles) = &roles {
            debug!("Fetched {} roles", roles.len());
        }
        Ok(roles)
    }

    /// Create a role and return the stored record.
    pub async fn create_role(&self, request: &CreateRole) -> ClientResult<Lookup<Role>> {
        request.validate()?;

        debug!("Creating role '{}'", request.name);
        self.execute(ApiRequest::post("/role/create", to_body(request)?))
            .await
    }

    /// Update a role and return the stored record.
    pub async fn update_role(&self, request: &UpdateRole) -> ClientResult<Lookup<Role>> {
        request.validate()?;

        debug!("Updating role {}", request.id);
        self.execute(ApiRequest::post("/role/update", to_body(request)?))
            .await
    }

    /// Delete a role and return the removed record.
    pub async fn delete_role(&self, id: &str) -> ClientResult<Lookup<Role>> {
        validation::object_id(id, "id")?;

        debug!("Deleting role {}", id);
        self.execute(ApiRequest::delete(format!("/role/{id}"))).await
    }
}
