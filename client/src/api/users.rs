//! User API

use tracing::debug;

use ciam_common::{validation, CreateUser, Pagination, UpdateUser, User};

use super::to_body;
use crate::client::CiamClient;
use crate::error::ClientResult;
use crate::response::Lookup;
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> CiamClient<T> {
    /// The user the configured token belongs to.
    pub async fn current_user(&self) -> ClientResult<Lookup<User>> {
        debug!("Fetching current user");
        self.execute(ApiRequest::get("/user")).await
    }

    /// Fetch a user by object id.
    pub async fn get_user(&self, id: &str) -> ClientResult<Lookup<User>> {
        validation::object_id(id, "id")?;

        debug!("Fetching user {}", id);
        self.execute(ApiRequest::get(format!("/user/{id}"))).await
    }

    /// Fetch one page of users.
    pub async fn list_users(&self, page: Pagination) -> ClientResult<Lookup<Vec<User>>> {
        page.validate()?;

        debug!(skip = page.skip, limit = page.limit, "Listing users");
        self.execute(ApiRequest::get("/user/list").query(page.to_query()))
            .await
    }

    /// Whether a user with this object id exists.
    pub async fn is_user_valid(&self, id: &str) -> ClientResult<bool> {
        validation::object_id(id, "id")?;

        debug!("Checking user {}", id);
        self.probe(ApiRequest::get("/user/valid").query([("id".to_string(), id.to_string())]))
            .await
    }

    /// Create a user and return the stored record.
    pub async fn create_user(&self, request: &CreateUser) -> ClientResult<Lookup<User>> {
        request.validate()?;

        debug!("Creating user '{}'", request.name);
        self.execute(ApiRequest::post("/user/create", to_body(request)?))
            .await
    }

    /// Update a user and return the stored record.
    pub async fn update_user(&self, request: &UpdateUser) -> ClientResult<Lookup<User>> {
        request.validate()?;

        debug!("Updating user {}", request.id);
        self.execute(ApiRequest::post("/user/update", to_body(request)?))
            .await
    }

    /// Delete a user and return the removed record.
    pub async fn delete_user(&self, id: &str) -> ClientResult<Lookup<User>> {
        validation::object_id(id, "id")?;

        debug!("Deleting user {}", id);
        self.execute(ApiRequest::delete(format!("/user/{id}"))).await
    }
}
