//! Permission API

use tracing::debug;

use ciam_common::{
    validation, CheckSubjectType, CreatePermission, Pagination, Permission,
    PermissionCheckRequest, PermissionCheckResult, UpdatePermission,
};

use super::to_body;
use crate::client::CiamClient;
use crate::error::ClientResult;
use crate::response::Lookup;
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> CiamClient<T> {
    /// Fetch a permission by its flag.
    pub async fn get_permission(&self, flag: &str) -> ClientResult<Lookup<Permission>> {
        validation::strict_flag(flag, "flag")?;

        debug!("Fetching permission {}", flag);
        self.execute(ApiRequest::get(format!("/permission/{flag}")))
            .await
    }

    /// Flags granted to the user the configured token belongs to.
    pub async fn my_permissions(&self) -> ClientResult<Lookup<Vec<String>>> {
        debug!("Fetching own permissions");
        self.execute(ApiRequest::get("/permission/me")).await
    }

    /// Fetch one page of permissions.
    pub async fn list_permissions(
        &self,
        page: Pagination,
    ) -> ClientResult<Lookup<Vec<Permission>>> {
        page.validate()?;

        debug!(skip = page.skip, limit = page.limit, "Listing permissions");
        self.execute(ApiRequest::get("/permission/list").query(page.to_query()))
            .await
    }

    /// Create a permission and return the stored record.
    pub async fn create_permission(
        &self,
        request: &CreatePermission,
    ) -> ClientResult<Lookup<Permission>> {
        request.validate()?;

        debug!("Creating permission {}", request.flag);
        self.execute(ApiRequest::post("/permission/create", to_body(request)?))
            .await
    }

    /// Update a permission and return the stored record.
    pub async fn update_permission(
        &self,
        request: &UpdatePermission,
    ) -> ClientResult<Lookup<Permission>> {
        request.validate()?;

        debug!("Updating permission {}", request.flag);
        self.execute(ApiRequest::post("/permission/update", to_body(request)?))
            .await
    }

    /// Delete a permission and return the removed record.
    pub async fn delete_permission(&self, flag: &str) -> ClientResult<Lookup<Permission>> {
        validation::strict_flag(flag, "flag")?;

        debug!("Deleting permission {}", flag);
        self.execute(ApiRequest::delete(format!("/permission/{flag}")))
            .await
    }

    /// Ask whether a subject holds every flag in `required`.
    ///
    /// Shorthand for [`check`](Self::check) without temporary grants and
    /// without a missing-flag report.
    pub async fn check_permissions<S: AsRef<str>>(
        &self,
        subject_type: CheckSubjectType,
        id: &str,
        required: &[S],
    ) -> ClientResult<Lookup<PermissionCheckResult>> {
        let required = required.iter().map(|flag| flag.as_ref().to_owned());
        let request = PermissionCheckRequest::new(subject_type, id, required);
        self.check(&request).await
    }

    /// Run a permission check. Fails before sending if the subject id does not
    /// match `subject_type`, `required` is empty, or any flag is malformed.
    pub async fn check(
        &self,
        request: &PermissionCheckRequest,
    ) -> ClientResult<Lookup<PermissionCheckResult>> {
        request.validate()?;

        debug!(
            subject_type = %request.subject_type,
            id = %request.id,
            required = request.required.len(),
            additional = request.additional.len(),
            "Checking permissions"
        );
        self.execute(ApiRequest::post("/permission/has", to_body(request)?))
            .await
    }
}
