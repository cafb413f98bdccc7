//! CIAM Client Library
//!
//! Typed client for the CIAM users, roles and permissions service. Inputs are
//! validated locally before a request is sent; responses come back as a
//! [`Lookup`] that tells "found" apart from "absent".
//!
//! ```rust,no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use ciam_client::{CheckSubjectType, CiamClient, ClientConfig};
//!
//! let config = ClientConfig::new("https://ciam.example.com".parse()?, "token");
//! let client = CiamClient::new(config)?;
//!
//! let result = client
//!     .check_permissions(CheckSubjectType::DiscordUser, "123456789", &["ciam.role.get"])
//!     .await?;
//! if let Some(result) = result.into_option() {
//!     println!("allowed: {}", result.allowed);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;

pub mod config;
pub mod error;
pub mod response;
pub mod telemetry;
pub mod transport;

pub use ciam_common::validation;
pub use ciam_common::{
    CheckSubjectType, CreatePermission, CreateRole, CreateUser, InvalidArgument, Pagination,
    Permission, PermissionCheckRequest, PermissionCheckResult, Role, UpdatePermission,
    UpdateRole, UpdateUser, User,
};
pub use client::CiamClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, TransportError};
pub use response::Lookup;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
