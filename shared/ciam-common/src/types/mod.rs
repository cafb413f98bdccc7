//! CIAM Types

pub mod pagination;
pub mod permission;
pub mod role;
pub mod user;

pub use pagination::*;
pub use permission::*;
pub use role::*;
pub use user::*;
