//! CIAM Common Library
//!
//! Shared types and input validation used by the CIAM client.

pub mod error;
pub mod types;
pub mod validation;

pub use error::{InvalidArgument, Result};
pub use types::*;
