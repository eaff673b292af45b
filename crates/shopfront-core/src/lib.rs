//! # Shopfront Core
//!
//! Core types shared by every Shopfront crate.
//!
//! - [`errors`]: the application error type and its HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use shopfront_core::AppError;
//! use shopfront_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Product not found"));
//! let hash = hash_password("correct horse battery")?;
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
