//! # synthdb Common Library
//!
//! Shared code for the synthdb service:
//! - Error taxonomy (`Error` / `Result`)
//! - Configuration loading and resolution
//! - Database pool initialization and schema creation

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
