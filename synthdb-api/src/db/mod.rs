//! Database access for the synthdb API
//!
//! One module per entity. The query layer is read-only over the normalized
//! catalog tables; suggestions are written by intake and consumed by the
//! acceptance workflow.

pub mod api_keys;
pub mod manufacturers;
pub mod suggestions;
pub mod synths;
