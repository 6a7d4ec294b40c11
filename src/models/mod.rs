//! Data models for the Official Gazette portal.
//!
//! Field names serialize to camelCase to match the portal frontend.

mod archive;
mod filter;
mod institution;
mod journal;
mod text;

pub use archive::*;
pub use filter::*;
pub use institution::*;
pub use journal::*;
pub use text::*;
