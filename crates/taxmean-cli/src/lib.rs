//! CLI library components for taxmean.

pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
