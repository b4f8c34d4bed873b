//! Taxonomic abundance transformations.
//!
//! This crate holds the label-normalization and aggregation pipeline:
//!
//! - **label**: rank extraction from hierarchical taxonomy labels
//! - **normalize**: per-file label resolution and deduplication by summation
//! - **replicate**: `_V<digit>` replicate suffix stripping
//! - **merge**: stacking of normalized tables over the union of samples
//! - **power_mean**: generalized mean with missing-value exclusion
//! - **reduce**: per-taxon power-mean reduction of the merged table

pub mod error;
pub mod label;
pub mod merge;
pub mod normalize;
pub mod power_mean;
pub mod reduce;
pub mod replicate;

pub use error::{Result, TransformError};
pub use label::{LabelResolver, resolve};
pub use merge::merge;
pub use normalize::{NormalizeOptions, normalize};
pub use power_mean::{compensated_sum, power_mean, power_mean_of_cells};
pub use reduce::{group_by_taxon, reduce};
pub use replicate::strip_replicate_suffix;
