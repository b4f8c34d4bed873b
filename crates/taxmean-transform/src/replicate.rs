//! Replicate suffix handling for sample names.

use std::sync::LazyLock;

use regex::Regex;

static REPLICATE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_V\d").expect("Invalid replicate marker regex"));

/// Cuts a sample name at its first `_V<digit>` replicate marker.
///
/// `SampleA_V1` and `SampleA_V2_rerun` both become `SampleA`; names without
/// a marker are returned unchanged.
pub fn strip_replicate_suffix(name: &str) -> &str {
    match REPLICATE_MARKER.find(name) {
        Some(marker) => &name[..marker.start()],
        None => name,
    }
}
