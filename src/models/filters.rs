/*
 * The normalized filter set C2 produces from a peer's raw request filters.
 */

use super::entities::Fingerprint;

/// Normalized output of the filter parser (C2). Internal only - never
/// serialized; `RequestFilter` (in `envelope.rs`) is the wire shape this is
/// parsed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub fingerprints: Vec<Fingerprint>,
    pub embeds: Vec<String>,
    pub time_start: i64,
    pub time_end: i64,
}
