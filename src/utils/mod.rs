/*
 * Utility module aggregator.
 */

pub mod config;
pub mod error;

pub use config::{Config, ConfigBuilder, NodeIdentity, PageSizes};
pub use error::{ErrorSeverity, ResponseGenError, Result};

/// Current Unix timestamp in seconds, used throughout C5/C6 for
/// stamping envelopes and computing cache-folder expiries.
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_now_is_plausible() {
        // Anything roughly since 2020 is fine as a sanity bound.
        assert!(unix_now() > 1_577_836_800);
    }
}
