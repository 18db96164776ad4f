/*
 * Boundary trait toward the persistence layer. The layer itself - the
 * database, its schema, and the entities' fingerprinting algorithm -
 * is an external collaborator and out of scope here; this module only
 * carries the seam the response generator calls through, plus an
 * in-memory fake for tests.
 */

pub mod fake;

use async_trait::async_trait;

use crate::models::{Address, EntityKind, Fingerprint, Response};
use crate::utils::Result;

#[async_trait]
pub trait Persistence: Send + Sync {
    async fn read(
        &self,
        kind: EntityKind,
        fingerprints: &[Fingerprint],
        embeds: &[String],
        time_start: i64,
        time_end: i64,
    ) -> Result<Response>;

    async fn read_addresses(
        &self,
        location: &str,
        sublocation: &str,
        port: u16,
        time_start: i64,
        time_end: i64,
        a: i64,
        b: i64,
        c: i64,
    ) -> Result<Vec<Address>>;
}
