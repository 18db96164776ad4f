/*
 * The intermediate bundle the orchestrator builds in memory and hands to
 * the artifact writer - never serialized, never persisted as-is (§3).
 */

use super::response::Response;

#[derive(Debug, Clone)]
pub struct CacheResponse {
    pub cache_name: String,
    pub start: i64,
    pub end: i64,
    pub entity_pages: Vec<Response>,
    pub index_pages: Vec<Response>,
}
