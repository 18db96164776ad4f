/*
 * C6 - Cache Orchestrator. Composes C2-C5 into the two top-level flows
 * a caller actually invokes: a synchronous POST reply and the
 * periodic daily cache sweep.
 */

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::models::{CacheResponse, EntityKind, Fingerprint, PlaceInResponse, RequestFilter, Response};
use crate::persistence::Persistence;
use crate::services::artifact_writer::ArtifactWriter;
use crate::services::envelope_builder::EnvelopeBuilder;
use crate::services::filter_parser::FilterParser;
use crate::services::paginator::Paginator;
use crate::utils::{unix_now, Config, ResponseGenError, Result};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub struct CacheOrchestrator {
    config: Arc<Config>,
    persistence: Arc<dyn Persistence>,
    envelope_builder: EnvelopeBuilder,
}

impl CacheOrchestrator {
    pub fn new(config: Arc<Config>, persistence: Arc<dyn Persistence>) -> Self {
        let envelope_builder = EnvelopeBuilder::new(config.clone());
        Self {
            config,
            persistence,
            envelope_builder,
        }
    }

    /// Addresses are queryable only by time window - they have no
    /// fingerprint filter and go through `read_addresses` instead of
    /// `read` (§4.6). Every other kind goes through the generic path.
    async fn read_for_kind(
        &self,
        kind: EntityKind,
        fingerprints: &[Fingerprint],
        embeds: &[String],
        time_start: i64,
        time_end: i64,
    ) -> Result<Response> {
        if matches!(kind, EntityKind::Address) {
            let addresses = self
                .persistence
                .read_addresses("", "", 0, time_start, time_end, 0, 0, 0)
                .await
                .map_err(|e| ResponseGenError::persistence("read_addresses", e))?;
            return Ok(crate::models::Address::place(addresses));
        }

        self.persistence
            .read(kind, fingerprints, embeds, time_start, time_end)
            .await
            .map_err(|e| ResponseGenError::persistence(format!("read({:?})", kind), e))
    }

    /// Serve a single POST request for `kind`, returning the
    /// serialized JSON body a transport would write back to the peer.
    pub async fn generate_post_response(
        &self,
        kind: EntityKind,
        request_filters: &[RequestFilter],
    ) -> Result<Vec<u8>> {
        let filter_set = FilterParser::parse(request_filters);

        let response = self
            .read_for_kind(kind, &filter_set.fingerprints, &filter_set.embeds, filter_set.time_start, filter_set.time_end)
            .await?;

        let pages = Paginator::paginate_entities(response, &self.config.page_sizes);
        let wrapped = ArtifactWriter::wrap_pages(pages, &self.envelope_builder);
        let mut envelope =
            ArtifactWriter::bake_post_response(wrapped, &self.config, &self.envelope_builder)
                .await?;

        envelope.entity = kind.as_plural_str().to_string();
        envelope.timestamp = unix_now();

        Ok(serde_json::to_vec(&envelope)?)
    }

    /// `generate_cache_response`, but taking the raw `kind` tag a peer
    /// request carries (e.g. `"boards"`) instead of a typed
    /// `EntityKind`. The only place this crate's closed `EntityKind`
    /// enum actually meets untrusted input - an unrecognized tag
    /// produces `ResponseGenError::UnknownKind` (§7.4).
    pub async fn generate_cache_response_by_tag(
        &self,
        kind_tag: &str,
        start: i64,
        end: i64,
    ) -> Result<CacheResponse> {
        let kind = EntityKind::from_plural_str(kind_tag)
            .ok_or_else(|| ResponseGenError::UnknownKind(kind_tag.to_string()))?;
        self.generate_cache_response(kind, start, end).await
    }

    /// Build entity (and, for non-address kinds, index) pages for a
    /// `[start, end)` window without touching the filesystem.
    pub async fn generate_cache_response(
        &self,
        kind: EntityKind,
        start: i64,
        end: i64,
    ) -> Result<CacheResponse> {
        let response = self.read_for_kind(kind, &[], &[], start, end).await?;

        let entity_pages = Paginator::paginate_entities(response, &self.config.page_sizes);

        let index_pages = if matches!(kind, EntityKind::Address) {
            Vec::new()
        } else {
            let projected = crate::services::index_projector::IndexProjector::project(&entity_pages);
            Paginator::paginate_indexes(projected, &self.config.page_sizes)
        };

        let cache_name = format!("cache_{}", crate::services::artifact_writer::generate_hash()?);

        Ok(CacheResponse {
            cache_name,
            start,
            end,
            entity_pages,
            index_pages,
        })
    }

    /// Build and persist a cache for `[start, end)`, then update the
    /// per-kind catalog.
    pub async fn create_cache(&self, kind: EntityKind, start: i64, end: i64) -> Result<()> {
        let cache_data = self.generate_cache_response(kind, start, end).await?;

        let kind_dir = PathBuf::from(&self.config.caches_location).join(kind.as_plural_str());
        tokio::fs::create_dir_all(&kind_dir)
            .await
            .map_err(|e| ResponseGenError::filesystem(&kind_dir, e))?;

        ArtifactWriter::write_cache(&kind_dir, &cache_data, kind, &self.envelope_builder).await?;
        ArtifactWriter::update_kind_index(&kind_dir, &cache_data, &self.envelope_builder).await?;

        Ok(())
    }

    /// Periodic driver: if more than a day has elapsed since the last
    /// sweep, build a fresh cache window for every entity kind. A
    /// per-kind failure is logged and does not stop the others; the
    /// timestamp advances unconditionally.
    pub async fn generate_caches(&self) {
        let now = unix_now();
        let last = *self.config.last_cache_generation_timestamp.read().await;

        if now - last <= SECONDS_PER_DAY {
            return;
        }

        for kind in EntityKind::ALL {
            if let Err(e) = self.create_cache(kind, last, now).await {
                e.log_error(Some(&format!("generate_caches({:?})", kind)));
                warn!("cache generation failed for {:?}, continuing with remaining kinds", kind);
            }
        }

        *self.config.last_cache_generation_timestamp.write().await = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Board;
    use crate::persistence::fake::InMemoryPersistence;
    use tempfile::tempdir;

    fn orchestrator(caches_location: &str) -> CacheOrchestrator {
        let config = Arc::new(
            crate::utils::ConfigBuilder::new()
                .caches_location(caches_location)
                .build(),
        );
        let mut persistence = InMemoryPersistence::new();
        persistence.boards.push(Board {
            fingerprint: "b1".into(),
            creation: 10,
            last_update: 10,
            name: None,
        });
        CacheOrchestrator::new(config, Arc::new(persistence))
    }

    #[tokio::test]
    async fn generate_post_response_serializes_to_valid_json() {
        let orch = orchestrator("./unused");
        let bytes = orch
            .generate_post_response(EntityKind::Board, &[])
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["Entity"], "boards");
    }

    #[tokio::test]
    async fn create_cache_writes_index_and_catalog() {
        let dir = tempdir().unwrap();
        let orch = orchestrator(dir.path().to_str().unwrap());

        orch.create_cache(EntityKind::Board, 0, 100).await.unwrap();

        let kind_dir = dir.path().join("boards");
        assert!(kind_dir.join("index.json").exists());

        let cache_dirs: Vec<_> = std::fs::read_dir(&kind_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "index.json")
            .collect();
        assert_eq!(cache_dirs.len(), 1);
    }

    #[tokio::test]
    async fn generate_cache_response_for_address_uses_read_addresses() {
        let config = Arc::new(crate::utils::ConfigBuilder::new().build());
        let mut persistence = InMemoryPersistence::new();
        persistence.addresses.push(crate::models::Address {
            location: "1.2.3.4".to_string(),
            sub_location: String::new(),
            port: 8090,
            last_online: 10,
            protocol_major: 1,
            protocol_minor: 0,
        });
        let orch = CacheOrchestrator::new(config, Arc::new(persistence));

        let cache_data = orch
            .generate_cache_response(EntityKind::Address, 0, 100)
            .await
            .unwrap();

        assert_eq!(cache_data.entity_pages.len(), 1);
        assert_eq!(cache_data.entity_pages[0].addresses.len(), 1);
    }

    #[tokio::test]
    async fn generate_cache_response_by_tag_resolves_known_kind() {
        let orch = orchestrator("./unused");
        let cache_data = orch
            .generate_cache_response_by_tag("boards", 0, 100)
            .await
            .unwrap();
        assert_eq!(cache_data.entity_pages[0].boards.len(), 1);
    }

    #[tokio::test]
    async fn generate_cache_response_by_tag_rejects_unknown_kind() {
        let orch = orchestrator("./unused");
        let result = orch.generate_cache_response_by_tag("blorps", 0, 100).await;
        assert!(matches!(result, Err(ResponseGenError::UnknownKind(tag)) if tag == "blorps"));
    }

    #[tokio::test]
    async fn generate_caches_is_noop_within_a_day() {
        let dir = tempdir().unwrap();
        let orch = orchestrator(dir.path().to_str().unwrap());
        *orch.config.last_cache_generation_timestamp.write().await = unix_now();

        orch.generate_caches().await;

        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
