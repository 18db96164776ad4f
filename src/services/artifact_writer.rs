/*
 * C5 - Artifact Writer. Serializes paginated responses to JSON and
 * persists them under the deterministic directory layout described in
 * §3/§4.5: single-shot POST responses under `statics/responses/`, day
 * caches under `<CachesLocation>/<kind>/`.
 */

use std::path::{Path, PathBuf};

use rand::Rng;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::warn;

use crate::models::{
    ApiResponse, CacheResponse, Caching, Endpoint, EntityKind, Pagination, Response, ResultCache,
};
use crate::services::envelope_builder::EnvelopeBuilder;
use crate::utils::{unix_now, Config, ResponseGenError, Result};

pub struct ArtifactWriter;

impl ArtifactWriter {
    /// Wrap each page in a fresh envelope using the POST-response
    /// pagination convention: `pages = len - 1` (highest page index,
    /// not total count - see §9).
    pub fn wrap_pages(pages: Vec<Response>, envelope_builder: &EnvelopeBuilder) -> Vec<ApiResponse> {
        let highest_index = pages.len().saturating_sub(1) as i64;

        pages
            .into_iter()
            .enumerate()
            .map(|(i, page)| {
                let mut envelope = envelope_builder.new_envelope();
                envelope.response_body = page;
                envelope.pagination = Pagination {
                    pages: highest_index,
                    current_page: i as i64,
                };
                envelope
            })
            .collect()
    }

    /// Fold wrapped pages into the single envelope a peer actually
    /// receives for a POST request: inline for one page, a cache-link
    /// document backed by on-disk files for more than one.
    pub async fn bake_post_response(
        pages: Vec<ApiResponse>,
        config: &Config,
        envelope_builder: &EnvelopeBuilder,
    ) -> Result<ApiResponse> {
        match pages.len() {
            0 => {
                let err = ResponseGenError::ImpossibleState(
                    "bake_post_response called with zero pages".to_string(),
                );
                err.log_error(Some("bake_post_response"));
                Err(err)
            }
            1 => {
                let mut envelope = pages.into_iter().next().unwrap();
                envelope.entity = dominant_kind(&envelope.response_body)
                    .map(|k| k.as_plural_str().to_string())
                    .unwrap_or_default();
                envelope.endpoint = Endpoint::singular_post_response();
                envelope.pagination = Pagination {
                    pages: 0,
                    current_page: 0,
                };
                Ok(envelope)
            }
            total => {
                let expiry =
                    unix_now() + config.post_response_expiry_minutes * 60;
                let hash = generate_hash()?;
                let folder = format!("{}_{}", expiry, hash);
                let folder_dir = PathBuf::from(&config.user_directory)
                    .join("statics")
                    .join("responses")
                    .join(&folder);

                fs::create_dir_all(&folder_dir)
                    .await
                    .map_err(|e| ResponseGenError::filesystem(&folder_dir, e))?;

                let dominant = pages
                    .first()
                    .and_then(|p| dominant_kind(&p.response_body));

                let mut results = Vec::with_capacity(total);
                for (i, mut page) in pages.into_iter().enumerate() {
                    page.pagination = Pagination {
                        pages: total as i64,
                        current_page: i as i64,
                    };
                    page.timestamp = unix_now();
                    page.entity = dominant.map(|k| k.as_plural_str().to_string()).unwrap_or_default();
                    page.endpoint = dominant
                        .map(Endpoint::kind_post)
                        .unwrap_or_else(Endpoint::singular_post_response);

                    let file_path = folder_dir.join(format!("{}.json", i));
                    match write_json_durable(&file_path, &page).await {
                        Ok(()) => {
                            results.push(ResultCache {
                                response_url: format!("{}/{}.json", folder, i),
                                starts_from: 0,
                                ends_at: 0,
                            });
                        }
                        Err(e) => {
                            warn!("skipping page {} of multipart response {}: {}", i, folder, e);
                        }
                    }
                }

                let mut envelope = envelope_builder.new_envelope();
                envelope.entity = dominant.map(|k| k.as_plural_str().to_string()).unwrap_or_default();
                envelope.endpoint = Endpoint::multipart_post_response();
                envelope.results = results;
                Ok(envelope)
            }
        }
    }

    /// Write an entity cache and its projected indexes under
    /// `entity_cache_dir/<cache_name>/`. Addresses have no index form.
    pub async fn write_cache(
        entity_cache_dir: &Path,
        cache_data: &CacheResponse,
        kind: EntityKind,
        envelope_builder: &EnvelopeBuilder,
    ) -> Result<()> {
        let cache_dir = entity_cache_dir.join(&cache_data.cache_name);
        fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| ResponseGenError::filesystem(&cache_dir, e))?;

        if !matches!(kind, EntityKind::Address) {
            let index_dir = cache_dir.join("index");
            fs::create_dir_all(&index_dir)
                .await
                .map_err(|e| ResponseGenError::filesystem(&index_dir, e))?;
        }

        for (i, page) in cache_data.entity_pages.iter().enumerate() {
            let mut envelope = envelope_builder.new_envelope();
            envelope.response_body = page.clone();
            envelope.endpoint = Endpoint::entity();
            envelope.entity = kind.as_plural_str().to_string();
            envelope.timestamp = unix_now();
            envelope.pagination = Pagination {
                pages: cache_data.entity_pages.len() as i64,
                current_page: i as i64,
            };
            envelope.caching = Caching {
                served_from_cache: true,
                current_cache_url: cache_data.cache_name.clone(),
                cache_scope: "day".to_string(),
            };

            let file_path = cache_dir.join(format!("{}.json", i));
            write_json_durable(&file_path, &envelope).await?;
        }

        if matches!(kind, EntityKind::Address) {
            return Ok(());
        }

        let index_dir = cache_dir.join("index");
        for (i, page) in cache_data.index_pages.iter().enumerate() {
            let mut envelope = envelope_builder.new_envelope();
            envelope.response_body = page.clone();
            envelope.endpoint = Endpoint::entity_index();
            envelope.entity = kind.as_plural_str().to_string();
            envelope.timestamp = unix_now();
            envelope.pagination = Pagination {
                pages: cache_data.index_pages.len() as i64,
                current_page: i as i64,
            };
            envelope.caching = Caching {
                served_from_cache: true,
                current_cache_url: cache_data.cache_name.clone(),
                cache_scope: "day".to_string(),
            };

            let file_path = index_dir.join(format!("{}.json", i));
            write_json_durable(&file_path, &envelope).await?;
        }

        Ok(())
    }

    /// Read-modify-rewrite `<kind_dir>/index.json`, appending a
    /// `ResultCache` pointing at the cache just written. A missing
    /// file is not an error - the catalog is created fresh.
    pub async fn update_kind_index(
        kind_dir: &Path,
        cache_data: &CacheResponse,
        envelope_builder: &EnvelopeBuilder,
    ) -> Result<()> {
        let index_path = kind_dir.join("index.json");

        let mut envelope = match fs::read(&index_path).await {
            Ok(bytes) => serde_json::from_slice::<ApiResponse>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => envelope_builder.new_envelope(),
            Err(e) => return Err(ResponseGenError::filesystem(&index_path, e)),
        };

        envelope.results.push(ResultCache {
            response_url: cache_data.cache_name.clone(),
            starts_from: cache_data.start,
            ends_at: cache_data.end,
        });
        envelope.timestamp = unix_now();
        envelope.caching.served_from_cache = true;
        envelope.caching.cache_scope = "day".to_string();

        write_json_durable(&index_path, &envelope).await
    }
}

/// First populated entity slice in priority order; empty string if
/// none populated.
pub fn dominant_kind(response: &Response) -> Option<EntityKind> {
    if !response.boards.is_empty() {
        return Some(EntityKind::Board);
    }
    if !response.threads.is_empty() {
        return Some(EntityKind::Thread);
    }
    if !response.posts.is_empty() {
        return Some(EntityKind::Post);
    }
    if !response.votes.is_empty() {
        return Some(EntityKind::Vote);
    }
    if !response.addresses.is_empty() {
        return Some(EntityKind::Address);
    }
    if !response.keys.is_empty() {
        return Some(EntityKind::Key);
    }
    if !response.truststates.is_empty() {
        return Some(EntityKind::Truststate);
    }
    None
}

/// 32-char content-addressed hash: 16 random characters from
/// `[a-zA-Z]`, SHA-256'd, truncated to its first 16 bytes and
/// hex-encoded. Returns a `Result` to mirror the source's fallible
/// contract even though `rand`'s OS-backed generator is infallible in
/// practice.
pub(crate) fn generate_hash() -> Result<String> {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..16)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect();

    let digest = Sha256::digest(&random_bytes);
    Ok(hex::encode(&digest[..16]))
}

/// Write JSON to a sibling temp path, then rename into place, so a
/// concurrent reader never observes a torn file.
async fn write_json_durable<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");

    fs::write(&tmp_path, &bytes)
        .await
        .map_err(|e| ResponseGenError::filesystem(&tmp_path, e))?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|e| ResponseGenError::filesystem(path, e))?;

    Ok(())
}
