/*
 * ©AngelaMos | 2025
 */

use std::env;

use tokio::sync::RwLock;
use tracing::info;

use crate::models::EntityKind;
use crate::utils::error::{Result, ResponseGenError};

/// Per-kind page sizes, fetched once at startup. One entry per entity
/// kind plus one per index kind - thirteen totals, all independently
/// tunable because entity pages and index pages carry very different
/// record sizes.
#[derive(Debug, Clone)]
pub struct PageSizes {
    pub boards: usize,
    pub threads: usize,
    pub posts: usize,
    pub votes: usize,
    pub addresses: usize,
    pub keys: usize,
    pub truststates: usize,

    pub board_indexes: usize,
    pub thread_indexes: usize,
    pub post_indexes: usize,
    pub vote_indexes: usize,
    pub key_indexes: usize,
    pub truststate_indexes: usize,
}

impl PageSizes {
    pub fn entity_page_size(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Board => self.boards,
            EntityKind::Thread => self.threads,
            EntityKind::Post => self.posts,
            EntityKind::Vote => self.votes,
            EntityKind::Address => self.addresses,
            EntityKind::Key => self.keys,
            EntityKind::Truststate => self.truststates,
        }
    }

    pub fn index_page_size(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Board => self.board_indexes,
            EntityKind::Thread => self.thread_indexes,
            EntityKind::Post => self.post_indexes,
            EntityKind::Vote => self.vote_indexes,
            EntityKind::Address => self.addresses,
            EntityKind::Key => self.key_indexes,
            EntityKind::Truststate => self.truststate_indexes,
        }
    }
}

/// Node identity and protocol/client version stamped into every
/// outbound envelope (C1).
#[derive(Debug, Clone)]
pub struct NodeIdentity {
    pub node_id: String,
    pub location_type: String,
    pub port: u16,
    pub protocol_major: u16,
    pub protocol_minor: u16,
    pub protocol_extensions: Vec<String>,
    pub client_major: u16,
    pub client_minor: u16,
    pub client_patch: u16,
    pub client_name: String,
}

/// Process-wide configuration loaded from the environment. Mirrors the
/// teacher's `Config::from_env` / `ConfigBuilder` pattern: required
/// vars fail fast, optional vars fall back to documented defaults.
///
/// `last_cache_generation_timestamp` is the one field mutated after
/// startup - it's guarded by its own lock rather than making the whole
/// struct interior-mutable.
#[derive(Debug)]
pub struct Config {
    pub identity: NodeIdentity,
    pub page_sizes: PageSizes,
    pub user_directory: String,
    pub caches_location: String,
    pub post_response_expiry_minutes: i64,
    pub last_cache_generation_timestamp: RwLock<i64>,
}

impl Config {
    /// Load configuration from environment variables with sane defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        info!("loading configuration from environment variables");

        let identity = NodeIdentity {
            node_id: get_required_env("NODE_ID")?,
            location_type: env::var("LOCATION_TYPE").unwrap_or_else(|_| "clearnet".to_string()),
            port: parse_env_var("NODE_PORT", 8090)?,
            protocol_major: parse_env_var("PROTOCOL_MAJOR", 1)?,
            protocol_minor: parse_env_var("PROTOCOL_MINOR", 0)?,
            protocol_extensions: parse_csv_env("PROTOCOL_EXTENSIONS"),
            client_major: parse_env_var("CLIENT_MAJOR", 0)?,
            client_minor: parse_env_var("CLIENT_MINOR", 1)?,
            client_patch: parse_env_var("CLIENT_PATCH", 0)?,
            client_name: env::var("CLIENT_NAME").unwrap_or_else(|_| "cachewire".to_string()),
        };

        let page_sizes = PageSizes {
            boards: parse_env_var("PAGE_SIZE_BOARDS", 20)?,
            threads: parse_env_var("PAGE_SIZE_THREADS", 20)?,
            posts: parse_env_var("PAGE_SIZE_POSTS", 50)?,
            votes: parse_env_var("PAGE_SIZE_VOTES", 100)?,
            addresses: parse_env_var("PAGE_SIZE_ADDRESSES", 50)?,
            keys: parse_env_var("PAGE_SIZE_KEYS", 50)?,
            truststates: parse_env_var("PAGE_SIZE_TRUSTSTATES", 50)?,
            board_indexes: parse_env_var("PAGE_SIZE_BOARD_INDEXES", 40)?,
            thread_indexes: parse_env_var("PAGE_SIZE_THREAD_INDEXES", 40)?,
            post_indexes: parse_env_var("PAGE_SIZE_POST_INDEXES", 100)?,
            vote_indexes: parse_env_var("PAGE_SIZE_VOTE_INDEXES", 200)?,
            key_indexes: parse_env_var("PAGE_SIZE_KEY_INDEXES", 100)?,
            truststate_indexes: parse_env_var("PAGE_SIZE_TRUSTSTATE_INDEXES", 100)?,
        };

        let config = Config {
            identity,
            page_sizes,
            user_directory: env::var("USER_DIRECTORY").unwrap_or_else(|_| ".".to_string()),
            caches_location: env::var("CACHES_LOCATION")
                .unwrap_or_else(|_| "./caches".to_string()),
            post_response_expiry_minutes: parse_env_var("POST_RESPONSE_EXPIRY_MINUTES", 30)?,
            last_cache_generation_timestamp: RwLock::new(parse_env_var(
                "LAST_CACHE_GENERATION_TIMESTAMP",
                0,
            )?),
        };

        config.validate()?;
        config.log_configuration_summary();

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.identity.node_id.is_empty() {
            return Err(ResponseGenError::configuration(
                "NODE_ID is required and cannot be empty",
            ));
        }

        if self.identity.port == 0 {
            return Err(ResponseGenError::configuration("NODE_PORT cannot be 0"));
        }

        if self.user_directory.is_empty() {
            return Err(ResponseGenError::configuration(
                "USER_DIRECTORY cannot be empty",
            ));
        }

        if self.caches_location.is_empty() {
            return Err(ResponseGenError::configuration(
                "CACHES_LOCATION cannot be empty",
            ));
        }

        if self.post_response_expiry_minutes <= 0 {
            return Err(ResponseGenError::configuration(
                "POST_RESPONSE_EXPIRY_MINUTES must be positive",
            ));
        }

        Ok(())
    }

    fn log_configuration_summary(&self) {
        info!("=== configuration summary ===");
        info!(
            "node: {} ({}:{})",
            self.identity.node_id, self.identity.location_type, self.identity.port
        );
        info!(
            "protocol: {}.{} client: {}.{}.{} ({})",
            self.identity.protocol_major,
            self.identity.protocol_minor,
            self.identity.client_major,
            self.identity.client_minor,
            self.identity.client_patch,
            self.identity.client_name
        );
        info!("user directory: {}", self.user_directory);
        info!("caches location: {}", self.caches_location);
        info!(
            "post response expiry: {} minutes",
            self.post_response_expiry_minutes
        );
        info!("==============================");
    }
}

fn get_required_env(key: &str) -> Result<String> {
    env::var(key)
        .map_err(|_| ResponseGenError::configuration(format!("required environment variable {} is not set", key)))
}

fn parse_env_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value.parse().map_err(|e| {
            ResponseGenError::configuration(format!(
                "invalid value for {}: {}. error: {}",
                key, value, e
            ))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_csv_env(key: &str) -> Vec<String> {
    env::var(key)
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Configuration builder for tests and advanced use cases.
pub struct ConfigBuilder {
    identity: NodeIdentity,
    page_sizes: PageSizes,
    user_directory: String,
    caches_location: String,
    post_response_expiry_minutes: i64,
    last_cache_generation_timestamp: i64,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            identity: NodeIdentity {
                node_id: "test-node".to_string(),
                location_type: "clearnet".to_string(),
                port: 8090,
                protocol_major: 1,
                protocol_minor: 0,
                protocol_extensions: Vec::new(),
                client_major: 0,
                client_minor: 1,
                client_patch: 0,
                client_name: "cachewire".to_string(),
            },
            page_sizes: PageSizes {
                boards: 20,
                threads: 20,
                posts: 50,
                votes: 100,
                addresses: 50,
                keys: 50,
                truststates: 50,
                board_indexes: 40,
                thread_indexes: 40,
                post_indexes: 100,
                vote_indexes: 200,
                key_indexes: 100,
                truststate_indexes: 100,
            },
            user_directory: ".".to_string(),
            caches_location: "./caches".to_string(),
            post_response_expiry_minutes: 30,
            last_cache_generation_timestamp: 0,
        }
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caches_location(mut self, path: &str) -> Self {
        self.caches_location = path.to_string();
        self
    }

    pub fn user_directory(mut self, path: &str) -> Self {
        self.user_directory = path.to_string();
        self
    }

    pub fn page_sizes(mut self, page_sizes: PageSizes) -> Self {
        self.page_sizes = page_sizes;
        self
    }

    pub fn build(self) -> Config {
        Config {
            identity: self.identity,
            page_sizes: self.page_sizes,
            user_directory: self.user_directory,
            caches_location: self.caches_location,
            post_response_expiry_minutes: self.post_response_expiry_minutes,
            last_cache_generation_timestamp: RwLock::new(self.last_cache_generation_timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_sane_defaults() {
        let config = ConfigBuilder::new().build();
        assert_eq!(config.identity.node_id, "test-node");
        assert_eq!(config.page_sizes.boards, 20);
    }

    #[test]
    fn builder_overrides_caches_location() {
        let config = ConfigBuilder::new().caches_location("/tmp/whatever").build();
        assert_eq!(config.caches_location, "/tmp/whatever");
    }

    #[test]
    fn page_size_lookup_matches_kind() {
        let config = ConfigBuilder::new().build();
        assert_eq!(
            config.page_sizes.entity_page_size(EntityKind::Vote),
            config.page_sizes.votes
        );
        assert_eq!(
            config.page_sizes.index_page_size(EntityKind::Address),
            config.page_sizes.addresses
        );
    }
}
