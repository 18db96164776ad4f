/*
 * The outer wire envelope (`ApiResponse`) and its nested structures - the
 * parts of the document every peer parses directly off disk or off the
 * wire. Field names and 0-indexed pagination here are compatibility
 * critical; see §3 and §6 of the spec.
 */

use serde::{Deserialize, Serialize};

use super::entities::EntityKind;
use super::response::Response;

/// `ApiResponse.Endpoint` is a free-form tag rather than a closed set in the
/// source - `"<kind>_post"` is constructed per entity kind - so this is a
/// thin newtype with constructors for the fixed tags instead of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(pub String);

impl Endpoint {
    pub fn node() -> Self {
        Self("node".to_string())
    }

    pub fn singular_post_response() -> Self {
        Self("singular_post_response".to_string())
    }

    pub fn multipart_post_response() -> Self {
        Self("multipart_post_response".to_string())
    }

    pub fn entity() -> Self {
        Self("entity".to_string())
    }

    pub fn entity_index() -> Self {
        Self("entity_index".to_string())
    }

    pub fn kind_post(kind: EntityKind) -> Self {
        Self(format!("{}_post", kind.as_plural_str()))
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pagination {
    /// Highest page number in POST responses (`count - 1`); total page
    /// count in cache responses. The inconsistency is preserved verbatim
    /// from the source - see §9 / DESIGN.md.
    pub pages: i64,
    pub current_page: i64,
}

impl Pagination {
    pub fn zero() -> Self {
        Self {
            pages: 0,
            current_page: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultCache {
    pub response_url: String,
    #[serde(default)]
    pub starts_from: i64,
    #[serde(default)]
    pub ends_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Caching {
    pub served_from_cache: bool,
    pub current_cache_url: String,
    pub cache_scope: String,
}

impl Default for Caching {
    fn default() -> Self {
        Self {
            served_from_cache: false,
            current_cache_url: String::new(),
            cache_scope: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProtocolVersion {
    pub major: u16,
    pub minor: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeAddress {
    pub location_type: String,
    pub port: u16,
    pub protocol: ProtocolVersion,
    pub client: ClientVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestFilter {
    #[serde(rename = "Type")]
    pub type_: String,
    pub values: Vec<String>,
}

/// The outer wire document every peer parses directly off disk or off the
/// wire (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApiResponse {
    pub node_id: String,
    pub address: NodeAddress,
    pub entity: String,
    pub endpoint: Endpoint,
    pub timestamp: i64,
    pub pagination: Pagination,
    pub response_body: Response,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ResultCache>,
    pub caching: Caching,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<RequestFilter>,
}

impl Default for ApiResponse {
    fn default() -> Self {
        Self {
            node_id: String::new(),
            address: NodeAddress {
                location_type: String::new(),
                port: 0,
                protocol: ProtocolVersion {
                    major: 0,
                    minor: 0,
                    extensions: Vec::new(),
                },
                client: ClientVersion {
                    major: 0,
                    minor: 0,
                    patch: 0,
                    name: String::new(),
                },
            },
            entity: String::new(),
            endpoint: Endpoint("".to_string()),
            timestamp: 0,
            pagination: Pagination::zero(),
            response_body: Response::default(),
            results: Vec::new(),
            caching: Caching::default(),
            filters: Vec::new(),
        }
    }
}
