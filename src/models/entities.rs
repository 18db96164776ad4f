/*
 * Entity and index shapes exchanged with peers over the wire.
 * I'm carrying just enough of each entity's shape to paginate, project, and
 * serialize it - fingerprint computation and validation belong to the
 * collaborator that produces these values, not to this crate.
 */

use serde::{Deserialize, Serialize};

/// Opaque content-addressed identifier of an entity.
///
/// This crate never inspects a fingerprint's structure - it is treated as an
/// opaque string end to end, same as the source network treats it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The seven first-class content types stored and exchanged by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Board,
    Thread,
    Post,
    Vote,
    Address,
    Key,
    Truststate,
}

impl EntityKind {
    /// Fixed dispatch/priority order used for `generate_caches` and for
    /// dominant-kind detection. Must not be reordered - it's part of the
    /// wire-observable contract (peers notice which kind "wins" ties).
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Board,
        EntityKind::Thread,
        EntityKind::Post,
        EntityKind::Vote,
        EntityKind::Address,
        EntityKind::Key,
        EntityKind::Truststate,
    ];

    /// Lowercase plural tag used in directory names, `kind` request fields,
    /// and `Endpoint` construction (e.g. `"boards"`, `"addresses"`).
    pub fn as_plural_str(&self) -> &'static str {
        match self {
            EntityKind::Board => "boards",
            EntityKind::Thread => "threads",
            EntityKind::Post => "posts",
            EntityKind::Vote => "votes",
            EntityKind::Address => "addresses",
            EntityKind::Key => "keys",
            EntityKind::Truststate => "truststates",
        }
    }

    pub fn from_plural_str(s: &str) -> Option<EntityKind> {
        match s {
            "boards" => Some(EntityKind::Board),
            "threads" => Some(EntityKind::Thread),
            "posts" => Some(EntityKind::Post),
            "votes" => Some(EntityKind::Vote),
            "addresses" => Some(EntityKind::Address),
            "keys" => Some(EntityKind::Key),
            "truststates" => Some(EntityKind::Truststate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Board {
    pub fingerprint: Fingerprint,
    pub creation: i64,
    pub last_update: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Thread {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub creation: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Post {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub thread: Fingerprint,
    pub creation: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vote {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub thread: Fingerprint,
    pub target: Fingerprint,
    pub creation: i64,
    pub last_update: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Key {
    pub fingerprint: Fingerprint,
    pub creation: i64,
    pub last_update: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Truststate {
    pub fingerprint: Fingerprint,
    pub target: Fingerprint,
    pub creation: i64,
    pub last_update: i64,
}

/// An address entity is compact enough to serve as its own index - see §3
/// of the spec: "Address has no distinct index form."
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub location: String,
    pub sub_location: String,
    pub port: u16,
    pub last_online: i64,
    pub protocol_major: u16,
    pub protocol_minor: u16,
}

// -- Index projections (C4 output) -----------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoardIndex {
    pub fingerprint: Fingerprint,
    pub creation: i64,
    pub last_update: i64,
    pub page_number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThreadIndex {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub creation: i64,
    pub page_number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostIndex {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub thread: Fingerprint,
    pub creation: i64,
    pub page_number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoteIndex {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub thread: Fingerprint,
    pub target: Fingerprint,
    pub creation: i64,
    pub last_update: i64,
    pub page_number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyIndex {
    pub fingerprint: Fingerprint,
    pub creation: i64,
    pub last_update: i64,
    pub page_number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TruststateIndex {
    pub fingerprint: Fingerprint,
    pub target: Fingerprint,
    pub creation: i64,
    pub last_update: i64,
    pub page_number: usize,
}
