/*
 * Models module aggregator organizing the data structures the response
 * generator moves between persistence, pagination, and the filesystem.
 * I'm keeping the wire shapes (entities, indexes, envelope) separate from
 * the purely-internal ones (filter set, cache response) so it's obvious at
 * a glance which structs are compatibility-critical.
 */

pub mod cache;
pub mod entities;
pub mod envelope;
pub mod filters;
pub mod response;

pub use cache::CacheResponse;
pub use entities::{
    Address, Board, BoardIndex, EntityKind, Fingerprint, Key, KeyIndex, Post, PostIndex,
    Thread, ThreadIndex, Truststate, TruststateIndex, Vote, VoteIndex,
};
pub use envelope::{
    ApiResponse, Caching, ClientVersion, Endpoint, NodeAddress, Pagination, ProtocolVersion,
    RequestFilter, ResultCache,
};
pub use filters::FilterSet;
pub use response::{PlaceInResponse, Response};
