/*
 * The internal `Response` bundle and the small trait that lets the
 * paginator collapse fourteen near-identical per-kind loops (the source's
 * approach) into one generic routine, per the redesign note in the spec.
 */

use serde::{Deserialize, Serialize};

use super::entities::{
    Address, Board, BoardIndex, Key, KeyIndex, Post, PostIndex, Thread, ThreadIndex,
    Truststate, TruststateIndex, Vote, VoteIndex,
};

/// A bundle of seven entity slices and six index slices. Any subset may be
/// populated; pagination operates per-slice. `Address` has no index slot -
/// the entity itself already serves as its own index (§3, §4.4).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Response {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub boards: Vec<Board>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub threads: Vec<Thread>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub votes: Vec<Vote>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<Key>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub truststates: Vec<Truststate>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub board_indexes: Vec<BoardIndex>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thread_indexes: Vec<ThreadIndex>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub post_indexes: Vec<PostIndex>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vote_indexes: Vec<VoteIndex>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_indexes: Vec<KeyIndex>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub truststate_indexes: Vec<TruststateIndex>,
}

impl Response {
    /// True when every slice is empty - the "no kind populated" case the
    /// paginator must still turn into a single empty page (§4.3).
    pub fn is_fully_empty(&self) -> bool {
        self.boards.is_empty()
            && self.threads.is_empty()
            && self.posts.is_empty()
            && self.votes.is_empty()
            && self.addresses.is_empty()
            && self.keys.is_empty()
            && self.truststates.is_empty()
            && self.board_indexes.is_empty()
            && self.thread_indexes.is_empty()
            && self.post_indexes.is_empty()
            && self.vote_indexes.is_empty()
            && self.key_indexes.is_empty()
            && self.truststate_indexes.is_empty()
    }
}

/// Implemented once per entity/index kind. Lets `Paginator` run a single
/// generic loop over `Vec<T>` and have each kind know how to place its own
/// page back into a fresh `Response` - the "table" the spec's redesign note
/// asks for, expressed as a trait instead of a literal lookup table.
pub trait PlaceInResponse: Sized {
    fn place(items: Vec<Self>) -> Response;
}

macro_rules! impl_place_in_response {
    ($ty:ty, $field:ident) => {
        impl PlaceInResponse for $ty {
            fn place(items: Vec<Self>) -> Response {
                Response {
                    $field: items,
                    ..Default::default()
                }
            }
        }
    };
}

impl_place_in_response!(Board, boards);
impl_place_in_response!(Thread, threads);
impl_place_in_response!(Post, posts);
impl_place_in_response!(Vote, votes);
impl_place_in_response!(Address, addresses);
impl_place_in_response!(Key, keys);
impl_place_in_response!(Truststate, truststates);
impl_place_in_response!(BoardIndex, board_indexes);
impl_place_in_response!(ThreadIndex, thread_indexes);
impl_place_in_response!(PostIndex, post_indexes);
impl_place_in_response!(VoteIndex, vote_indexes);
impl_place_in_response!(KeyIndex, key_indexes);
impl_place_in_response!(TruststateIndex, truststate_indexes);
