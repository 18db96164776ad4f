/*
 * In-memory double for `Persistence`, used by the service unit tests and
 * available to integration tests that need a filesystem-free fixture.
 */

use async_trait::async_trait;

use crate::models::{
    Address, Board, EntityKind, Fingerprint, Key, PlaceInResponse, Post, Response, Thread,
    Truststate, Vote,
};
use crate::utils::Result;

use super::Persistence;

/// Holds one seeded `Vec<T>` per entity kind. Tests build it with
/// `InMemoryPersistence::new()` then push fixture data in directly -
/// there's no mutation path once it's handed out as `&dyn Persistence`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPersistence {
    pub boards: Vec<Board>,
    pub threads: Vec<Thread>,
    pub posts: Vec<Post>,
    pub votes: Vec<Vote>,
    pub addresses: Vec<Address>,
    pub keys: Vec<Key>,
    pub truststates: Vec<Truststate>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_fingerprint(fp: &Fingerprint, wanted: &[Fingerprint]) -> bool {
    wanted.is_empty() || wanted.contains(fp)
}

fn in_time_range(creation: i64, time_start: i64, time_end: i64) -> bool {
    if time_start <= 0 && time_end <= 0 {
        return true;
    }
    creation >= time_start && (time_end <= 0 || creation <= time_end)
}

macro_rules! filtered_slice {
    ($self:expr, $field:ident, $fingerprints:expr, $time_start:expr, $time_end:expr) => {
        $self
            .$field
            .iter()
            .filter(|item| {
                matches_fingerprint(&item.fingerprint, $fingerprints)
                    && in_time_range(item.creation, $time_start, $time_end)
            })
            .cloned()
            .collect::<Vec<_>>()
    };
}

#[async_trait]
impl Persistence for InMemoryPersistence {
    async fn read(
        &self,
        kind: EntityKind,
        fingerprints: &[Fingerprint],
        _embeds: &[String],
        time_start: i64,
        time_end: i64,
    ) -> Result<Response> {
        let response = match kind {
            EntityKind::Board => {
                Board::place(filtered_slice!(self, boards, fingerprints, time_start, time_end))
            }
            EntityKind::Thread => Thread::place(filtered_slice!(
                self, threads, fingerprints, time_start, time_end
            )),
            EntityKind::Post => {
                Post::place(filtered_slice!(self, posts, fingerprints, time_start, time_end))
            }
            EntityKind::Vote => {
                Vote::place(filtered_slice!(self, votes, fingerprints, time_start, time_end))
            }
            EntityKind::Key => {
                Key::place(filtered_slice!(self, keys, fingerprints, time_start, time_end))
            }
            EntityKind::Truststate => Truststate::place(filtered_slice!(
                self,
                truststates,
                fingerprints,
                time_start,
                time_end
            )),
            EntityKind::Address => Response::default(),
        };
        Ok(response)
    }

    async fn read_addresses(
        &self,
        location: &str,
        sublocation: &str,
        port: u16,
        time_start: i64,
        time_end: i64,
        _a: i64,
        _b: i64,
        _c: i64,
    ) -> Result<Vec<Address>> {
        Ok(self
            .addresses
            .iter()
            .filter(|addr| {
                (location.is_empty() || addr.location == location)
                    && (sublocation.is_empty() || addr.sub_location == sublocation)
                    && (port == 0 || addr.port == port)
                    && in_time_range(addr.last_online, time_start, time_end)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fp: &str, creation: i64) -> Board {
        Board {
            fingerprint: fp.into(),
            creation,
            last_update: creation,
            name: Some(fp.to_string()),
        }
    }

    #[tokio::test]
    async fn read_filters_by_fingerprint() {
        let mut persistence = InMemoryPersistence::new();
        persistence.boards.push(board("a", 100));
        persistence.boards.push(board("b", 100));

        let response = persistence
            .read(EntityKind::Board, &[Fingerprint::from("a")], &[], 0, 0)
            .await
            .unwrap();

        assert_eq!(response.boards.len(), 1);
        assert_eq!(response.boards[0].fingerprint, Fingerprint::from("a"));
    }

    #[tokio::test]
    async fn read_filters_by_time_range() {
        let mut persistence = InMemoryPersistence::new();
        persistence.boards.push(board("old", 10));
        persistence.boards.push(board("new", 200));

        let response = persistence
            .read(EntityKind::Board, &[], &[], 100, 300)
            .await
            .unwrap();

        assert_eq!(response.boards.len(), 1);
        assert_eq!(response.boards[0].fingerprint, Fingerprint::from("new"));
    }

    #[tokio::test]
    async fn read_addresses_has_no_entity_form() {
        let persistence = InMemoryPersistence::new();
        let response = persistence
            .read(EntityKind::Address, &[], &[], 0, 0)
            .await
            .unwrap();
        assert!(response.is_fully_empty());
    }
}
