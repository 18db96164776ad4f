/*
 * C4 - Index Projector. Derives lightweight index records from full
 * entity pages, tagging each with the page number of the entity page
 * it was projected from (§4.4). Addresses have no projection - the
 * entity already serves as its own index.
 */

use crate::models::{
    BoardIndex, KeyIndex, PostIndex, Response, ThreadIndex, TruststateIndex, VoteIndex,
};

pub struct IndexProjector;

impl IndexProjector {
    pub fn project(entity_pages: &[Response]) -> Response {
        let mut result = Response::default();

        for (page_number, page) in entity_pages.iter().enumerate() {
            result
                .board_indexes
                .extend(page.boards.iter().map(|b| BoardIndex {
                    fingerprint: b.fingerprint.clone(),
                    creation: b.creation,
                    last_update: b.last_update,
                    page_number,
                }));

            result
                .thread_indexes
                .extend(page.threads.iter().map(|t| ThreadIndex {
                    fingerprint: t.fingerprint.clone(),
                    board: t.board.clone(),
                    creation: t.creation,
                    page_number,
                }));

            result
                .post_indexes
                .extend(page.posts.iter().map(|p| PostIndex {
                    fingerprint: p.fingerprint.clone(),
                    board: p.board.clone(),
                    thread: p.thread.clone(),
                    creation: p.creation,
                    page_number,
                }));

            result
                .vote_indexes
                .extend(page.votes.iter().map(|v| VoteIndex {
                    fingerprint: v.fingerprint.clone(),
                    board: v.board.clone(),
                    thread: v.thread.clone(),
                    target: v.target.clone(),
                    creation: v.creation,
                    last_update: v.last_update,
                    page_number,
                }));

            result
                .key_indexes
                .extend(page.keys.iter().map(|k| KeyIndex {
                    fingerprint: k.fingerprint.clone(),
                    creation: k.creation,
                    last_update: k.last_update,
                    page_number,
                }));

            result
                .truststate_indexes
                .extend(page.truststates.iter().map(|t| TruststateIndex {
                    fingerprint: t.fingerprint.clone(),
                    target: t.target.clone(),
                    creation: t.creation,
                    last_update: t.last_update,
                    page_number,
                }));
        }

        result
    }
}
