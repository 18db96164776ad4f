/*
 * C3 - Paginator. Splits a heterogeneous result set into fixed-size
 * pages per kind, each page carrying only one kind's slice.
 *
 * The source carries fourteen near-identical loops, one per entity and
 * index kind. Here a single generic routine (`paginate_slice`) handles
 * the splitting logic once; `PlaceInResponse` (see `models::response`)
 * is the "table" that tells the routine how to put a kind's page back
 * into a fresh `Response`.
 */

use crate::models::{PlaceInResponse, Response};
use crate::utils::PageSizes;

pub struct Paginator;

impl Paginator {
    pub fn paginate_entities(response: Response, page_sizes: &PageSizes) -> Vec<Response> {
        if !response.boards.is_empty() {
            return paginate_slice(response.boards, page_sizes.boards);
        }
        if !response.threads.is_empty() {
            return paginate_slice(response.threads, page_sizes.threads);
        }
        if !response.posts.is_empty() {
            return paginate_slice(response.posts, page_sizes.posts);
        }
        if !response.votes.is_empty() {
            return paginate_slice(response.votes, page_sizes.votes);
        }
        if !response.addresses.is_empty() {
            return paginate_slice(response.addresses, page_sizes.addresses);
        }
        if !response.keys.is_empty() {
            return paginate_slice(response.keys, page_sizes.keys);
        }
        if !response.truststates.is_empty() {
            return paginate_slice(response.truststates, page_sizes.truststates);
        }

        vec![Response::default()]
    }

    pub fn paginate_indexes(response: Response, page_sizes: &PageSizes) -> Vec<Response> {
        if !response.board_indexes.is_empty() {
            return paginate_slice(response.board_indexes, page_sizes.board_indexes);
        }
        if !response.thread_indexes.is_empty() {
            return paginate_slice(response.thread_indexes, page_sizes.thread_indexes);
        }
        if !response.post_indexes.is_empty() {
            return paginate_slice(response.post_indexes, page_sizes.post_indexes);
        }
        if !response.vote_indexes.is_empty() {
            return paginate_slice(response.vote_indexes, page_sizes.vote_indexes);
        }
        if !response.key_indexes.is_empty() {
            return paginate_slice(response.key_indexes, page_sizes.key_indexes);
        }
        if !response.truststate_indexes.is_empty() {
            return paginate_slice(response.truststate_indexes, page_sizes.truststate_indexes);
        }

        vec![Response::default()]
    }
}

/// Split one kind's slice into fixed-size pages, preserving the
/// source's trailing-empty-page quirk: when `n` is an exact multiple
/// of `page_size` (including `n == 0`), the last page is empty.
fn paginate_slice<T: PlaceInResponse + Clone>(items: Vec<T>, page_size: usize) -> Vec<Response> {
    let page_size = page_size.max(1);
    let total = items.len();
    let page_count = total / page_size + 1;

    (0..page_count)
        .map(|i| {
            let start = i * page_size;
            let end = (start + page_size).min(total);
            let slice = if start < total {
                items[start..end].to_vec()
            } else {
                Vec::new()
            };
            T::place(slice)
        })
        .collect()
}
