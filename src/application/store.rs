//! Single source of truth for what the client renders.
//!
//! `all_posts` is replaced wholesale on every successful list fetch and
//! `current_post` tracks the post behind the visible detail view. Selection
//! requests are stamped with a monotonically increasing generation so that a
//! slow detail fetch can never overwrite a newer one.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use postboard_api_types::{Post, PostId};

use crate::util::lock::{rw_read, rw_write};

const SOURCE: &str = "application::store";

/// Generation stamp handed out for each detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionTicket(u64);

impl SelectionTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct PostStore {
    all_posts: RwLock<Vec<Post>>,
    current_post: RwLock<Option<Post>>,
    selection_generation: AtomicU64,
    initial_load_done: AtomicBool,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_posts(&self, posts: Vec<Post>) {
        *rw_write(&self.all_posts, SOURCE, "set_posts") = posts;
    }

    pub fn posts(&self) -> Vec<Post> {
        rw_read(&self.all_posts, SOURCE, "posts").clone()
    }

    pub fn set_current_post(&self, post: Post) {
        *rw_write(&self.current_post, SOURCE, "set_current_post") = Some(post);
    }

    pub fn current_post(&self) -> Option<Post> {
        rw_read(&self.current_post, SOURCE, "current_post").clone()
    }

    /// Forget the current post if it is the one identified by `id`.
    pub fn clear_current_post_if(&self, id: &PostId) -> bool {
        let mut current = rw_write(&self.current_post, SOURCE, "clear_current_post_if");
        if current.as_ref().is_some_and(|post| &post.id == id) {
            *current = None;
            return true;
        }
        false
    }

    /// Issue a new ticket; every ticket issued earlier becomes stale.
    pub fn begin_selection(&self) -> SelectionTicket {
        SelectionTicket(self.selection_generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: SelectionTicket) -> bool {
        self.selection_generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns `true` exactly once: on the first successful list load.
    pub fn mark_initial_load(&self) -> bool {
        !self.initial_load_done.swap(true, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64) -> Post {
        Post {
            id: PostId::Number(id),
            title: format!("Post {id}"),
            content: "body".into(),
            author: "author".into(),
            image: None,
        }
    }

    #[test]
    fn set_posts_replaces_the_whole_list() {
        let store = PostStore::new();
        store.set_posts(vec![post(1), post(2)]);
        store.set_posts(vec![post(3)]);
        assert_eq!(store.posts(), vec![post(3)]);
    }

    #[test]
    fn only_the_latest_ticket_is_current() {
        let store = PostStore::new();
        let first = store.begin_selection();
        assert!(store.is_latest(first));

        let second = store.begin_selection();
        assert!(!store.is_latest(first));
        assert!(store.is_latest(second));
        assert!(second > first);
    }

    #[test]
    fn initial_load_is_reported_once() {
        let store = PostStore::new();
        assert!(store.mark_initial_load());
        assert!(!store.mark_initial_load());
    }

    #[test]
    fn clearing_current_post_requires_matching_id() {
        let store = PostStore::new();
        store.set_current_post(post(7));

        assert!(!store.clear_current_post_if(&PostId::Number(8)));
        assert_eq!(store.current_post(), Some(post(7)));

        assert!(store.clear_current_post_if(&PostId::Number(7)));
        assert_eq!(store.current_post(), None);
    }
}
