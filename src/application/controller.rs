//! Event handlers tying the page surface to the posts resource.
//!
//! Every handler performs at most one mutating request followed by a
//! deterministic re-render of the affected views. Shared state is only
//! written after a request completes; page and store locks are never held
//! across an `.await`.

use std::sync::{Mutex, MutexGuard};

use metrics::counter;
use postboard_api_types::{Post, PostId};
use tracing::{debug, info, instrument, warn};

use crate::domain::posts::{edit_patch, filter_by_author, validate_new_post};
use crate::infra::telemetry::METRIC_SELECTION_SUPERSEDED;
use crate::presentation::page::Page;
use crate::presentation::views::{DetailPane, ListRow};
use crate::util::lock::mutex_lock;

use super::api::PostsApi;
use super::error::AppError;
use super::store::PostStore;

const SOURCE: &str = "application::controller";

/// Events raised by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A list row was clicked.
    SelectPost(PostId),
    EditClicked,
    DeleteClicked,
    CancelEdit,
    SubmitCreate,
    SubmitEdit,
    SearchInput(String),
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Applied,
    /// A newer selection was issued while this one was in flight.
    Superseded,
}

pub struct BlogClient<A, P> {
    api: A,
    store: PostStore,
    page: Mutex<P>,
}

impl<A: PostsApi, P: Page> BlogClient<A, P> {
    pub fn new(api: A, page: P) -> Self {
        Self {
            api,
            store: PostStore::new(),
            page: Mutex::new(page),
        }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn with_page<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.page())
    }

    pub fn with_page_mut<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        f(&mut self.page())
    }

    fn page(&self) -> MutexGuard<'_, P> {
        mutex_lock(&self.page, SOURCE, "page")
    }

    /// Initial load: fetch the list and show the first post.
    pub async fn start(&self) -> Result<(), AppError> {
        self.refresh_list().await
    }

    /// Fetch every post, replace the store's list and re-render the list view.
    ///
    /// The first successful load also selects the first post. On failure the
    /// previous list stays on screen.
    #[instrument(skip(self))]
    pub async fn refresh_list(&self) -> Result<(), AppError> {
        let posts = self.api.list_posts().await?;
        let first = posts.first().map(|post| post.id.clone());
        let rows: Vec<ListRow> = posts.iter().map(ListRow::for_post).collect();
        debug!(count = rows.len(), "post list refreshed");

        self.store.set_posts(posts);
        self.page().render_list(rows, None);

        if self.store.mark_initial_load()
            && let Some(id) = first
        {
            self.select_post(id).await?;
        }
        Ok(())
    }

    /// Load one post into the detail view.
    ///
    /// Only the most recently issued selection may update the detail view;
    /// older completions are dropped.
    #[instrument(skip(self), fields(post_id = %id))]
    pub async fn select_post(&self, id: PostId) -> Result<SelectionOutcome, AppError> {
        let ticket = self.store.begin_selection();
        let post = self.api.get_post(&id).await?;

        if !self.store.is_latest(ticket) {
            debug!(
                generation = ticket.generation(),
                "dropping superseded post detail"
            );
            counter!(METRIC_SELECTION_SUPERSEDED).increment(1);
            return Ok(SelectionOutcome::Superseded);
        }

        self.store.set_current_post(post.clone());
        self.page().render_detail(DetailPane::Post(post));
        Ok(SelectionOutcome::Applied)
    }

    /// Show the edit form filled from the post on screen.
    pub fn open_edit(&self) -> bool {
        let mut page = self.page();
        let Some(post) = page.displayed_post() else {
            return false;
        };
        page.fill_edit_form(&post.title, &post.content);
        page.set_edit_form_visible(true);
        true
    }

    /// Hide the edit form. Typed values are left in place.
    pub fn cancel_edit(&self) {
        self.page().set_edit_form_visible(false);
    }

    /// Validate and submit the new-post form.
    ///
    /// Validation failures make no request and leave the form untouched.
    #[instrument(skip(self))]
    pub async fn submit_create(&self) -> Result<Post, AppError> {
        let form = self.page().new_post_form();
        let draft = validate_new_post(&form)?;
        let created = self.api.create_post(&draft).await?;
        info!(post_id = %created.id, "post created");

        self.page().reset_new_post_form();
        self.refresh_after("create").await;
        Ok(created)
    }

    /// Submit the edit form against the current post.
    ///
    /// Returns `Ok(None)` without making a request when no post is current.
    #[instrument(skip(self))]
    pub async fn submit_edit(&self) -> Result<Option<Post>, AppError> {
        let Some(current) = self.store.current_post() else {
            debug!("edit submitted without a current post");
            return Ok(None);
        };

        let form = self.page().edit_form();
        let patch = edit_patch(&form);
        let updated = self.api.update_post(&current.id, &patch).await?;
        info!(post_id = %updated.id, "post updated");

        self.store.begin_selection();
        self.store.set_current_post(updated.clone());
        {
            let mut page = self.page();
            page.set_edit_form_visible(false);
            page.render_detail(DetailPane::Post(updated.clone()));
        }

        self.refresh_after("edit").await;
        Ok(Some(updated))
    }

    /// Delete the post on screen. Returns its id, or `None` when nothing is
    /// displayed.
    pub async fn delete_displayed(&self) -> Result<Option<PostId>, AppError> {
        let displayed = self.page().displayed_post();
        let Some(post) = displayed else {
            return Ok(None);
        };
        self.delete_post(post.id.clone()).await?;
        Ok(Some(post.id))
    }

    #[instrument(skip(self), fields(post_id = %id))]
    pub async fn delete_post(&self, id: PostId) -> Result<(), AppError> {
        self.api.delete_post(&id).await?;
        info!("post deleted");

        let was_current = self.store.clear_current_post_if(&id);
        {
            let mut page = self.page();
            if was_current {
                page.set_edit_form_visible(false);
            }
            page.render_detail(DetailPane::Deleted);
        }

        self.refresh_after("delete").await;
        Ok(())
    }

    /// Re-render the list with the posts whose author contains `query`.
    /// Returns the number of rows shown.
    pub fn filter_by_author(&self, query: &str) -> usize {
        let posts = self.store.posts();
        let rows: Vec<ListRow> = filter_by_author(&posts, query)
            .into_iter()
            .map(ListRow::for_post)
            .collect();
        let shown = rows.len();
        let filter = (!query.is_empty()).then_some(query);
        self.page().render_list(rows, filter);
        shown
    }

    /// Dispatch a page event. Failures are logged and, for user-initiated
    /// writes, surfaced through the page; they never propagate.
    pub async fn handle(&self, event: UiEvent) {
        match event {
            UiEvent::SelectPost(id) => {
                if let Err(err) = self.select_post(id.clone()).await {
                    warn!(post_id = %id, error = %err, "failed to load post detail");
                }
            }
            UiEvent::EditClicked => {
                if !self.open_edit() {
                    debug!("edit clicked without a displayed post");
                }
            }
            UiEvent::CancelEdit => self.cancel_edit(),
            UiEvent::DeleteClicked => {
                if let Err(err) = self.delete_displayed().await {
                    self.report_failure("delete", &err);
                }
            }
            UiEvent::SubmitCreate => match self.submit_create().await {
                Ok(_) => {}
                Err(AppError::Domain(err)) => self.page().alert(&err.to_string()),
                Err(err) => self.report_failure("create", &err),
            },
            UiEvent::SubmitEdit => {
                if let Err(err) = self.submit_edit().await {
                    self.report_failure("edit", &err);
                }
            }
            UiEvent::SearchInput(query) => {
                let shown = self.filter_by_author(&query);
                debug!(query = %query, shown, "author filter applied");
            }
            UiEvent::Refresh => {
                if let Err(err) = self.refresh_list().await {
                    warn!(error = %err, "failed to refresh post list");
                }
            }
        }
    }

    async fn refresh_after(&self, action: &'static str) {
        if let Err(err) = self.refresh_list().await {
            warn!(action, error = %err, "failed to refresh post list");
        }
    }

    fn report_failure(&self, action: &'static str, err: &AppError) {
        warn!(action, error = %err, "post action failed");
        self.page().alert(&err.user_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use postboard_api_types::{NewPost, PostPatch};

    use crate::application::api::ApiError;
    use crate::domain::posts::{NewPostForm, REQUIRED_FIELDS_MESSAGE};
    use crate::presentation::page::{FormField, MemoryPage};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        List,
        Get(PostId),
        Create(NewPost),
        Update(PostId, PostPatch),
        Delete(PostId),
    }

    /// In-memory backend that records every call.
    #[derive(Default)]
    struct RecordingApi {
        posts: Mutex<Vec<Post>>,
        calls: Mutex<Vec<Call>>,
        next_id: Mutex<i64>,
        get_delays: HashMap<PostId, Duration>,
        fail_writes: bool,
        fail_list: Mutex<bool>,
    }

    impl RecordingApi {
        fn with_posts(posts: Vec<Post>) -> Self {
            let next_id = posts.len() as i64 + 100;
            Self {
                posts: Mutex::new(posts),
                next_id: Mutex::new(next_id),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().expect("calls").clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().expect("calls").push(call);
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls().iter().filter(|call| pred(call)).count()
        }

        fn write_failure() -> ApiError {
            ApiError::Status {
                status: 500,
                body: "boom".into(),
            }
        }
    }

    #[async_trait]
    impl PostsApi for RecordingApi {
        async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
            self.record(Call::List);
            if *self.fail_list.lock().expect("fail_list") {
                return Err(ApiError::transport("connection refused"));
            }
            Ok(self.posts.lock().expect("posts").clone())
        }

        async fn get_post(&self, id: &PostId) -> Result<Post, ApiError> {
            self.record(Call::Get(id.clone()));
            if let Some(delay) = self.get_delays.get(id) {
                tokio::time::sleep(*delay).await;
            }
            self.posts
                .lock()
                .expect("posts")
                .iter()
                .find(|post| &post.id == id)
                .cloned()
                .ok_or(ApiError::Status {
                    status: 404,
                    body: "{}".into(),
                })
        }

        async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
            self.record(Call::Create(post.clone()));
            if self.fail_writes {
                return Err(Self::write_failure());
            }
            let mut next_id = self.next_id.lock().expect("next_id");
            *next_id += 1;
            let created = Post {
                id: PostId::Number(*next_id),
                title: post.title.clone(),
                content: post.content.clone(),
                author: post.author.clone(),
                image: Some(post.image.clone()),
            };
            self.posts.lock().expect("posts").push(created.clone());
            Ok(created)
        }

        async fn update_post(&self, id: &PostId, patch: &PostPatch) -> Result<Post, ApiError> {
            self.record(Call::Update(id.clone(), patch.clone()));
            if self.fail_writes {
                return Err(Self::write_failure());
            }
            let mut posts = self.posts.lock().expect("posts");
            let post = posts
                .iter_mut()
                .find(|post| &post.id == id)
                .ok_or_else(Self::write_failure)?;
            post.title = patch.title.clone();
            post.content = patch.content.clone();
            Ok(post.clone())
        }

        async fn delete_post(&self, id: &PostId) -> Result<(), ApiError> {
            self.record(Call::Delete(id.clone()));
            if self.fail_writes {
                return Err(Self::write_failure());
            }
            self.posts.lock().expect("posts").retain(|post| &post.id != id);
            Ok(())
        }
    }

    fn post(id: i64, title: &str, author: &str) -> Post {
        Post {
            id: PostId::Number(id),
            title: title.into(),
            content: format!("{title} body"),
            author: author.into(),
            image: None,
        }
    }

    fn sample_posts() -> Vec<Post> {
        vec![
            post(1, "First", "Ada"),
            post(5, "Fifth", "Grace"),
            post(3, "Third", "adam"),
        ]
    }

    fn client(api: RecordingApi) -> BlogClient<RecordingApi, MemoryPage> {
        BlogClient::new(api, MemoryPage::new())
    }

    fn row_labels(client: &BlogClient<RecordingApi, MemoryPage>) -> Vec<String> {
        client.with_page(|page| page.rows().iter().map(|row| row.label.clone()).collect())
    }

    fn displayed_id(client: &BlogClient<RecordingApi, MemoryPage>) -> Option<PostId> {
        client.with_page(|page| page.displayed_post().map(|post| post.id))
    }

    #[tokio::test]
    async fn start_renders_rows_in_backend_order_and_selects_first() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");

        assert_eq!(row_labels(&client), vec!["First", "Fifth", "Third"]);
        assert_eq!(displayed_id(&client), Some(PostId::Number(1)));
        assert_eq!(
            client.store().current_post().map(|post| post.id),
            Some(PostId::Number(1))
        );
        assert_eq!(
            client.api().calls(),
            vec![Call::List, Call::Get(PostId::Number(1))]
        );
    }

    #[tokio::test]
    async fn start_with_no_posts_leaves_detail_empty() {
        let client = client(RecordingApi::with_posts(Vec::new()));
        client.start().await.expect("start");

        assert!(row_labels(&client).is_empty());
        client.with_page(|page| assert_eq!(page.detail(), &DetailPane::Empty));
        assert_eq!(client.api().calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn later_refreshes_do_not_reselect() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");
        client.select_post(PostId::Number(5)).await.expect("select");
        client.refresh_list().await.expect("refresh");

        assert_eq!(displayed_id(&client), Some(PostId::Number(5)));
        assert_eq!(client.api().count(|call| matches!(call, Call::Get(_))), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");

        *client.api().fail_list.lock().expect("fail_list") = true;
        client.handle(UiEvent::Refresh).await;

        assert_eq!(row_labels(&client), vec!["First", "Fifth", "Third"]);
        assert_eq!(client.store().posts().len(), 3);
    }

    #[tokio::test]
    async fn author_filter_uses_held_list_without_requests() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");
        let before = client.api().calls().len();

        client.handle(UiEvent::SearchInput("ADA".into())).await;
        assert_eq!(row_labels(&client), vec!["First", "Third"]);
        assert_eq!(displayed_id(&client), Some(PostId::Number(1)));

        client.handle(UiEvent::SearchInput(String::new())).await;
        assert_eq!(row_labels(&client), vec!["First", "Fifth", "Third"]);
        assert_eq!(client.api().calls().len(), before);
    }

    #[tokio::test]
    async fn refresh_after_search_drops_the_filter_label() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");
        client.with_page_mut(|page| page.set_search("ada"));
        client.handle(UiEvent::SearchInput("ada".into())).await;
        client.with_page(|page| {
            assert!(page.to_string().starts_with("Posts (2, author ~ \"ada\"):"));
        });

        client.handle(UiEvent::Refresh).await;

        assert_eq!(row_labels(&client), vec!["First", "Fifth", "Third"]);
        client.with_page(|page| assert!(page.to_string().starts_with("Posts (3):")));
    }

    #[tokio::test]
    async fn create_with_empty_author_is_rejected_without_request() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");
        client.with_page_mut(|page| {
            page.set_field(FormField::Title, "T");
            page.set_field(FormField::Content, "C");
            page.set_field(FormField::Author, "   ");
        });

        client.handle(UiEvent::SubmitCreate).await;

        assert_eq!(client.api().count(|call| matches!(call, Call::Create(_))), 0);
        client.with_page(|page| {
            assert_eq!(page.alerts(), [REQUIRED_FIELDS_MESSAGE.to_string()]);
            let form = page.new_post_form();
            assert_eq!(form.title, "T");
            assert_eq!(form.author, "   ");
        });
    }

    #[tokio::test]
    async fn create_posts_trimmed_fields_then_refreshes_list() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");
        client.with_page_mut(|page| {
            page.set_field(FormField::Title, " T ");
            page.set_field(FormField::Content, "C");
            page.set_field(FormField::Author, "A");
            page.set_field(FormField::Image, "");
        });

        client.handle(UiEvent::SubmitCreate).await;

        let creates: Vec<_> = client
            .api()
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Create(_)))
            .collect();
        assert_eq!(
            creates,
            vec![Call::Create(NewPost {
                title: "T".into(),
                content: "C".into(),
                author: "A".into(),
                image: String::new(),
            })]
        );
        assert!(row_labels(&client).contains(&"T".to_string()));
        assert_eq!(displayed_id(&client), Some(PostId::Number(1)));
        client.with_page(|page| assert_eq!(page.new_post_form(), NewPostForm::default()));
    }

    #[tokio::test]
    async fn failed_create_keeps_form_and_alerts() {
        let api = RecordingApi {
            fail_writes: true,
            ..RecordingApi::with_posts(sample_posts())
        };
        let client = client(api);
        client.with_page_mut(|page| {
            page.set_field(FormField::Title, "T");
            page.set_field(FormField::Content, "C");
            page.set_field(FormField::Author, "A");
        });

        client.handle(UiEvent::SubmitCreate).await;

        client.with_page(|page| {
            assert_eq!(page.new_post_form().title, "T");
            assert_eq!(page.alerts().len(), 1);
            assert!(page.alerts()[0].starts_with("Request failed"));
        });
        assert_eq!(client.api().count(|call| matches!(call, Call::List)), 0);
    }

    #[tokio::test]
    async fn edit_patches_current_post_and_rerenders() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");
        client.select_post(PostId::Number(5)).await.expect("select");

        client.handle(UiEvent::EditClicked).await;
        client.with_page(|page| {
            assert!(page.is_edit_visible());
            assert_eq!(page.edit_form().title, "Fifth");
        });

        client.with_page_mut(|page| {
            page.set_field(FormField::EditTitle, "T2");
            page.set_field(FormField::EditContent, "C2");
        });
        client.handle(UiEvent::SubmitEdit).await;

        let updates: Vec<_> = client
            .api()
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Update(..)))
            .collect();
        assert_eq!(
            updates,
            vec![Call::Update(
                PostId::Number(5),
                PostPatch {
                    title: "T2".into(),
                    content: "C2".into(),
                }
            )]
        );
        client.with_page(|page| {
            assert!(!page.is_edit_visible());
            let shown = page.displayed_post().expect("detail");
            assert_eq!((shown.title.as_str(), shown.content.as_str()), ("T2", "C2"));
        });
        assert!(row_labels(&client).contains(&"T2".to_string()));
        assert_eq!(
            client.store().current_post().map(|post| post.title),
            Some("T2".into())
        );
    }

    #[tokio::test]
    async fn edit_without_current_post_is_a_silent_noop() {
        let client = client(RecordingApi::with_posts(Vec::new()));
        client.start().await.expect("start");
        client.handle(UiEvent::SubmitEdit).await;

        assert_eq!(client.api().calls(), vec![Call::List]);
        client.with_page(|page| assert!(page.alerts().is_empty()));
    }

    #[tokio::test]
    async fn cancel_hides_form_and_keeps_typed_values() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");
        client.handle(UiEvent::EditClicked).await;
        client.with_page_mut(|page| page.set_field(FormField::EditTitle, "draft"));
        let before = client.api().calls().len();

        client.handle(UiEvent::CancelEdit).await;

        client.with_page(|page| {
            assert!(!page.is_edit_visible());
            assert_eq!(page.edit_form().title, "draft");
        });
        assert_eq!(client.api().calls().len(), before);

        client.handle(UiEvent::EditClicked).await;
        client.with_page(|page| assert_eq!(page.edit_form().title, "First"));
    }

    #[tokio::test]
    async fn delete_shows_placeholder_and_refreshes_once() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");
        let lists_before = client.api().count(|call| matches!(call, Call::List));

        client.handle(UiEvent::DeleteClicked).await;

        assert_eq!(
            client.api().count(|call| *call == Call::Delete(PostId::Number(1))),
            1
        );
        assert_eq!(
            client.api().count(|call| matches!(call, Call::List)),
            lists_before + 1
        );
        client.with_page(|page| assert_eq!(page.detail(), &DetailPane::Deleted));
        assert_eq!(row_labels(&client), vec!["Fifth", "Third"]);
        assert!(client.store().current_post().is_none());

        let before = client.api().calls().len();
        client.handle(UiEvent::SubmitEdit).await;
        assert_eq!(client.api().calls().len(), before);
    }

    #[tokio::test]
    async fn failed_delete_leaves_detail_in_place() {
        let api = RecordingApi {
            fail_writes: true,
            ..RecordingApi::with_posts(sample_posts())
        };
        let client = client(api);
        client.start().await.expect("start");

        client.handle(UiEvent::DeleteClicked).await;

        assert_eq!(displayed_id(&client), Some(PostId::Number(1)));
        client.with_page(|page| assert_eq!(page.alerts().len(), 1));
        assert_eq!(row_labels(&client).len(), 3);
    }

    #[tokio::test]
    async fn failed_edit_keeps_form_open_and_alerts() {
        let api = RecordingApi {
            fail_writes: true,
            ..RecordingApi::with_posts(sample_posts())
        };
        let client = client(api);
        client.start().await.expect("start");
        client.handle(UiEvent::EditClicked).await;
        client.with_page_mut(|page| {
            page.set_field(FormField::EditTitle, "typed");
            page.set_field(FormField::EditContent, "typed body");
        });
        let lists_before = client.api().count(|call| matches!(call, Call::List));

        client.handle(UiEvent::SubmitEdit).await;

        assert_eq!(
            client.api().count(|call| matches!(call, Call::Update(..))),
            1
        );
        client.with_page(|page| {
            assert!(page.is_edit_visible());
            assert_eq!(page.edit_form().title, "typed");
            assert_eq!(page.edit_form().content, "typed body");
            assert_eq!(page.alerts().len(), 1);
            assert!(page.alerts()[0].starts_with("Request failed"));
            assert_eq!(
                page.displayed_post().map(|post| post.title),
                Some("First".into())
            );
        });
        assert_eq!(
            client.store().current_post().map(|post| post.title),
            Some("First".into())
        );
        assert_eq!(
            client.api().count(|call| matches!(call, Call::List)),
            lists_before
        );
    }

    #[tokio::test]
    async fn failed_detail_fetch_keeps_previous_detail_without_alert() {
        let client = client(RecordingApi::with_posts(sample_posts()));
        client.start().await.expect("start");

        client.handle(UiEvent::SelectPost(PostId::Number(42))).await;

        assert_eq!(
            client.api().count(|call| *call == Call::Get(PostId::Number(42))),
            1
        );
        assert_eq!(displayed_id(&client), Some(PostId::Number(1)));
        assert_eq!(
            client.store().current_post().map(|post| post.id),
            Some(PostId::Number(1))
        );
        client.with_page(|page| assert!(page.alerts().is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_earlier_selection_cannot_overwrite_newer_one() {
        let mut api = RecordingApi::with_posts(sample_posts());
        api.get_delays
            .insert(PostId::Number(3), Duration::from_millis(500));
        api.get_delays
            .insert(PostId::Number(5), Duration::from_millis(10));
        let client = client(api);

        let (first, second) = tokio::join!(
            client.select_post(PostId::Number(3)),
            client.select_post(PostId::Number(5)),
        );

        assert_eq!(first.expect("first"), SelectionOutcome::Superseded);
        assert_eq!(second.expect("second"), SelectionOutcome::Applied);
        assert_eq!(displayed_id(&client), Some(PostId::Number(5)));
        assert_eq!(
            client.store().current_post().map(|post| post.id),
            Some(PostId::Number(5))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn latest_selection_wins_when_it_resolves_last() {
        let mut api = RecordingApi::with_posts(sample_posts());
        api.get_delays
            .insert(PostId::Number(3), Duration::from_millis(10));
        api.get_delays
            .insert(PostId::Number(5), Duration::from_millis(500));
        let client = client(api);

        let (first, second) = tokio::join!(
            client.select_post(PostId::Number(3)),
            client.select_post(PostId::Number(5)),
        );

        assert_eq!(first.expect("first"), SelectionOutcome::Superseded);
        assert_eq!(second.expect("second"), SelectionOutcome::Applied);
        assert_eq!(displayed_id(&client), Some(PostId::Number(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn edit_commit_supersedes_in_flight_selection() {
        let mut api = RecordingApi::with_posts(sample_posts());
        api.get_delays
            .insert(PostId::Number(3), Duration::from_millis(500));
        let client = client(api);
        client.select_post(PostId::Number(1)).await.expect("select");
        client.with_page_mut(|page| {
            page.set_field(FormField::EditTitle, "Edited");
            page.set_field(FormField::EditContent, "Body");
        });

        let (selection, edit) = tokio::join!(
            client.select_post(PostId::Number(3)),
            client.submit_edit(),
        );

        assert_eq!(selection.expect("selection"), SelectionOutcome::Superseded);
        assert_eq!(edit.expect("edit").map(|post| post.title), Some("Edited".into()));
        assert_eq!(displayed_id(&client), Some(PostId::Number(1)));
    }
}
