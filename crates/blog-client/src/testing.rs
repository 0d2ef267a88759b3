//! Test doubles: an in-process posts API, a recording observer and a recording view.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use blog_core::domain::PostDraft;
use blog_shared::PostPayload;

use crate::Post;
use crate::api::PostsApi;
use crate::controller::PostView;
use crate::error::ClientError;
use crate::events::{CacheEvent, PostObserver};

#[derive(Default)]
struct FakeState {
    posts: Vec<Post>,
    last_id: i64,
    fail_next: Option<ClientError>,
}

/// Behaves like the server: same validation, newest-first list, no id reuse.
#[derive(Default)]
pub struct FakePostsApi {
    state: Mutex<FakeState>,
    calls: AtomicUsize,
}

fn not_found() -> ClientError {
    ClientError::Api {
        status: 404,
        message: "Post not found".into(),
    }
}

fn bad_request(message: String) -> ClientError {
    ClientError::Api {
        status: 400,
        message,
    }
}

impl FakePostsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert directly, bypassing the call counter.
    pub fn seed(&self, title: &str, content: &str) -> Post {
        let mut state = self.state.lock().unwrap();
        Self::insert(&mut state, title.trim().into(), content.trim().into())
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: ClientError) {
        self.state.lock().unwrap().fail_next = Some(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, FakeState>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }

    fn insert(state: &mut FakeState, title: String, content: String) -> Post {
        state.last_id += 1;
        let now = Utc::now();
        let post = Post {
            id: state.last_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(0, post.clone());
        post
    }

    fn draft(payload: &PostPayload) -> Result<PostDraft, ClientError> {
        PostDraft::parse(payload.title.clone(), payload.content.clone())
            .map_err(|e| bad_request(e.to_string()))
    }
}

#[async_trait]
impl PostsApi for FakePostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        Ok(self.enter()?.posts.clone())
    }

    async fn get_post(&self, id: i64) -> Result<Post, ClientError> {
        let state = self.enter()?;
        state
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_post(&self, payload: &PostPayload) -> Result<Post, ClientError> {
        let mut state = self.enter()?;
        let (title, content) = Self::draft(payload)?.into_parts();
        Ok(Self::insert(&mut state, title, content))
    }

    async fn update_post(&self, id: i64, payload: &PostPayload) -> Result<Post, ClientError> {
        let mut state = self.enter()?;
        let (title, content) = Self::draft(payload)?.into_parts();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(not_found)?;
        post.title = title;
        post.content = content;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), ClientError> {
        let mut state = self.enter()?;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        if state.posts.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

/// Records every event it is handed, in order.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<CacheEvent>>,
}

impl RecordingObserver {
    /// Drain what has been recorded so far.
    pub fn take(&self) -> Vec<CacheEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    fn push(&self, event: CacheEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl PostObserver for RecordingObserver {
    fn on_posts_loaded(&self, posts: &[Post]) {
        self.push(CacheEvent::PostsLoaded(posts.to_vec()));
    }

    fn on_post_created(&self, post: &Post) {
        self.push(CacheEvent::PostCreated(post.clone()));
    }

    fn on_post_updated(&self, post: &Post) {
        self.push(CacheEvent::PostUpdated(post.clone()));
    }

    fn on_post_deleted(&self, id: i64) {
        self.push(CacheEvent::PostDeleted(id));
    }

    fn on_error(&self, message: &str) {
        self.push(CacheEvent::Error(message.to_string()));
    }

    fn on_loading_start(&self) {
        self.push(CacheEvent::LoadingStart);
    }

    fn on_loading_end(&self) {
        self.push(CacheEvent::LoadingEnd);
    }
}

/// What a view was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Render(Vec<i64>),
    EditForm(i64),
    ResetForm,
    Success(String),
    Error(String),
    Loading(bool),
}

#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn take(&self) -> Vec<ViewCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    fn push(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PostView for RecordingView {
    fn render_posts(&self, posts: &[Post]) {
        self.push(ViewCall::Render(posts.iter().map(|p| p.id).collect()));
    }

    fn show_edit_form(&self, post: &Post) {
        self.push(ViewCall::EditForm(post.id));
    }

    fn reset_form(&self) {
        self.push(ViewCall::ResetForm);
    }

    fn show_success(&self, message: &str) {
        self.push(ViewCall::Success(message.to_string()));
    }

    fn show_error(&self, message: &str) {
        self.push(ViewCall::Error(message.to_string()));
    }

    fn set_loading(&self, loading: bool) {
        self.push(ViewCall::Loading(loading));
    }
}
