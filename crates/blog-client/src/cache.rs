//! Client post cache - the model layer.
//!
//! Holds a newest-first copy of the server's posts and a loading flag. The
//! copy only changes after the server confirms an operation; every outcome is
//! broadcast through the [`Notifier`] and failures are also returned to the
//! caller.

use std::sync::Arc;

use tokio::sync::RwLock;

use blog_core::domain::validate_post_fields;
use blog_shared::PostPayload;

use crate::Post;
use crate::api::PostsApi;
use crate::error::ClientError;
use crate::events::{CacheEvent, Notifier, PostObserver, SubscriptionId};

#[derive(Default)]
struct CacheState {
    posts: Vec<Post>,
    loading: bool,
}

pub struct PostCache {
    api: Arc<dyn PostsApi>,
    state: RwLock<CacheState>,
    notifier: Notifier,
}

impl PostCache {
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self {
            api,
            state: RwLock::new(CacheState::default()),
            notifier: Notifier::new(),
        }
    }

    pub async fn subscribe(&self, observer: Arc<dyn PostObserver>) -> SubscriptionId {
        self.notifier.subscribe(observer).await
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id).await
    }

    /// Snapshot of the cached posts, newest first.
    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Look a post up in the local copy only.
    pub async fn find_cached(&self, id: i64) -> Option<Post> {
        self.state
            .read()
            .await
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Advisory check before a round trip. Empty when the input looks valid;
    /// the server still has the final say.
    pub fn validate(title: &str, content: &str) -> Vec<String> {
        validate_post_fields(Some(title), Some(content))
    }

    /// Replace the local copy with the server's list.
    pub async fn load_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.begin().await;

        let result = match self.api.list_posts().await {
            Ok(posts) => {
                self.state.write().await.posts = posts.clone();
                tracing::debug!(count = posts.len(), "Posts loaded");
                self.notifier
                    .emit(&CacheEvent::PostsLoaded(posts.clone()))
                    .await;
                Ok(posts)
            }
            Err(e) => Err(self.report(e).await),
        };

        self.finish(true).await;
        result
    }

    /// Fetch one post from the server. The local list is left alone.
    pub async fn get_post(&self, id: i64) -> Result<Post, ClientError> {
        self.begin().await;

        let result = match self.api.get_post(id).await {
            Ok(post) => Ok(post),
            Err(e) => Err(self.report(e).await),
        };

        self.finish(false).await;
        result
    }

    pub async fn create_post(&self, title: &str, content: &str) -> Result<Post, ClientError> {
        self.begin().await;

        let payload = PostPayload::new(title, content);
        let result = match self.api.create_post(&payload).await {
            Ok(post) => {
                self.state.write().await.posts.insert(0, post.clone());
                self.notifier
                    .emit(&CacheEvent::PostCreated(post.clone()))
                    .await;
                Ok(post)
            }
            Err(e) => Err(self.report(e).await),
        };

        self.finish(false).await;
        result
    }

    pub async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Post, ClientError> {
        self.begin().await;

        let payload = PostPayload::new(title, content);
        let result = match self.api.update_post(id, &payload).await {
            Ok(post) => {
                {
                    let mut state = self.state.write().await;
                    if let Some(slot) = state.posts.iter_mut().find(|p| p.id == post.id) {
                        *slot = post.clone();
                    }
                }
                self.notifier
                    .emit(&CacheEvent::PostUpdated(post.clone()))
                    .await;
                Ok(post)
            }
            Err(e) => Err(self.report(e).await),
        };

        self.finish(false).await;
        result
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ClientError> {
        self.begin().await;

        let result = match self.api.delete_post(id).await {
            Ok(()) => {
                self.state.write().await.posts.retain(|p| p.id != id);
                self.notifier.emit(&CacheEvent::PostDeleted(id)).await;
                Ok(())
            }
            Err(e) => Err(self.report(e).await),
        };

        self.finish(false).await;
        result
    }

    async fn begin(&self) {
        self.state.write().await.loading = true;
        self.notifier.emit(&CacheEvent::LoadingStart).await;
    }

    /// Only a list load announces the end of loading.
    async fn finish(&self, announce_end: bool) {
        self.state.write().await.loading = false;
        if announce_end {
            self.notifier.emit(&CacheEvent::LoadingEnd).await;
        }
    }

    async fn report(&self, err: ClientError) -> ClientError {
        tracing::warn!(error = %err, "Post request failed");
        self.notifier.emit(&CacheEvent::Error(err.to_string())).await;
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePostsApi, RecordingObserver};

    async fn cache_with_recorder() -> (Arc<FakePostsApi>, PostCache, Arc<RecordingObserver>) {
        let api = Arc::new(FakePostsApi::new());
        let cache = PostCache::new(api.clone());
        let recorder = Arc::new(RecordingObserver::default());
        cache.subscribe(recorder.clone()).await;
        (api, cache, recorder)
    }

    #[tokio::test]
    async fn create_reload_delete_reload_scenario() {
        let (_api, cache, recorder) = cache_with_recorder().await;

        let a = cache.create_post("Hello", "This is a test post").await.unwrap();
        assert_eq!(
            recorder.take(),
            vec![CacheEvent::LoadingStart, CacheEvent::PostCreated(a.clone())]
        );

        cache.load_posts().await.unwrap();
        assert_eq!(
            recorder.take(),
            vec![
                CacheEvent::LoadingStart,
                CacheEvent::PostsLoaded(vec![a.clone()]),
                CacheEvent::LoadingEnd,
            ]
        );

        cache.delete_post(a.id).await.unwrap();
        assert_eq!(
            recorder.take(),
            vec![CacheEvent::LoadingStart, CacheEvent::PostDeleted(a.id)]
        );

        let posts = cache.load_posts().await.unwrap();
        assert!(posts.is_empty());
        assert!(recorder.take().contains(&CacheEvent::PostsLoaded(Vec::new())));
    }

    #[tokio::test]
    async fn local_copy_follows_confirmed_mutations() {
        let (_api, cache, _recorder) = cache_with_recorder().await;

        let first = cache.create_post("First", "First post content").await.unwrap();
        let second = cache.create_post("Second", "Second post content").await.unwrap();
        let ids: Vec<_> = cache.posts().await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let edited = cache
            .update_post(first.id, "First, edited", "First post content, edited")
            .await
            .unwrap();
        assert_eq!(cache.find_cached(first.id).await, Some(edited));
        assert_eq!(cache.posts().await.len(), 2);

        cache.delete_post(second.id).await.unwrap();
        assert!(cache.find_cached(second.id).await.is_none());
        assert!(!cache.is_loading().await);
    }

    #[tokio::test]
    async fn failures_notify_and_are_returned() {
        let (_api, cache, recorder) = cache_with_recorder().await;

        let err = cache.delete_post(99).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            recorder.take(),
            vec![
                CacheEvent::LoadingStart,
                CacheEvent::Error("Post not found".into()),
            ]
        );
        assert!(!cache.is_loading().await);
    }

    #[tokio::test]
    async fn server_validation_is_authoritative() {
        let (_api, cache, recorder) = cache_with_recorder().await;

        let err = cache.create_post("ab", "This is a test post").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(cache.posts().await.is_empty());
        assert!(matches!(recorder.take().last(), Some(CacheEvent::Error(_))));
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_copy() {
        let (api, cache, recorder) = cache_with_recorder().await;
        let post = cache.create_post("Kept", "Survives a failed load").await.unwrap();
        recorder.take();

        api.fail_next(ClientError::Api {
            status: 500,
            message: "HTTP 500".into(),
        });
        assert!(cache.load_posts().await.is_err());

        assert_eq!(cache.posts().await, vec![post]);
        assert_eq!(
            recorder.take(),
            vec![
                CacheEvent::LoadingStart,
                CacheEvent::Error("HTTP 500".into()),
                CacheEvent::LoadingEnd,
            ]
        );
    }

    #[tokio::test]
    async fn get_post_does_not_touch_the_list() {
        let (api, cache, _recorder) = cache_with_recorder().await;
        let seeded = api.seed("Remote only", "Not loaded into the cache yet");

        let fetched = cache.get_post(seeded.id).await.unwrap();
        assert_eq!(fetched, seeded);
        assert!(cache.posts().await.is_empty());
    }

    #[test]
    fn validation_helper_lists_every_problem() {
        assert!(PostCache::validate("Hello", "This is a test post").is_empty());
        assert_eq!(PostCache::validate("", "short").len(), 2);
        assert_eq!(PostCache::validate("ab", "1234567890").len(), 1);
    }
}
