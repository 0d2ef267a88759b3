//! Typed cache events and the observer registry that broadcasts them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::Post;

/// Everything the cache announces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    PostsLoaded(Vec<Post>),
    PostCreated(Post),
    PostUpdated(Post),
    PostDeleted(i64),
    Error(String),
    LoadingStart,
    LoadingEnd,
}

impl CacheEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CacheEvent::PostsLoaded(_) => "posts_loaded",
            CacheEvent::PostCreated(_) => "post_created",
            CacheEvent::PostUpdated(_) => "post_updated",
            CacheEvent::PostDeleted(_) => "post_deleted",
            CacheEvent::Error(_) => "error",
            CacheEvent::LoadingStart => "loading_start",
            CacheEvent::LoadingEnd => "loading_end",
        }
    }
}

/// Receives cache events. Every handler defaults to doing nothing, so an
/// observer only implements the ones it cares about.
pub trait PostObserver: Send + Sync {
    fn on_posts_loaded(&self, _posts: &[Post]) {}

    fn on_post_created(&self, _post: &Post) {}

    fn on_post_updated(&self, _post: &Post) {}

    fn on_post_deleted(&self, _id: i64) {}

    fn on_error(&self, _message: &str) {}

    fn on_loading_start(&self) {}

    fn on_loading_end(&self) {}

    /// Route an event to the matching handler.
    fn notify(&self, event: &CacheEvent) {
        match event {
            CacheEvent::PostsLoaded(posts) => self.on_posts_loaded(posts),
            CacheEvent::PostCreated(post) => self.on_post_created(post),
            CacheEvent::PostUpdated(post) => self.on_post_updated(post),
            CacheEvent::PostDeleted(id) => self.on_post_deleted(*id),
            CacheEvent::Error(message) => self.on_error(message),
            CacheEvent::LoadingStart => self.on_loading_start(),
            CacheEvent::LoadingEnd => self.on_loading_end(),
        }
    }
}

/// Handle returned by [`Notifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observer registry. Observers are called in subscription order.
pub struct Notifier {
    observers: RwLock<Vec<(SubscriptionId, Arc<dyn PostObserver>)>>,
    next_id: AtomicU64,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn subscribe(&self, observer: Arc<dyn PostObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().await.push((id, observer));
        tracing::debug!(subscription = id.0, "Observer subscribed");
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write().await;
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    pub async fn emit(&self, event: &CacheEvent) {
        // Snapshot so an observer may (un)subscribe from inside a handler.
        let observers: Vec<_> = self
            .observers
            .read()
            .await
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();

        tracing::trace!(event = event.name(), observers = observers.len(), "Emitting cache event");
        for observer in observers {
            observer.notify(event);
        }
    }

    pub async fn len(&self) -> usize {
        self.observers.read().await.len()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
