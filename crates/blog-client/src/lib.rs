//! # Blog Client
//!
//! The client tier of the blog: a local post cache that talks to the API and
//! broadcasts typed events, and a controller that turns UI intents into cache
//! calls and cache events into view updates. Rendering itself is left to a
//! [`PostView`] implementation.
//!
//! ```ignore
//! let app = BlogApp::new(ClientConfig::from_env(), Arc::new(MyView::default()))?;
//! app.start().await;
//! let intents = app.spawn_intent_loop(32);
//! intents.send(UiIntent::Delete { id: 3 }).await?;
//! ```

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;

#[cfg(test)]
mod testing;

/// A post as the API returns it.
pub use blog_shared::PostResponse as Post;

pub use api::{HttpPostsApi, PostsApi};
pub use app::BlogApp;
pub use cache::PostCache;
pub use config::{ClientConfig, RetryPolicy};
pub use controller::{PostController, PostView, UiIntent};
pub use error::ClientError;
pub use events::{CacheEvent, Notifier, PostObserver, SubscriptionId};
