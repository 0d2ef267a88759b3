//! Application context - built once at startup and handed to whoever needs it.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{HttpPostsApi, PostsApi};
use crate::cache::PostCache;
use crate::config::ClientConfig;
use crate::controller::{PostController, PostView, UiIntent};
use crate::error::ClientError;

pub struct BlogApp {
    config: ClientConfig,
    cache: Arc<PostCache>,
    controller: Arc<PostController>,
}

impl BlogApp {
    /// Context talking to the server named in `config`.
    pub fn new(config: ClientConfig, view: Arc<dyn PostView>) -> Result<Self, ClientError> {
        let api = HttpPostsApi::new(&config)?;
        Ok(Self::with_api(config, Arc::new(api), view))
    }

    /// Context over any [`PostsApi`] implementation.
    pub fn with_api(config: ClientConfig, api: Arc<dyn PostsApi>, view: Arc<dyn PostView>) -> Self {
        let cache = Arc::new(PostCache::new(api));
        let controller = Arc::new(PostController::new(Arc::clone(&cache), view));

        Self {
            config,
            cache,
            controller,
        }
    }

    /// Initialize the controller, which subscribes the view and loads posts.
    pub async fn start(&self) {
        tracing::info!(api = %self.config.base_url, "Starting blog client");
        self.controller.initialize().await;
    }

    /// Spawn the intent loop on the current runtime and return its sender.
    /// The loop ends when every sender has been dropped.
    pub fn spawn_intent_loop(&self, buffer: usize) -> mpsc::Sender<UiIntent> {
        let (tx, rx) = mpsc::channel(buffer);
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move { controller.run(rx).await });
        tx
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<PostCache> {
        &self.cache
    }

    pub fn controller(&self) -> &Arc<PostController> {
        &self.controller
    }
}
