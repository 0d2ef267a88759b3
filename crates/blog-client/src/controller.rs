//! Presentation controller - mediates between UI intents, the cache and the view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use crate::Post;
use crate::cache::PostCache;
use crate::error::ClientError;
use crate::events::PostObserver;

/// The rendering collaborator. Implementations draw; they hold no post state
/// the controller relies on.
pub trait PostView: Send + Sync {
    fn render_posts(&self, posts: &[Post]);

    /// Fill the form with an existing post for editing.
    fn show_edit_form(&self, post: &Post);

    fn reset_form(&self);

    /// Transient confirmation.
    fn show_success(&self, message: &str);

    fn show_error(&self, message: &str);

    /// Busy indicator.
    fn set_loading(&self, loading: bool);
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    Create { title: String, content: String },
    Update { id: i64, title: String, content: String },
    Delete { id: i64 },
    Edit { id: i64 },
}

/// Forwards cache events to the view.
struct ViewBridge {
    view: Arc<dyn PostView>,
}

impl PostObserver for ViewBridge {
    fn on_posts_loaded(&self, posts: &[Post]) {
        self.view.render_posts(posts);
    }

    fn on_error(&self, message: &str) {
        self.view.show_error(message);
    }

    fn on_loading_start(&self) {
        self.view.set_loading(true);
    }

    fn on_loading_end(&self) {
        self.view.set_loading(false);
    }
}

pub struct PostController {
    cache: Arc<PostCache>,
    view: Arc<dyn PostView>,
    initialized: AtomicBool,
}

impl PostController {
    pub fn new(cache: Arc<PostCache>, view: Arc<dyn PostView>) -> Self {
        Self {
            cache,
            view,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Wire the view to the cache and load the first list.
    /// Calling it again only logs a warning.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("Post controller already initialized");
            return;
        }

        self.cache
            .subscribe(Arc::new(ViewBridge {
                view: Arc::clone(&self.view),
            }))
            .await;

        // Failure is already on screen through the error event.
        if let Err(e) = self.cache.load_posts().await {
            tracing::warn!(error = %e, "Initial post load failed");
        }
        tracing::info!("Post controller initialized");
    }

    /// Handle intents one at a time until every sender is dropped.
    pub async fn run(&self, mut intents: mpsc::Receiver<UiIntent>) {
        while let Some(intent) = intents.recv().await {
            if let Err(e) = self.handle(intent).await {
                tracing::debug!(error = %e, "Intent did not complete");
            }
        }
        tracing::debug!("Intent channel closed");
    }

    pub async fn handle(&self, intent: UiIntent) -> Result<(), ClientError> {
        match intent {
            UiIntent::Create { title, content } => self.create(&title, &content).await,
            UiIntent::Update { id, title, content } => self.update(id, &title, &content).await,
            UiIntent::Delete { id } => self.delete(id).await,
            UiIntent::Edit { id } => self.edit(id).await,
        }
    }

    async fn create(&self, title: &str, content: &str) -> Result<(), ClientError> {
        self.check_input(title, content)?;

        match self.cache.create_post(title, content).await {
            Ok(_) => {
                self.view.show_success("Post created successfully");
                self.view.reset_form();
                self.reload().await
            }
            Err(e) => self.mutation_failed(e),
        }
    }

    async fn update(&self, id: i64, title: &str, content: &str) -> Result<(), ClientError> {
        self.check_input(title, content)?;

        match self.cache.update_post(id, title, content).await {
            Ok(_) => {
                self.view.show_success("Post updated successfully");
                self.view.reset_form();
                self.reload().await
            }
            Err(e) => self.mutation_failed(e),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        match self.cache.delete_post(id).await {
            Ok(()) => {
                self.view.show_success("Post deleted successfully");
                self.reload().await
            }
            Err(e) => self.mutation_failed(e),
        }
    }

    /// Edits come from the local copy; a stale cache shows an error instead.
    async fn edit(&self, id: i64) -> Result<(), ClientError> {
        match self.cache.find_cached(id).await {
            Some(post) => {
                self.view.show_edit_form(&post);
                Ok(())
            }
            None => {
                self.view.show_error("Post not found");
                Err(ClientError::NotCached(id))
            }
        }
    }

    fn check_input(&self, title: &str, content: &str) -> Result<(), ClientError> {
        let errors = PostCache::validate(title, content);
        if errors.is_empty() {
            return Ok(());
        }

        self.view.show_error(&errors.join("\n"));
        Err(ClientError::Validation(errors))
    }

    /// Mutations never emit loading-end, so clear the indicator here.
    fn mutation_failed(&self, err: ClientError) -> Result<(), ClientError> {
        self.view.set_loading(false);
        Err(err)
    }

    /// Full reload so the list matches the server's ordering.
    async fn reload(&self) -> Result<(), ClientError> {
        self.cache.load_posts().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PostsApi;
    use crate::testing::{FakePostsApi, RecordingView, ViewCall};

    fn controller() -> (Arc<FakePostsApi>, PostController, Arc<RecordingView>) {
        let api = Arc::new(FakePostsApi::new());
        let cache = Arc::new(PostCache::new(api.clone()));
        let view = Arc::new(RecordingView::default());
        (api, PostController::new(cache, view.clone()), view)
    }

    fn create(title: &str, content: &str) -> UiIntent {
        UiIntent::Create {
            title: title.into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let (api, controller, view) = controller();

        controller.initialize().await;
        assert!(controller.is_initialized());
        assert_eq!(
            view.take(),
            vec![
                ViewCall::Loading(true),
                ViewCall::Render(vec![]),
                ViewCall::Loading(false),
            ]
        );

        controller.initialize().await;
        assert!(view.take().is_empty());
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn create_confirms_and_reloads() {
        let (_api, controller, view) = controller();
        controller.initialize().await;
        view.take();

        controller
            .handle(create("Hello", "This is a test post"))
            .await
            .unwrap();

        assert_eq!(
            view.take(),
            vec![
                ViewCall::Loading(true),
                ViewCall::Success("Post created successfully".into()),
                ViewCall::ResetForm,
                ViewCall::Loading(true),
                ViewCall::Render(vec![1]),
                ViewCall::Loading(false),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_api() {
        let (api, controller, view) = controller();
        controller.initialize().await;
        view.take();

        let err = controller.handle(create("ab", "short")).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(ref errors) if errors.len() == 2));
        assert!(matches!(view.take().as_slice(), [ViewCall::Error(_)]));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn edit_uses_the_local_copy() {
        let (api, controller, view) = controller();
        let cached = api.seed("Cached", "Loaded during initialize");
        controller.initialize().await;
        // Added after the load, so the cache is stale for this one.
        let stale = api.seed("Stale", "Not in the local copy");
        view.take();

        controller.handle(UiIntent::Edit { id: cached.id }).await.unwrap();
        assert_eq!(view.take(), vec![ViewCall::EditForm(cached.id)]);

        let err = controller
            .handle(UiIntent::Edit { id: stale.id })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotCached(id) if id == stale.id));
        assert_eq!(view.take(), vec![ViewCall::Error("Post not found".into())]);
    }

    #[tokio::test]
    async fn failed_delete_shows_error_and_clears_busy_state() {
        let (_api, controller, view) = controller();
        controller.initialize().await;
        view.take();

        let err = controller.handle(UiIntent::Delete { id: 404 }).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(
            view.take(),
            vec![
                ViewCall::Loading(true),
                ViewCall::Error("Post not found".into()),
                ViewCall::Loading(false),
            ]
        );
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let (api, controller, view) = controller();
        let post = api.seed("Original", "Original content here");
        controller.initialize().await;
        view.take();

        controller
            .handle(UiIntent::Update {
                id: post.id,
                title: "Edited".into(),
                content: "Edited content here".into(),
            })
            .await
            .unwrap();
        assert!(view.take().contains(&ViewCall::Success("Post updated successfully".into())));

        controller.handle(UiIntent::Delete { id: post.id }).await.unwrap();
        let calls = view.take();
        assert!(calls.contains(&ViewCall::Success("Post deleted successfully".into())));
        assert_eq!(calls.iter().rev().nth(1), Some(&ViewCall::Render(vec![])));
    }

    #[tokio::test]
    async fn run_processes_intents_in_order() {
        let (api, controller, _view) = controller();
        let (tx, rx) = mpsc::channel(8);

        tx.send(create("First", "First post content")).await.unwrap();
        tx.send(create("Second", "Second post content")).await.unwrap();
        tx.send(UiIntent::Delete { id: 1 }).await.unwrap();
        drop(tx);

        controller.run(rx).await;

        let remaining: Vec<_> = api.list_posts().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec![2]);
    }
}
