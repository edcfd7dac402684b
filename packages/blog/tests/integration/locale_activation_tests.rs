use blog::test_utils::TestContext;
use std::sync::{Arc, Mutex};
use blog::{
    Comment, CurrentRequest, Entity, LocaleActivationListener, LocaleConfig, Post,
    PostLoadListener, PostRepository, RequestContext,
};

/// A request provider backed by something other than `CurrentRequest`.
struct RouteLocale(&'static str);

impl RequestContext for RouteLocale {
    fn current_locale(&self) -> Option<&str> {
        Some(self.0)
    }
}

/// Records which entities it saw, to check dispatch order and coverage.
struct Recorder(Arc<Mutex<Vec<&'static str>>>);

impl PostLoadListener for Recorder {
    fn post_load(&self, entity: &mut dyn Entity, _request: &dyn RequestContext) {
        self.0.lock().unwrap().push(entity.entity_name());
    }
}

fn post_with(en: &str, fr: &str) -> Post {
    let mut post = Post::new();
    post.set_slug("greeting");
    post.set_author_email("anna_admin@local.dev");
    post.set_title(en);
    post.set_locale("fr");
    post.set_title(fr);
    post
}

#[tokio::test]
async fn negotiated_request_drives_accessors() {
    let ctx = TestContext::new().await;
    let repo = PostRepository::new(ctx.pool.clone()).with_listener(LocaleActivationListener);
    repo.save(&post_with("Hello", "Bonjour")).await.unwrap();

    let locales = LocaleConfig::default();
    let request = CurrentRequest::negotiate(Some("fr-BE,fr;q=0.9"), &locales);
    let post = repo
        .find_by_slug("greeting", &request)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.title(), "Bonjour");

    let request = CurrentRequest::negotiate(Some("ja"), &locales);
    let post = repo
        .find_by_slug("greeting", &request)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.title(), "Hello");
}

#[tokio::test]
async fn custom_request_context_is_honored() {
    let ctx = TestContext::new().await;
    let repo = PostRepository::new(ctx.pool.clone()).with_listener(LocaleActivationListener);
    let saved = post_with("Hello", "Bonjour");
    repo.save(&saved).await.unwrap();

    let post = repo
        .find(saved.id(), &RouteLocale("fr"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.locale(), "fr");
    assert_eq!(post.title(), "Bonjour");
}

#[tokio::test]
async fn listeners_see_each_loaded_entity_once() {
    let ctx = TestContext::new().await;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let repo = PostRepository::new(ctx.pool.clone())
        .with_listener(Recorder(seen.clone()))
        .with_listener(LocaleActivationListener);

    let mut saved = post_with("Hello", "Bonjour");
    saved.add_comment(Comment::new("First", "a@local.dev"));
    saved.add_comment(Comment::new("Second", "b@local.dev"));
    repo.save(&saved).await.unwrap();

    let post = repo
        .find(saved.id(), &CurrentRequest::with_locale("fr"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["comment", "comment", "post"]
    );
    assert_eq!(post.locale(), "fr");
    assert_eq!(post.comments().len(), 2);
}

#[tokio::test]
async fn no_listener_means_default_locale() {
    let ctx = TestContext::new().await;
    let repo = PostRepository::new(ctx.pool.clone());
    let saved = post_with("Hello", "Bonjour");
    repo.save(&saved).await.unwrap();

    let post = repo
        .find(saved.id(), &CurrentRequest::with_locale("fr"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.locale(), "en");
    assert_eq!(post.title(), "Hello");
}
