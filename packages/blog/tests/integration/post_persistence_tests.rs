use blog::test_utils::TestContext;
use blog::{CurrentRequest, LocaleActivationListener, Post, PostRepository};

#[tokio::test]
async fn every_locale_survives_a_round_trip() {
    let ctx = TestContext::new().await;
    let repo = PostRepository::new(ctx.pool.clone()).with_listener(LocaleActivationListener);

    let mut post = Post::new();
    post.set_slug("round-trip");
    post.set_author_email("anna_admin@local.dev");
    for (locale, title, content) in [
        ("en", "Title", "Some english content"),
        ("fr", "Titre", "Du contenu en français"),
        ("pt-BR", "Título", ""),
    ] {
        post.set_locale(locale);
        post.set_title(title);
        post.set_content(content);
    }
    repo.save(&post).await.unwrap();

    let loaded = repo
        .find(post.id(), &CurrentRequest::with_locale("pt-BR"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(loaded.title(), "Título");
    assert_eq!(loaded.content(), "");
    assert!(loaded.content_translations().contains("pt-BR"));
    assert!(!loaded.summary_translations().contains("pt-BR"));
    assert_eq!(loaded.title_translations(), post.title_translations());
    assert_eq!(loaded.content_translations(), post.content_translations());
}

#[tokio::test]
async fn updating_one_locale_keeps_the_others() {
    let ctx = TestContext::new().await;
    let repo = PostRepository::new(ctx.pool.clone()).with_listener(LocaleActivationListener);

    let mut post = Post::new();
    post.set_slug("update");
    post.set_title("Draft");
    post.set_locale("fr");
    post.set_title("Brouillon");
    repo.save(&post).await.unwrap();

    let mut editing = repo
        .find(post.id(), &CurrentRequest::with_locale("fr"))
        .await
        .unwrap()
        .unwrap();
    editing.set_title("Version finale");
    repo.save(&editing).await.unwrap();

    let reloaded = repo
        .find(post.id(), &CurrentRequest::none())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.title(), "Draft");
    assert_eq!(reloaded.title_translations().get("fr"), "Version finale");
}

#[tokio::test]
async fn missing_posts_are_none() {
    let ctx = TestContext::new().await;
    let repo = PostRepository::new(ctx.pool.clone());

    assert!(repo
        .find(uuid::Uuid::new_v4(), &CurrentRequest::none())
        .await
        .unwrap()
        .is_none());
    assert!(repo
        .find_by_slug("nope", &CurrentRequest::none())
        .await
        .unwrap()
        .is_none());
    assert!(repo
        .find_latest(&CurrentRequest::none())
        .await
        .unwrap()
        .is_empty());
}
