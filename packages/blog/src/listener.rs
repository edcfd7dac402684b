use crate::request::RequestContext;
use crate::types::Entity;

/// Callback fired by the storage layer once per hydrated entity, after its
/// persisted fields are populated and before it is returned to the caller.
///
/// Listeners receive every entity type the repository loads and must treat
/// types they do not care about as a no-op.
pub trait PostLoadListener: Send + Sync {
    fn post_load(&self, entity: &mut dyn Entity, request: &dyn RequestContext);
}

/// Pushes the locale of the in-flight request into localized entities.
///
/// Only the transient locale is touched; nothing is persisted or re-saved.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleActivationListener;

impl PostLoadListener for LocaleActivationListener {
    fn post_load(&self, entity: &mut dyn Entity, request: &dyn RequestContext) {
        let name = entity.entity_name();
        let Some(locale) = request.current_locale() else {
            return;
        };
        let Some(localized) = entity.as_localized_mut() else {
            return;
        };

        tracing::debug!("locale_activation.post_load: entity={} locale={}", name, locale);
        localized.set_locale(locale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::CurrentRequest;
    use crate::types::{Comment, HasLocale, Post};

    #[test]
    fn sets_request_locale_on_post() {
        let mut post = Post::new();
        post.set_title("Hello");
        post.set_locale("fr");
        post.set_title("Bonjour");
        post.set_locale("en");

        LocaleActivationListener.post_load(&mut post, &CurrentRequest::with_locale("fr"));

        assert_eq!(post.locale(), "fr");
        assert_eq!(post.title(), "Bonjour");
    }

    #[test]
    fn keeps_default_locale_without_request() {
        let mut post = Post::new();
        LocaleActivationListener.post_load(&mut post, &CurrentRequest::none());
        assert_eq!(post.locale(), "en");
    }

    #[test]
    fn ignores_entities_without_locale() {
        let mut comment = Comment::new("Nice post!", "reader@example.com");
        let before = comment.clone();

        LocaleActivationListener.post_load(&mut comment, &CurrentRequest::with_locale("fr"));

        assert_eq!(comment, before);
    }

    #[test]
    fn works_through_trait_objects() {
        let listener: Box<dyn PostLoadListener> = Box::new(LocaleActivationListener);
        let mut entities: Vec<Box<dyn Entity>> =
            vec![Box::new(Post::new()), Box::new(Comment::new("x", "a@b.c"))];

        for entity in &mut entities {
            listener.post_load(entity.as_mut(), &CurrentRequest::with_locale("fr"));
        }

        let post = entities[0].as_localized_mut().unwrap();
        assert_eq!(post.locale(), "fr");
        assert!(entities[1].as_localized_mut().is_none());
    }
}
