use crate::posts::PostRepository;
use crate::types::{Comment, Post};
use anyhow::{Context, Result};
use sqlx::{Any, Pool};
use time::{Duration, OffsetDateTime};

const AUTHOR_EMAIL: &str = "anna_admin@local.dev";

/// (slug, [en title, en summary, en content], [fr title, fr summary, fr content])
type SeedPost = (&'static str, [&'static str; 3], [&'static str; 3]);

const POSTS: &[SeedPost] = &[
    (
        "four-day-week",
        [
            "Moving to a four-day week",
            "Why we are trying 32 hours over 4 days.",
            "Shorter weeks, same pay: here is what the first month taught us.",
        ],
        [
            "Passer à la semaine de 4 jours",
            "Pourquoi nous testons 32 heures sur 4 jours.",
            "Des semaines plus courtes, même salaire : le bilan du premier mois.",
        ],
    ),
    (
        "free-public-transport",
        [
            "Free public transport",
            "What happens when buses stop charging fares.",
            "Ridership, funding and congestion after a year of free buses.",
        ],
        [
            "Transports en commun gratuits",
            "Ce qui change quand les bus deviennent gratuits.",
            "Fréquentation, financement et embouteillages après un an de bus gratuits.",
        ],
    ),
    (
        "building-retrofits",
        [
            "Retrofitting old buildings",
            "Insulation first, heat pumps second.",
            "A practical order of operations for renovating pre-war housing.",
        ],
        [
            "Rénover les vieux bâtiments",
            "L'isolation d'abord, la pompe à chaleur ensuite.",
            "Un ordre de travaux concret pour rénover les logements d'avant-guerre.",
        ],
    ),
];

const COMMENTS: &[(&str, &str)] = &[
    ("bob@local.dev", "Great write-up, thanks for sharing the numbers."),
    ("claire@local.dev", "Merci, très clair. Des chiffres sur l'hiver ?"),
];

pub async fn seed_database(pool: &Pool<Any>) -> Result<()> {
    tracing::info!("Starting database seeding...");

    let repo = PostRepository::new(pool.clone());
    let now = OffsetDateTime::now_utc();

    for (idx, (slug, en, fr)) in POSTS.iter().enumerate() {
        let mut post = Post::new();
        post.set_slug(*slug);
        post.set_author_email(AUTHOR_EMAIL);
        post.set_published_at(now - Duration::days(idx as i64 + 1));

        for (locale, [title, summary, content]) in [("en", en), ("fr", fr)] {
            post.set_locale(locale);
            post.set_title(*title);
            post.set_summary(*summary);
            post.set_content(*content);
        }
        post.set_locale("en");

        for (offset, (email, text)) in COMMENTS.iter().enumerate() {
            let mut comment = Comment::new(*text, *email);
            comment.published_at = post.published_at() + Duration::hours(offset as i64 + 1);
            post.add_comment(comment);
        }

        repo.save(&post)
            .await
            .with_context(|| format!("Failed to seed post {slug}"))?;
    }

    tracing::info!("Created {} posts", POSTS.len());
    tracing::info!("Database seeding completed successfully");
    Ok(())
}
