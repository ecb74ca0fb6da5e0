use shorty::application::services::{LinkService, LinkSettings};
use shorty::domain::RequestContext;
use shorty::domain::entities::{LinkStatus, NewLink};
use shorty::domain::repositories::{
    ACTIVE_LONG_URL_CONSTRAINT, LinkRepository, SHORT_CODE_CONSTRAINT,
};
use shorty::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::task::JoinSet;

fn new_link(code: &str, long_url: &str) -> NewLink {
    NewLink {
        long_url: long_url.to_string(),
        short_code: code.to_string(),
        creator_ip: Some("203.0.113.1".to_string()),
        creator_user_agent: Some("test-agent".to_string()),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("AbC12", "https://example.com/a"))
        .await
        .unwrap();

    assert_eq!(link.status, LinkStatus::Active);
    assert_eq!(link.click_count, 0);

    let found = repo.find_by_code("AbC12").await.unwrap().unwrap();
    assert_eq!(found.id, link.id);
    assert_eq!(found.creator_ip.as_deref(), Some("203.0.113.1"));
    assert!(repo.find_by_code("ZZZZZ").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_unique_constraints_are_named(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("AbC12", "https://example.com/a"))
        .await
        .unwrap();

    let same_code = repo
        .create(new_link("AbC12", "https://example.com/b"))
        .await
        .unwrap_err();
    assert!(same_code.is_conflict_on(SHORT_CODE_CONSTRAINT));

    let same_url = repo
        .create(new_link("XyZ98", "https://example.com/a"))
        .await
        .unwrap_err();
    assert!(same_url.is_conflict_on(ACTIVE_LONG_URL_CONSTRAINT));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_expired_url_can_be_reissued(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let old = repo
        .create(new_link("Old01", "https://example.com/a"))
        .await
        .unwrap();
    assert!(repo.expire(old.id).await.unwrap());

    let fresh = repo
        .create(new_link("New01", "https://example.com/a"))
        .await
        .unwrap();

    let preferred = repo
        .find_by_long_url("https://example.com/a")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(preferred.id, fresh.id);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_blacklisted_link_takes_precedence(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let first = repo
        .create(new_link("Old01", "https://example.com/a"))
        .await
        .unwrap();
    repo.expire(first.id).await.unwrap();
    let second = repo
        .create(new_link("New01", "https://example.com/a"))
        .await
        .unwrap();
    assert!(repo.blacklist(second.id).await.unwrap());

    let preferred = repo
        .find_by_long_url("https://example.com/a")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(preferred.status, LinkStatus::Blacklisted);

    // Blacklisting is terminal.
    assert!(!repo.expire(second.id).await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_counters(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo
        .create(new_link("AbC12", "https://example.com/a"))
        .await
        .unwrap();

    for _ in 0..3 {
        repo.increment_clicks(link.id).await.unwrap();
    }
    assert_eq!(repo.increment_qr("AbC12").await.unwrap(), Some(1));
    assert_eq!(repo.increment_qr("AbC12").await.unwrap(), Some(2));
    assert_eq!(repo.increment_qr("ZZZZZ").await.unwrap(), None);

    let link = repo.find_by_code("AbC12").await.unwrap().unwrap();
    assert_eq!(link.click_count, 3);
    assert_eq!(link.qr_generated_count, 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_clicks_are_all_counted(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let link = repo
        .create(new_link("Burst", "https://example.com/burst"))
        .await
        .unwrap();

    let mut tasks = JoinSet::new();
    for _ in 0..100 {
        let repo = repo.clone();
        tasks.spawn(async move { repo.increment_clicks(link.id).await });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
    }

    let link = repo.find_by_code("Burst").await.unwrap().unwrap();
    assert_eq!(link.click_count, 100);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_issuance_creates_one_active_link(pool: PgPool) {
    let links = Arc::new(LinkService::new(
        Arc::new(PgLinkRepository::new(Arc::new(pool))),
        LinkSettings::default(),
    ));

    let mut tasks = JoinSet::new();
    for _ in 0..20 {
        let links = links.clone();
        tasks.spawn(async move {
            links
                .issue("https://example.com/popular", &RequestContext::default())
                .await
        });
    }

    let mut codes = Vec::new();
    let mut created = 0;
    while let Some(joined) = tasks.join_next().await {
        let issued = joined.unwrap().unwrap();
        if !issued.is_existing {
            created += 1;
        }
        codes.push(issued.link.short_code);
    }

    assert_eq!(created, 1);
    codes.dedup();
    assert_eq!(codes.len(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_overview_and_listings(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let quiet = repo
        .create(new_link("Quiet", "https://example.com/q"))
        .await
        .unwrap();
    let busy = repo
        .create(new_link("Busy1", "https://example.com/b"))
        .await
        .unwrap();
    let flagged = repo
        .create(new_link("Flag1", "https://example.com/f"))
        .await
        .unwrap();
    repo.blacklist(flagged.id).await.unwrap();
    repo.increment_clicks(busy.id).await.unwrap();
    repo.increment_clicks(busy.id).await.unwrap();

    let overview = repo.overview().await.unwrap();
    assert_eq!(overview.total_links, 3);
    assert_eq!(overview.total_clicks, 2);
    assert_eq!(overview.total_blacklisted, 1);
    assert_eq!(overview.created_today, 3);

    let top = repo.top_performing(10).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].id, busy.id);

    let recent = repo.recent(1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_ne!(recent[0].id, quiet.id);

    let per_day = repo.created_per_day(7).await.unwrap();
    assert_eq!(per_day.iter().map(|d| d.count).sum::<i64>(), 3);

    repo.ping().await.unwrap();
}
