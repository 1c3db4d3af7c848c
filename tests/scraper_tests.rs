use mockito::Matcher;
use reddit_persona::models::RecordKind;
use reddit_persona::scraper::{FetchStatus, RedditScraper};
use reddit_persona::config::RedditSettings;
use serde_json::json;

mod common;
use common::test_helpers::*;

const POSTS_PATH: &str = "/user/kojied/submitted.json";
const COMMENTS_PATH: &str = "/user/kojied/comments.json";

fn first_page() -> Matcher {
    Matcher::Regex("^limit=100$".into())
}

fn page_after(cursor: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("limit".into(), "100".into()),
        Matcher::UrlEncoded("after".into(), cursor.into()),
    ])
}

#[tokio::test]
async fn test_single_page_without_cursor() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", POSTS_PATH)
        .match_query(first_page())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing_body(
            &[post_item("a", "rust", "First", ""), post_item("b", "rust", "Second", "Body")],
            None,
        ))
        .expect(1)
        .create_async()
        .await;

    let scraper = RedditScraper::new(test_settings(&server.url())).unwrap();
    let url = scraper.listing_url("kojied", RecordKind::Post).unwrap();
    let outcome = scraper.fetch(&url, RecordKind::Post).await;

    mock.assert_async().await;
    assert_eq!(outcome.status, FetchStatus::Exhausted);
    assert_eq!(outcome.pages, 1);
    let ids: Vec<_> = outcome.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(outcome.records[0].content(), "First");
    assert_eq!(outcome.records[1].content(), "Body");
}

#[tokio::test]
async fn test_follows_cursor_across_pages() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let page1 = server.mock("GET", POSTS_PATH)
        .match_query(first_page())
        .with_status(200)
        .with_body(listing_body(&[post_item("a", "rust", "A", ""), post_item("b", "rust", "B", "")], Some("t3_b")))
        .expect(1)
        .create_async()
        .await;
    let page2 = server.mock("GET", POSTS_PATH)
        .match_query(page_after("t3_b"))
        .with_status(200)
        .with_body(listing_body(&[post_item("c", "golang", "C", "")], None))
        .expect(1)
        .create_async()
        .await;

    let scraper = RedditScraper::new(test_settings(&server.url())).unwrap();
    let url = scraper.listing_url("kojied", RecordKind::Post).unwrap();
    let outcome = scraper.fetch(&url, RecordKind::Post).await;

    page1.assert_async().await;
    page2.assert_async().await;
    assert_eq!(outcome.status, FetchStatus::Exhausted);
    assert_eq!(outcome.pages, 2);
    let ids: Vec<_> = outcome.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_page_cap_bounds_endless_cursor() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", COMMENTS_PATH)
        .match_query(Matcher::UrlEncoded("limit".into(), "100".into()))
        .with_status(200)
        .with_body(listing_body(&[comment_item("x", "rust", "again")], Some("t1_forever")))
        .expect(10)
        .create_async()
        .await;

    let scraper = RedditScraper::new(test_settings(&server.url())).unwrap();
    let url = scraper.listing_url("kojied", RecordKind::Comment).unwrap();
    let outcome = scraper.fetch(&url, RecordKind::Comment).await;

    mock.assert_async().await;
    assert_eq!(outcome.status, FetchStatus::PageCapReached);
    assert_eq!(outcome.pages, 10);
    assert_eq!(outcome.records.len(), 10);
}

#[tokio::test]
async fn test_configured_page_cap() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", COMMENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(listing_body(&[comment_item("x", "rust", "again")], Some("t1_forever")))
        .expect(3)
        .create_async()
        .await;

    let settings = RedditSettings {
        max_pages: 3,
        ..test_settings(&server.url())
    };
    let scraper = RedditScraper::new(settings).unwrap();
    let url = scraper.listing_url("kojied", RecordKind::Comment).unwrap();
    let outcome = scraper.fetch(&url, RecordKind::Comment).await;

    mock.assert_async().await;
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.status, FetchStatus::PageCapReached);
}

#[tokio::test]
async fn test_empty_children_stops_despite_cursor() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", POSTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(listing_body(&[], Some("t3_more")))
        .expect(1)
        .create_async()
        .await;

    let scraper = RedditScraper::new(test_settings(&server.url())).unwrap();
    let url = scraper.listing_url("kojied", RecordKind::Post).unwrap();
    let outcome = scraper.fetch(&url, RecordKind::Post).await;

    mock.assert_async().await;
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.status, FetchStatus::Exhausted);
    assert!(!outcome.is_degraded());
}

#[tokio::test]
async fn test_error_mid_walk_keeps_earlier_pages() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let _page1 = server.mock("GET", POSTS_PATH)
        .match_query(first_page())
        .with_status(200)
        .with_body(listing_body(&[post_item("a", "rust", "A", "")], Some("t3_a")))
        .create_async()
        .await;
    let _page2 = server.mock("GET", POSTS_PATH)
        .match_query(page_after("t3_a"))
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let scraper = RedditScraper::new(test_settings(&server.url())).unwrap();
    let url = scraper.listing_url("kojied", RecordKind::Post).unwrap();
    let outcome = scraper.fetch(&url, RecordKind::Post).await;

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.pages, 1);
    assert!(matches!(&outcome.status, FetchStatus::Aborted(reason) if reason.contains("500")));
    assert!(outcome.is_degraded());
    assert!(!outcome.is_total_failure());
}

#[tokio::test]
async fn test_first_page_failure_is_empty_not_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server.mock("GET", POSTS_PATH)
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "Not Found", "error": 404}"#)
        .create_async()
        .await;

    let scraper = RedditScraper::new(test_settings(&server.url())).unwrap();
    let url = scraper.listing_url("kojied", RecordKind::Post).unwrap();
    let outcome = scraper.fetch(&url, RecordKind::Post).await;

    assert!(outcome.records.is_empty());
    assert!(outcome.is_total_failure());
}

#[tokio::test]
async fn test_malformed_body_aborts() {
    let mut server = mockito::Server::new_async().await;
    let _m = server.mock("GET", POSTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>rate limited</html>")
        .create_async()
        .await;

    let scraper = RedditScraper::new(test_settings(&server.url())).unwrap();
    let url = scraper.listing_url("kojied", RecordKind::Post).unwrap();
    let outcome = scraper.fetch(&url, RecordKind::Post).await;

    assert!(outcome.records.is_empty());
    assert!(matches!(outcome.status, FetchStatus::Aborted(_)));
}

#[tokio::test]
async fn test_malformed_items_are_skipped() {
    let mut server = mockito::Server::new_async().await;
    let children = [
        post_item("a", "rust", "A", ""),
        json!(42),
        json!({ "kind": "t3" }),
        json!({ "kind": "t3", "data": {} }),
        post_item("b", "rust", "B", ""),
    ];
    let _m = server.mock("GET", POSTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(listing_body(&children, None))
        .create_async()
        .await;

    let scraper = RedditScraper::new(test_settings(&server.url())).unwrap();
    let url = scraper.listing_url("kojied", RecordKind::Post).unwrap();
    let outcome = scraper.fetch(&url, RecordKind::Post).await;

    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.skipped_items, 2);
    assert_eq!(outcome.records[1].score, 0);
    assert_eq!(outcome.records[1].content(), "");
    assert_eq!(outcome.status, FetchStatus::Exhausted);
    assert!(outcome.is_degraded());
}

#[tokio::test]
async fn test_scrape_user_data_posts_then_comments() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let _posts = server.mock("GET", POSTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(listing_body(&[post_item("p1", "rust", "Title", "")], None))
        .create_async()
        .await;
    let _comments = server.mock("GET", COMMENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(listing_body(
            &[comment_item("c1", "rust", "Nice"), comment_item("c2", "cats", "Cute")],
            None,
        ))
        .create_async()
        .await;

    let scraper = RedditScraper::new(test_settings(&server.url())).unwrap();
    let report = scraper.scrape_user_data("kojied").await.unwrap();

    assert_eq!(report.dataset.username, "kojied");
    assert_eq!(report.dataset.posts.len(), 1);
    assert_eq!(report.dataset.comments.len(), 2);
    assert_eq!(report.dataset.posts[0].kind(), RecordKind::Post);
    assert_eq!(report.dataset.comments[1].content(), "Cute");
    assert_eq!(report.posts.status, FetchStatus::Exhausted);
    assert_eq!(report.comments.pages, 1);
}
