mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use shorty::domain::entities::LinkStatus;

use common::{API, from_ip, test_server};

fn report_body(shorty: &str) -> Value {
    json!({
        "email": "reporter@example.com",
        "shorty": shorty,
        "detail": "This page imitates a bank login form"
    })
}

#[tokio::test]
async fn test_report_accepted() {
    let (server, stores) = test_server();
    stores
        .links
        .insert("Phish", "https://evil.example/bank", LinkStatus::Active);

    let response = from_ip(server.post(&format!("{API}/report")), "203.0.113.50")
        .json(&report_body("https://shorty.co/Phish"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert!(body["reportId"].as_i64().is_some());
    assert_eq!(
        body["message"],
        "Report submitted successfully. We will review it shortly."
    );

    let reports = stores.reports.all();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].short_code, "Phish");
    assert_eq!(reports[0].reporter_ip, "203.0.113.50");
    assert_eq!(
        stores.links.by_code("Phish").unwrap().status,
        LinkStatus::Active
    );
}

#[tokio::test]
async fn test_report_accepts_long_field_names() {
    let (server, stores) = test_server();
    stores
        .links
        .insert("Phish", "https://evil.example/bank", LinkStatus::Active);

    let response = from_ip(server.post(&format!("{API}/report")), "203.0.113.51")
        .json(&json!({
            "reporterEmail": "reporter@example.com",
            "shortCode": "Phish",
            "detail": "This page imitates a bank login form"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let reports = stores.reports.all();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].reporter_email, "reporter@example.com");
}

#[tokio::test]
async fn test_third_report_blacklists_link() {
    let (server, stores) = test_server();
    stores
        .links
        .insert("Phish", "https://evil.example/bank", LinkStatus::Active);

    for ip in ["198.51.100.1", "198.51.100.2"] {
        from_ip(server.post(&format!("{API}/report")), ip)
            .json(&report_body("Phish"))
            .await
            .assert_status(StatusCode::CREATED);
    }
    assert_eq!(
        stores.links.by_code("Phish").unwrap().status,
        LinkStatus::Active
    );

    from_ip(server.post(&format!("{API}/report")), "198.51.100.3")
        .json(&report_body("https://shorty.co/Phish"))
        .await
        .assert_status(StatusCode::CREATED);
    assert_eq!(
        stores.links.by_code("Phish").unwrap().status,
        LinkStatus::Blacklisted
    );

    let clicks_before = stores.links.by_code("Phish").unwrap().click_count;
    server
        .get("/Phish")
        .await
        .assert_status(StatusCode::GONE);
    assert_eq!(
        stores.links.by_code("Phish").unwrap().click_count,
        clicks_before
    );

    server
        .post(&format!("{API}/generate"))
        .json(&json!({ "url": "https://evil.example/bank" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_report_from_same_client() {
    let (server, stores) = test_server();
    stores
        .links
        .insert("Phish", "https://evil.example/bank", LinkStatus::Active);

    from_ip(server.post(&format!("{API}/report")), "203.0.113.77")
        .json(&report_body("Phish"))
        .await
        .assert_status(StatusCode::CREATED);

    let duplicate = from_ip(server.post(&format!("{API}/report")), "203.0.113.77")
        .json(&report_body("Phish"))
        .await;

    duplicate.assert_status(StatusCode::CONFLICT);
    assert_eq!(duplicate.json::<Value>()["kind"], "conflict");
    assert_eq!(stores.reports.all().len(), 1);
}

#[tokio::test]
async fn test_report_unknown_or_malformed_code() {
    let (server, stores) = test_server();

    from_ip(server.post(&format!("{API}/report")), "203.0.113.60")
        .json(&report_body("https://shorty.co/NoSuch"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    from_ip(server.post(&format!("{API}/report")), "203.0.113.61")
        .json(&report_body("https://shorty.co/NoSch"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    from_ip(server.post(&format!("{API}/report")), "203.0.113.62")
        .json(&report_body("https://other.example/AbC12"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(stores.reports.all().is_empty());
}

#[tokio::test]
async fn test_report_validation() {
    let (server, _) = test_server();

    let response = server
        .post(&format!("{API}/report"))
        .json(&json!({
            "email": "not-an-email",
            "shorty": "AbC12",
            "detail": "short"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "invalid_input");
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["detail"].is_array());
}

#[tokio::test]
async fn test_report_status_visible_to_reporter_only() {
    let (server, stores) = test_server();
    stores
        .links
        .insert("Phish", "https://evil.example/bank", LinkStatus::Active);

    let created = from_ip(server.post(&format!("{API}/report")), "203.0.113.90")
        .json(&report_body("Phish"))
        .await
        .json::<Value>();
    let id = created["reportId"].as_i64().unwrap();

    let own = from_ip(server.get(&format!("{API}/report/status/{id}")), "203.0.113.90").await;
    own.assert_status_ok();
    let body = own.json::<Value>();
    assert_eq!(body["reportId"], id);
    assert_eq!(body["shortCode"], "Phish");
    assert_eq!(body["status"], "pending");

    from_ip(server.get(&format!("{API}/report/status/{id}")), "203.0.113.91")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
