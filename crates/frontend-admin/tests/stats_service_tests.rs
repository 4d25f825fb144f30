use medadmin_core::RecordingNavigator;
use medadmin_frontend_admin::services::{DashboardStats, StatsService};
use medadmin_http::SessionClient;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SessionClient {
    SessionClient::builder()
        .base_url(server.uri())
        .navigator(Arc::new(RecordingNavigator::new()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_decodes_partial_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": { "total": 42, "trend": 12.5 },
            "revenue": { "total": 1999.5 },
            "recentActivity": [{ "action": "Hospital created", "timestamp": "2 hours ago" }]
        })))
        .mount(&server)
        .await;

    let stats = StatsService::new(client_for(&server)).fetch().await.unwrap();

    assert_eq!(stats.users.total, 42);
    assert_eq!(stats.users.trend, Some(12.5));
    assert_eq!(stats.bookings, Default::default());
    assert!((stats.revenue.total - 1999.5).abs() < f64::EPSILON);
    assert_eq!(stats.recent_activity[0].action, "Hospital created");
}

#[tokio::test]
async fn test_fetch_recovers_expired_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_access_token("stale");

    let stats = StatsService::new(client).fetch().await.unwrap();
    assert_eq!(stats, DashboardStats::default());
}

#[tokio::test]
async fn test_fetch_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Admins only" })),
        )
        .mount(&server)
        .await;

    let err = StatsService::new(client_for(&server)).fetch().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.message(), "Admins only");
}

#[tokio::test]
async fn test_retry_recovers_from_transient_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "users": { "total": 7 } })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = StatsService::new(client_for(&server))
        .fetch_with_retry(3)
        .await
        .unwrap();
    assert_eq!(stats.users.total, 7);
}

#[tokio::test]
async fn test_retry_gives_up_after_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    let err = StatsService::new(client_for(&server))
        .fetch_with_retry(3)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_retry_stops_when_session_cannot_be_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = StatsService::new(client_for(&server))
        .fetch_with_retry(3)
        .await
        .unwrap_err();
    assert!(err.is_refresh_failed());
}
