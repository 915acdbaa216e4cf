/// Integration tests with a mocked backend
/// Exercises the API client and the favorites synchronizer end to end
/// without hitting a real server
use std::sync::Arc;
use std::time::Duration;

use leadscout::api_client::LeadApiClient;
use leadscout::errors::AppError;
use leadscout::favorites::FavoritesSync;
use leadscout::models::{LeadStatus, SearchCriteria};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> LeadApiClient {
    LeadApiClient::new(server.uri(), Duration::from_secs(5)).expect("client")
}

fn business_json(id: &str, score: u8, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Business {}", id),
        "business_type": "restaurant",
        "address": "1 Main St, Springfield",
        "phone": "555-0100",
        "website": "https://example.com",
        "email": null,
        "lat": 37.7749,
        "lon": -122.4194,
        "quality_score": score,
        "lead_status": status
    })
}

#[tokio::test]
async fn search_parses_businesses_and_location() {
    let mock_server = MockServer::start().await;

    let mock_response = serde_json::json!({
        "businesses": [business_json("b1", 85, "hot"), business_json("b2", 55, "cold")],
        "search_location": {"lat": 37.7749, "lon": -122.4194},
        "total": 2,
        "message": "Found 2 qualified leads"
    });

    Mock::given(method("POST"))
        .and(path("/api/search-businesses"))
        .and(body_json(serde_json::json!({
            "business_type": "restaurant",
            "location": "San Francisco, CA",
            "radius": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let criteria = SearchCriteria {
        business_type: "restaurant".to_string(),
        location: "San Francisco, CA".to_string(),
        radius: 10,
    };

    let response = client.search(&criteria).await.expect("search");
    assert_eq!(response.businesses.len(), 2);
    assert_eq!(response.businesses[0].lead_status, LeadStatus::Hot);
    assert_eq!(response.search_location.lat, 37.7749);
}

#[tokio::test]
async fn search_empty_result_is_ok_not_error() {
    let mock_server = MockServer::start().await;

    let mock_response = serde_json::json!({
        "businesses": [],
        "search_location": {"lat": 0.0, "lon": 0.0},
        "total": 0,
        "message": "Found 0 qualified leads"
    });

    Mock::given(method("POST"))
        .and(path("/api/search-businesses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let criteria = SearchCriteria {
        business_type: "saas".to_string(),
        location: "Nowhere".to_string(),
        radius: 5,
    };

    let response = client.search(&criteria).await.expect("search");
    assert!(response.businesses.is_empty());
}

#[tokio::test]
async fn search_server_error_surfaces_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search-businesses"))
        .respond_with(ResponseTemplate::new(500).set_body_string("geocoder exploded"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let criteria = SearchCriteria {
        business_type: "saas".to_string(),
        location: "San Francisco, CA".to_string(),
        radius: 10,
    };

    match client.search(&criteria).await {
        Err(AppError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("geocoder exploded"));
        }
        other => panic!("expected server error, got {:?}", other.map(|r| r.businesses.len())),
    }
}

#[tokio::test]
async fn out_of_range_radius_never_reaches_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search-businesses"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let criteria = SearchCriteria {
        business_type: "saas".to_string(),
        location: "San Francisco, CA".to_string(),
        radius: 99,
    };

    assert!(matches!(
        client.search(&criteria).await,
        Err(AppError::BadRequest(_))
    ));
}

#[tokio::test]
async fn business_types_are_cached_within_a_client() {
    let mock_server = MockServer::start().await;

    let mock_response = serde_json::json!({
        "business_types": [
            {"value": "restaurant", "label": "Restaurants"},
            {"value": "retail", "label": "Retail Stores"}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/business-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first = client.business_types().await.expect("first fetch");
    let second = client.business_types().await.expect("cached fetch");

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn export_csv_sends_both_query_params() {
    let mock_server = MockServer::start().await;

    let mock_response = serde_json::json!({
        "headers": ["Name", "Type"],
        "rows": [["Business b1", "restaurant"]],
        "filename": "leads_restaurant_20250101_000000.csv",
        "total": 1
    });

    Mock::given(method("GET"))
        .and(path("/api/export-csv"))
        .and(query_param("business_type", "restaurant"))
        .and(query_param("min_quality_score", "70"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let export = client.export_csv("restaurant", 70).await.expect("export");
    assert_eq!(export.rows.len(), 1);
    assert_eq!(export.filename, "leads_restaurant_20250101_000000.csv");
}

#[tokio::test]
async fn health_parses_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "message": "Lead Generation API is running"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let health = client.health().await.expect("health");
    assert_eq!(health.status, "healthy");
}

fn favorites_payload(entries: &[(&str, &str)]) -> serde_json::Value {
    let favorites: Vec<serde_json::Value> = entries
        .iter()
        .map(|(fav_id, business_id)| {
            let mut b = business_json(business_id, 85, "hot");
            b["favorite_id"] = serde_json::json!(fav_id);
            b
        })
        .collect();
    serde_json::json!({"favorites": favorites, "total": entries.len()})
}

#[tokio::test]
async fn add_favorite_posts_then_refetches_full_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/favorites"))
        .and(body_json(serde_json::json!({
            "business_id": "b1",
            "user_id": "default_user"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Added to favorites", "id": "f1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/favorites"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(favorites_payload(&[("f1", "b1")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(client_for(&mock_server));
    let favorites = FavoritesSync::new(client, "default_user");

    favorites.add_by_id("b1").await.expect("add");
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites.get("f1").unwrap().business.id, "b1");
}

#[tokio::test]
async fn failed_add_leaves_local_state_untouched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/favorites"))
        .respond_with(ResponseTemplate::new(500).set_body_string("insert failed"))
        .mount(&mock_server)
        .await;

    // The re-fetch must not happen after a failed mutation
    Mock::given(method("GET"))
        .and(path("/api/favorites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(favorites_payload(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Arc::new(client_for(&mock_server));
    let favorites = FavoritesSync::new(client, "default_user");

    // Seed local state through the normal apply path
    let seq = favorites.begin_refresh();
    let seeded: Vec<_> = serde_json::from_value(favorites_payload(&[("f9", "b9")])["favorites"].clone())
        .expect("seed records");
    assert!(favorites.apply_refresh(seq, seeded));

    let result = favorites.add_by_id("b1").await;
    assert!(result.is_err());
    assert_eq!(favorites.len(), 1);
    assert!(favorites.get("f9").is_some());
}

#[tokio::test]
async fn remove_favorite_deletes_then_refetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/favorites/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Removed from favorites"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/favorites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(favorites_payload(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(client_for(&mock_server));
    let favorites = FavoritesSync::new(client, "default_user");

    favorites.remove("f1").await.expect("remove");
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn out_of_order_refetches_keep_the_newest_payload() {
    // Two removals issued back to back: the first request's re-fetch
    // (sequence 1) arrives after the second's (sequence 2). The final state
    // must equal sequence 2's payload.
    let mock_server = MockServer::start().await;
    let client = Arc::new(client_for(&mock_server));
    let favorites = FavoritesSync::new(client, "default_user");

    let seq1 = favorites.begin_refresh();
    let seq2 = favorites.begin_refresh();

    let after_second: Vec<_> =
        serde_json::from_value(favorites_payload(&[("f3", "b3")])["favorites"].clone())
            .expect("records");
    let after_first: Vec<_> =
        serde_json::from_value(favorites_payload(&[("f2", "b2"), ("f3", "b3")])["favorites"].clone())
            .expect("records");

    assert!(favorites.apply_refresh(seq2, after_second));
    assert!(!favorites.apply_refresh(seq1, after_first));

    let snapshot = favorites.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].favorite_id, "f3");
}
