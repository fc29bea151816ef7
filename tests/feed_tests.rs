use donorlink::core::emergency::{BloodType, Urgency, filter_emergencies};
use donorlink::feed::{BundledFeed, EmergencyFeed, FeedError, HttpFeed};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_http_feed_reads_array() {
    let server = MockServer::start().await;
    let body = serde_json::json!([
        {
            "id": "req-1",
            "bloodType": "O-",
            "urgency": "Critical",
            "location": "Hyderabad",
            "hospital": "Osmania General Hospital",
            "unitsNeeded": 4,
            "postedAt": "2026-10-18T06:30:00Z"
        },
        {"bloodType": "A+", "urgency": "Low", "location": "Delhi"}
    ]);
    Mock::given(method("GET"))
        .and(path("/emergencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let feed = HttpFeed::new(format!("{}/emergencies", server.uri()));
    let records = feed.fetch().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].blood_type, BloodType::ONeg);
    assert_eq!(records[0].units_needed, Some(4));
    assert!(records[0].posted_at.is_some());
    assert_eq!(records[1].hospital, None);
}

#[tokio::test]
async fn test_http_feed_reads_wrapped_object_and_skips_bad_rows() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "emergencies": [
            {"bloodType": "B+", "urgency": "High", "location": "Chennai"},
            {"bloodType": "B+", "location": "no urgency"}
        ]
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let records = HttpFeed::new(server.uri()).fetch().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].urgency, Urgency::High);
}

#[tokio::test]
async fn test_http_feed_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let err = HttpFeed::new(server.uri()).fetch().await.unwrap_err();
    assert!(matches!(err, FeedError::Http { status: 500, .. }));
}

#[tokio::test]
async fn test_bundled_feed_filters_like_the_board() {
    let records = BundledFeed.fetch().await.unwrap();
    assert!(!records.is_empty());

    let hyderabad = filter_emergencies(&records, "location", Some("hyderabad"));
    assert!(!hyderabad.is_empty());
    assert!(hyderabad.iter().all(|r| r.location.to_lowercase().contains("hyderabad")));

    let all = filter_emergencies(&records, "urgency", Some("All"));
    assert_eq!(all.len(), records.len());
}
