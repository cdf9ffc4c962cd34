use super::*;

#[tokio::test]
async fn resources() {
    let app = app();

    let (status, body) = app.get("/api/safety/resources?category=EMERGENCY").await;
    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert!(!found.is_empty());
    assert!(found.iter().all(|r| r["category"] == "emergency"));

    let (status, created) = app
        .post(
            "/api/safety/resources",
            &json!({
                "name": "Night Shuttle",
                "category": "transport",
                "description": "Door to door rides after 10pm.",
                "phone": "555-0140",
                "available24x7": false,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["isActive"], true);

    let id = created["id"].as_u64().unwrap();
    let (status, body) = app.get(&format!("/api/safety/resources/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Night Shuttle");

    assert_eq!(
        app.get("/api/safety/resources/9999").await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.get("/api/safety/resources/abc").await.0,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn alerts() {
    let app = app();

    let (status, _) = app
        .post(
            "/api/safety/alerts",
            &json!({
                "title": "Power outage",
                "message": "Science Center has no power.",
                "severity": "high",
                "category": "facilities",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/safety/alerts",
            &json!({
                "title": "Drill",
                "message": "Fire drill in the union.",
                "severity": "low",
                "category": "drill",
                "activeFrom": "2020-01-01T10:00:00Z",
                "activeUntil": "2020-01-01T11:00:00Z",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/safety/alerts",
            &json!({
                "title": "Backwards",
                "message": "Ends before it starts.",
                "severity": "low",
                "category": "drill",
                "activeFrom": "2020-01-01T11:00:00Z",
                "activeUntil": "2020-01-01T10:00:00Z",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, all) = app.get("/api/safety/alerts").await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["severity"], "high");

    let (_, active) = app.get("/api/safety/alerts?active=true").await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["title"], "Power outage");

    let (_, low) = app.get("/api/safety/alerts?severity=low").await;
    assert_eq!(low.as_array().unwrap().len(), 1);

    assert_eq!(
        app.get("/api/safety/alerts?severity=apocalyptic").await.0,
        StatusCode::BAD_REQUEST
    );
}
