use super::*;

#[tokio::test]
async fn share_and_stop() {
    let app = app();

    let (status, location) = app
        .post(
            "/api/location/update",
            &json!({ "username": "lin", "latitude": 40.73, "longitude": -73.99 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location["username"], "lin");

    app.post(
        "/api/location/update",
        &json!({ "username": "ada", "latitude": 40.72, "longitude": -73.98 }),
    )
    .await;

    let (_, body) = app.get("/api/location/shared").await;
    let usernames: Vec<_> = body["locations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["username"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(usernames, vec!["ada", "lin"]);

    let (status, body) = app
        .post("/api/location/stop", &json!({ "username": "ada" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locations"].as_array().unwrap().len(), 1);

    assert_eq!(
        app.post(
            "/api/location/update",
            &json!({ "username": "kai", "latitude": 91.0, "longitude": 0.0 }),
        )
        .await
        .0,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn stream_starts_with_snapshot() {
    let app = app();
    app.post(
        "/api/location/update",
        &json!({ "username": "lin", "latitude": 40.73, "longitude": -73.99 }),
    )
    .await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/location/stream")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[http::header::CONTENT_TYPE],
        mime::TEXT_EVENT_STREAM.as_ref()
    );

    let mut body = res.into_body();
    let chunk = hyper::body::HttpBody::data(&mut body)
        .await
        .unwrap()
        .unwrap();
    let text = String::from_utf8(chunk.to_vec()).unwrap();
    assert!(text.starts_with("event: locations"));
    assert!(text.contains("\"username\":\"lin\""));
}
