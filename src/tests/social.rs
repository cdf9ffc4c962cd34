use super::*;

#[tokio::test]
async fn study_groups() {
    let app = app();

    let (status, group) = app
        .post(
            "/api/social/study-groups",
            &json!({
                "name": "Compilers night",
                "subject": "Computer Science",
                "organizer": "ada",
                "maxMembers": 2,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(group["members"], json!(["ada"]));
    let id = group["id"].as_u64().unwrap();

    let join = |username: &str| json!({ "username": username });
    let (status, group) = app
        .post(&format!("/api/social/study-groups/{id}/join"), &join("lin"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(group["members"], json!(["ada", "lin"]));

    assert_eq!(
        app.post(&format!("/api/social/study-groups/{id}/join"), &join("kai"))
            .await
            .0,
        StatusCode::CONFLICT
    );

    let (_, groups) = app
        .get("/api/social/study-groups?subject=computer%20science")
        .await;
    assert_eq!(groups.as_array().unwrap().len(), 1);
    let (_, groups) = app.get("/api/social/study-groups?subject=History").await;
    assert!(groups.as_array().unwrap().is_empty());

    let (status, _) = app
        .post(
            "/api/social/study-groups",
            &json!({
                "name": "Too big",
                "subject": "History",
                "organizer": "ada",
                "maxMembers": 500,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn events_and_rsvp() {
    let app = app();

    let (status, event) = app
        .post(
            "/api/social/events",
            &json!({
                "title": "Board game night",
                "category": "games",
                "location": "Student Union",
                "startsAt": "2030-05-01T19:00:00Z",
                "organizer": "kai",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = event["id"].as_u64().unwrap();

    let (status, event) = app
        .post(
            &format!("/api/social/events/{id}/rsvp"),
            &json!({ "username": "lin" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["attendees"], json!(["kai", "lin"]));

    let (_, events) = app.get("/api/social/events?category=games").await;
    assert_eq!(events.as_array().unwrap().len(), 1);

    assert_eq!(
        app.post("/api/social/events/42/rsvp", &json!({ "username": "lin" }))
            .await
            .0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn connections_and_messages() {
    let app = app();

    let (status, conn) = app
        .post(
            "/api/social/connections",
            &json!({ "from": "ada", "to": "lin" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(conn["id"], "ada:lin");
    assert_eq!(conn["status"], "pending");

    assert_eq!(
        app.post(
            "/api/social/connections",
            &json!({ "from": "lin", "to": "ada" }),
        )
        .await
        .0,
        StatusCode::CONFLICT
    );
    assert_eq!(
        app.post(
            "/api/social/connections",
            &json!({ "from": "ada", "to": "ada" }),
        )
        .await
        .0,
        StatusCode::BAD_REQUEST
    );
    // would share the key "a:b:c" with a:b -> c
    assert_eq!(
        app.post(
            "/api/social/connections",
            &json!({ "from": "a", "to": "b:c" }),
        )
        .await
        .0,
        StatusCode::BAD_REQUEST
    );

    let (status, conn) = app
        .post("/api/social/connections/ada:lin/accept", &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(conn["status"], "accepted");

    let (_, conns) = app.get("/api/social/connections?user=lin").await;
    assert_eq!(conns.as_array().unwrap().len(), 1);

    let (status, message) = app
        .post(
            "/api/social/messages",
            &json!({ "from": "ada", "to": "lin", "content": "lunch?" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["read"], false);
    let id = message["id"].as_u64().unwrap();

    let (status, message) = app
        .post(&format!("/api/social/messages/{id}/read"), &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["read"], true);

    let (_, messages) = app.get("/api/social/messages?user=lin&with=ada").await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
    let (_, messages) = app.get("/api/social/messages?user=kai").await;
    assert!(messages.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn roommates() {
    let app = app();

    let (status, all) = app.get("/api/social/roommates").await;
    assert_eq!(status, StatusCode::OK);
    let total = all.as_array().unwrap().len();
    assert!(total > 0);

    let (_, late) = app.get("/api/social/roommates?sleepSchedule=late").await;
    let late = late.as_array().unwrap();
    assert!(!late.is_empty() && late.len() < total);
    assert!(late.iter().all(|p| p["sleepSchedule"] == "late"));
}
