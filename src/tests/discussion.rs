use super::*;

#[tokio::test]
async fn threads() {
    let app = app();

    let (status, discussion) = app
        .post(
            "/api/discussions",
            &json!({
                "title": "Library hours",
                "content": "Should the library stay open until 2am?",
                "author": "ada",
                "category": "campus",
                "tags": ["library"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = discussion["id"].as_u64().unwrap();

    let comments = format!("/api/discussions/{id}/comments");
    let (status, root) = app
        .post(&comments, &json!({ "author": "lin", "content": "Yes please." }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let root_id = root["id"].as_u64().unwrap();

    let (status, reply) = app
        .post(
            &comments,
            &json!({ "parentId": root_id, "author": "kai", "content": "Seconded." }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["parentId"], root_id);

    assert_eq!(
        app.post(
            &comments,
            &json!({ "parentId": 999, "author": "kai", "content": "Lost." }),
        )
        .await
        .0,
        StatusCode::NOT_FOUND
    );

    let (_, all) = app.get(&comments).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    let (_, replies) = app.get(&format!("{comments}?parentId={root_id}")).await;
    assert_eq!(replies.as_array().unwrap().len(), 1);

    let (status, thread) = app.get(&format!("/api/discussions/{id}/thread")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(thread.as_array().unwrap().len(), 1);
    assert_eq!(thread[0]["content"], "Yes please.");
    assert_eq!(thread[0]["replies"][0]["author"], "kai");

    let (_, listed) = app.get("/api/discussions?category=campus").await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(
        app.get("/api/discussions/999/thread").await.0,
        StatusCode::NOT_FOUND
    );
}
