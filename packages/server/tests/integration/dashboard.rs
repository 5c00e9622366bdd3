use serde_json::json;

use crate::common::{TestApp, newest, routes};

#[tokio::test]
async fn stats_count_total_and_published_rows() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    for name in ["Ada", "Grace", "Linus"] {
        app.post_without_token(routes::TEAM, &json!({"name": name, "role": "Mentor"}))
            .await;
    }
    let res = app.get(routes::TEAM).await;
    let id = newest(&res.body)["id"].as_i64().unwrap() as i32;
    app.patch_without_token(&routes::publish(routes::TEAM, id), &json!({"isActive": false}))
        .await;

    app.register_media(&token, "uploads/a.png", "image/png").await;
    app.register_archived_media(&token, "b.png").await;

    let res = app.get(routes::STATS).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["team"], json!({"total": 3, "published": 2}));
    assert_eq!(res.body["media"], json!({"total": 2, "published": 1}));
    assert_eq!(res.body["hero"], json!({"total": 0, "published": 0}));
    assert_eq!(res.body["mentorTalks"]["total"], 0);
}

#[tokio::test]
async fn activity_merges_tables_newest_first() {
    let app = TestApp::spawn().await;

    app.post_without_token(routes::HERO, &json!({"title": "Welcome"}))
        .await;
    let res = app
        .post_without_token(routes::TEAM, &json!({"name": "Ada", "role": "Mentor"}))
        .await;
    let member = newest(&res.body)["id"].as_i64().unwrap() as i32;
    app.put_without_token(&routes::item(routes::TEAM, member), &json!({"role": "Lead"}))
        .await;

    let res = app.get(routes::ACTIVITY).await;

    assert_eq!(res.status, 200, "{}", res.text);
    let entries = res.body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], format!("team-{member}"));
    assert_eq!(entries[0]["action"], "update");
    assert_eq!(entries[0]["contentType"], "team");
    assert_eq!(entries[0]["contentTitle"], "Ada");
    assert_eq!(entries[0]["user"], "Admin");
    assert_eq!(entries[1]["contentType"], "hero");
    assert_eq!(entries[1]["action"], "create");
}

#[tokio::test]
async fn activity_respects_the_limit() {
    let app = TestApp::spawn().await;

    for name in ["A", "B", "C"] {
        app.post_without_token(routes::TEAM, &json!({"name": name, "role": "Mentor"}))
            .await;
    }

    let res = app.get(&format!("{}?limit=2", routes::ACTIVITY)).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body.as_array().unwrap().len(), 2);
}
