use serde_json::json;

use crate::common::{TestApp, find, newest, routes};

const PAST_DATE: &str = "2020-03-14T18:00:00Z";
const FUTURE_DATE: &str = "2099-07-01T09:00:00Z";

async fn create_event(app: &TestApp, title: &str, date: &str, highlights: &[&str]) -> i32 {
    let res = app
        .post_without_token(
            routes::EVENTS,
            &json!({
                "title": title,
                "description": "Demo day",
                "eventDate": date,
                "highlights": highlights,
            }),
        )
        .await;
    assert_eq!(res.status, 201, "create_event failed: {}", res.text);
    newest(&res.body)["id"].as_i64().unwrap() as i32
}

#[tokio::test]
async fn category_and_derived_fields_follow_the_date() {
    let app = TestApp::spawn().await;
    let past = create_event(&app, "Pi day", PAST_DATE, &[]).await;
    let future = create_event(&app, "Far future", FUTURE_DATE, &[]).await;

    let res = app.get(&routes::item(routes::EVENTS, past)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["category"], "past");
    assert_eq!(res.body["isPast"], true);
    assert_eq!(res.body["isUpcoming"], false);
    assert_eq!(res.body["year"], 2020);
    assert_eq!(res.body["month"], "March");

    let res = app.get(&routes::item(routes::EVENTS, future)).await;
    assert_eq!(res.body["category"], "upcoming");
    assert_eq!(res.body["isUpcoming"], true);
    assert_eq!(res.body["month"], "July");
}

#[tokio::test]
async fn public_listing_filters_by_stored_category() {
    let app = TestApp::spawn().await;
    let past = create_event(&app, "Pi day", PAST_DATE, &[]).await;
    let future = create_event(&app, "Far future", FUTURE_DATE, &[]).await;

    let res = app
        .get(&format!("{}?category=past", routes::EVENTS_PUBLIC))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let items = res.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], past);

    let res = app
        .get(&format!("{}?category=upcoming", routes::EVENTS_PUBLIC))
        .await;
    assert_eq!(res.body.as_array().unwrap()[0]["id"], future);

    let res = app.get(routes::EVENTS_PUBLIC).await;
    assert_eq!(res.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .get(&format!("{}?category=someday", routes::EVENTS_PUBLIC))
        .await;

    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn highlights_are_kept_in_order_and_replaced_wholesale() {
    let app = TestApp::spawn().await;
    let id = create_event(&app, "Demo day", FUTURE_DATE, &["Keynote", "  ", "Pitches"]).await;

    let res = app.get(&routes::item(routes::EVENTS, id)).await;
    assert_eq!(res.body["highlights"], json!(["Keynote", "Pitches"]));

    let res = app
        .put_without_token(&routes::item(routes::EVENTS, id), &json!({"location": "Hall A"}))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let event = find(&res.body, id);
    assert_eq!(event["location"], "Hall A");
    assert_eq!(event["highlights"], json!(["Keynote", "Pitches"]));

    let res = app
        .put_without_token(
            &routes::item(routes::EVENTS, id),
            &json!({"highlights": ["Networking"]}),
        )
        .await;
    assert_eq!(find(&res.body, id)["highlights"], json!(["Networking"]));

    let res = app
        .put_without_token(&routes::item(routes::EVENTS, id), &json!({"highlights": []}))
        .await;
    assert_eq!(find(&res.body, id)["highlights"], json!([]));
}

#[tokio::test]
async fn deleting_an_event_removes_its_highlights() {
    let app = TestApp::spawn().await;
    let id = create_event(&app, "Demo day", FUTURE_DATE, &["Keynote"]).await;

    let res = app
        .delete_without_token(&routes::item(routes::EVENTS, id))
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body, json!([]));
    assert_eq!(app.get(&routes::item(routes::EVENTS, id)).await.status, 404);
}
