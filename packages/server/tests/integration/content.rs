use serde_json::{Value, json};

use crate::common::{TestApp, find, newest, routes};

fn ids(collection: &Value) -> Vec<i64> {
    collection
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

mod guarded_mutations {
    use super::*;

    #[tokio::test]
    async fn program_mutations_require_a_token() {
        let app = TestApp::spawn().await;
        let body = json!({"title": "Fellowship", "description": "Twelve weeks."});

        let res = app.post_without_token(routes::PROGRAMS, &body).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");

        let token = app.admin_token().await;
        let res = app.post_with_token(routes::PROGRAMS, &body, &token).await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = newest(&res.body)["id"].as_i64().unwrap() as i32;

        let item = routes::item(routes::PROGRAMS, id);
        assert_eq!(app.put_without_token(&item, &json!({"title": "x"})).await.status, 401);
        assert_eq!(
            app.patch_without_token(&routes::publish(routes::PROGRAMS, id), &json!({"isActive": false}))
                .await
                .status,
            401
        );
        assert_eq!(app.delete_without_token(&item).await.status, 401);

        let res = app.delete_with_token(&item, &token).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert!(ids(&res.body).is_empty());
    }

    #[tokio::test]
    async fn testimonial_mutations_require_a_token() {
        let app = TestApp::spawn().await;
        let body = json!({"name": "Sam", "quote": "Changed my life.", "rating": 5});

        let res = app.post_without_token(routes::TESTIMONIALS, &body).await;
        assert_eq!(res.status, 401);

        let token = app.admin_token().await;
        let res = app.post_with_token(routes::TESTIMONIALS, &body, &token).await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(newest(&res.body)["rating"], 5);
    }

    #[tokio::test]
    async fn founder_mutations_require_a_token() {
        let app = TestApp::spawn().await;
        let body = json!({"name": "Ada", "title": "Co-founder"});

        let res = app.post_without_token(routes::FOUNDERS, &body).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");

        let token = app.admin_token().await;
        let res = app.post_with_token(routes::FOUNDERS, &body, &token).await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = newest(&res.body)["id"].as_i64().unwrap() as i32;

        let item = routes::item(routes::FOUNDERS, id);
        assert_eq!(app.put_without_token(&item, &json!({"name": "x"})).await.status, 401);
        assert_eq!(
            app.patch_without_token(&routes::publish(routes::FOUNDERS, id), &json!({"isActive": false}))
                .await
                .status,
            401
        );
        assert_eq!(app.delete_without_token(&item).await.status, 401);
        assert_eq!(app.get(&item).await.status, 200);
    }

    #[tokio::test]
    async fn reads_stay_open() {
        let app = TestApp::spawn().await;

        assert_eq!(app.get(routes::PROGRAMS).await.status, 200);
        assert_eq!(app.get(&routes::public(routes::PROGRAMS)).await.status, 200);
        assert_eq!(app.get(&routes::public(routes::TESTIMONIALS)).await.status, 200);
    }

    #[tokio::test]
    async fn rating_out_of_range_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::TESTIMONIALS,
                &json!({"name": "Sam", "quote": "Meh.", "rating": 9}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["details"][0]["field"], "rating");
    }
}

mod ordering {
    use super::*;

    #[tokio::test]
    async fn public_listing_is_active_rows_in_display_order() {
        let app = TestApp::spawn().await;

        let mut created = Vec::new();
        for (name, order) in [("Third", 3), ("First", 1), ("Second", 2)] {
            let res = app
                .post_without_token(
                    routes::TEAM,
                    &json!({"name": name, "role": "Mentor", "order": order}),
                )
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
            created.push(newest(&res.body)["id"].as_i64().unwrap() as i32);
        }
        let (third, first, second) = (created[0], created[1], created[2]);

        let res = app
            .patch_without_token(&routes::publish(routes::TEAM, second), &json!({"isActive": false}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(find(&res.body, second)["isActive"], false);

        let public = app.get(&routes::public(routes::TEAM)).await;
        assert_eq!(public.status, 200);
        assert_eq!(ids(&public.body), vec![first as i64, third as i64]);

        let all = app.get(routes::TEAM).await;
        assert_eq!(ids(&all.body), vec![first as i64, second as i64, third as i64]);
    }

    #[tokio::test]
    async fn several_rows_can_be_active_at_once() {
        let app = TestApp::spawn().await;

        for name in ["Ada", "Grace"] {
            let res = app
                .post_without_token(routes::TEAM, &json!({"name": name, "role": "Mentor"}))
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let public = app.get(&routes::public(routes::TEAM)).await;
        assert_eq!(public.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn gallery_public_filters_by_event() {
        let app = TestApp::spawn().await;

        for (title, event_id) in [("Opening", Some(1)), ("Closing", Some(2)), ("Misc", None)] {
            let res = app
                .post_without_token(
                    routes::EVENT_GALLERY,
                    &json!({"title": title, "eventId": event_id}),
                )
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let res = app
            .get(&format!("{}?eventId=2", routes::EVENT_GALLERY_PUBLIC))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Closing");

        let all = app.get(routes::EVENT_GALLERY_PUBLIC).await;
        assert_eq!(all.body.as_array().unwrap().len(), 3);
    }
}

mod open_mutations {
    use super::*;

    async fn full_lifecycle_without_token(
        app: &TestApp,
        collection: &str,
        body: Value,
        update: Value,
    ) {
        let res = app.post_without_token(collection, &body).await;
        assert_eq!(res.status, 201, "{collection}: {}", res.text);
        let id = newest(&res.body)["id"].as_i64().unwrap() as i32;

        let item = routes::item(collection, id);
        let res = app.put_without_token(&item, &update).await;
        assert_eq!(res.status, 200, "{collection}: {}", res.text);

        let res = app
            .patch_without_token(&routes::publish(collection, id), &json!({"isActive": false}))
            .await;
        assert_eq!(res.status, 200, "{collection}: {}", res.text);
        assert_eq!(find(&res.body, id)["isActive"], false);

        let res = app.delete_without_token(&item).await;
        assert_eq!(res.status, 200, "{collection}: {}", res.text);
        assert!(!ids(&res.body).contains(&(id as i64)));
    }

    #[tokio::test]
    async fn team_mutations_need_no_token() {
        let app = TestApp::spawn().await;
        full_lifecycle_without_token(
            &app,
            routes::TEAM,
            json!({"name": "Lin", "role": "Mentor"}),
            json!({"role": "Lead mentor"}),
        )
        .await;
    }

    #[tokio::test]
    async fn event_mutations_need_no_token() {
        let app = TestApp::spawn().await;
        full_lifecycle_without_token(
            &app,
            routes::EVENTS,
            json!({
                "title": "Demo day",
                "description": "Teams present.",
                "eventDate": "2099-07-01T18:00:00Z"
            }),
            json!({"location": "Main hall"}),
        )
        .await;
    }

    #[tokio::test]
    async fn mentor_talk_mutations_need_no_token() {
        let app = TestApp::spawn().await;
        full_lifecycle_without_token(
            &app,
            routes::MENTOR_TALKS,
            json!({"title": "Raising a seed round", "speaker": "Jo"}),
            json!({"speakerRole": "Partner"}),
        )
        .await;
    }
}
