use serde_json::{Value, json};

use crate::common::{TestApp, find, newest, routes};

async fn create_hero(app: &TestApp, title: &str) -> i32 {
    let res = app
        .post_without_token(routes::HERO, &json!({"title": title}))
        .await;
    assert_eq!(res.status, 201, "create_hero failed: {}", res.text);
    newest(&res.body)["id"].as_i64().unwrap() as i32
}

fn active_ids(heroes: &Value) -> Vec<i64> {
    heroes
        .as_array()
        .unwrap()
        .iter()
        .filter(|h| h["isActive"] == true)
        .map(|h| h["id"].as_i64().unwrap())
        .collect()
}

mod single_active {
    use super::*;

    #[tokio::test]
    async fn creating_a_hero_deactivates_the_previous_one() {
        let app = TestApp::spawn().await;

        let first = create_hero(&app, "Spring cohort").await;
        let second = create_hero(&app, "Summer cohort").await;

        let res = app.get(routes::HERO).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 2);
        assert_eq!(active_ids(&res.body), vec![second as i64]);
        assert_eq!(find(&res.body, first)["isActive"], false);

        let public = app.get(routes::HERO_PUBLIC).await;
        assert_eq!(public.status, 200);
        assert_eq!(public.body["id"], second);
    }

    #[tokio::test]
    async fn publishing_a_hero_deactivates_the_others() {
        let app = TestApp::spawn().await;
        let first = create_hero(&app, "Spring cohort").await;
        let _second = create_hero(&app, "Summer cohort").await;

        let res = app
            .patch_without_token(
                &routes::publish(routes::HERO, first),
                &json!({"isActive": true}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(active_ids(&res.body), vec![first as i64]);
        assert_eq!(app.get(routes::HERO_PUBLIC).await.body["id"], first);
    }

    #[tokio::test]
    async fn activating_via_update_deactivates_the_others() {
        let app = TestApp::spawn().await;
        let first = create_hero(&app, "Spring cohort").await;
        let _second = create_hero(&app, "Summer cohort").await;

        let res = app
            .put_without_token(&routes::item(routes::HERO, first), &json!({"isActive": true}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(active_ids(&res.body), vec![first as i64]);
    }

    #[tokio::test]
    async fn unpublishing_the_only_hero_leaves_public_empty() {
        let app = TestApp::spawn().await;
        let id = create_hero(&app, "Spring cohort").await;

        let res = app
            .patch_without_token(&routes::publish(routes::HERO, id), &json!({"isActive": false}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let public = app.get(routes::HERO_PUBLIC).await;
        assert_eq!(public.status, 200);
        assert!(public.body.is_null());
    }

    #[tokio::test]
    async fn about_follows_the_same_rule() {
        let app = TestApp::spawn().await;
        let body = json!({"title": "About us", "description": "We build companies."});

        let res = app.post_without_token(routes::ABOUT, &body).await;
        assert_eq!(res.status, 201, "{}", res.text);
        let res = app.post_without_token(routes::ABOUT, &body).await;
        assert_eq!(res.status, 201, "{}", res.text);

        assert_eq!(active_ids(&res.body), vec![newest(&res.body)["id"].as_i64().unwrap()]);
    }
}

mod crud {
    use super::*;

    #[tokio::test]
    async fn update_sets_and_clears_nullable_fields() {
        let app = TestApp::spawn().await;
        let id = create_hero(&app, "Spring cohort").await;

        let res = app
            .put_without_token(
                &routes::item(routes::HERO, id),
                &json!({"subtitle": "Apply now", "ctaLink": "/apply"}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let hero = find(&res.body, id);
        assert_eq!(hero["subtitle"], "Apply now");
        assert_eq!(hero["ctaLink"], "/apply");

        let res = app
            .put_without_token(&routes::item(routes::HERO, id), &json!({"subtitle": null}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let hero = find(&res.body, id);
        assert!(hero["subtitle"].is_null());
        assert_eq!(hero["ctaLink"], "/apply");
        assert_eq!(hero["title"], "Spring cohort");
    }

    #[tokio::test]
    async fn blank_title_is_rejected_with_field_details() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::HERO, &json!({"title": "   "}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["details"][0]["field"], "title");
    }

    #[tokio::test]
    async fn wrong_typed_field_is_listed_in_details() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::HERO, &json!({"title": 42}))
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["details"][0]["field"], "title");
        assert!(
            res.body["details"][0]["message"]
                .as_str()
                .unwrap()
                .contains("invalid type")
        );
    }

    #[tokio::test]
    async fn missing_title_is_listed_in_details() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::HERO, &json!({"subtitle": "No title"}))
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["details"][0]["field"], "title");
        assert_eq!(res.body["details"][0]["message"], "is required");
    }

    #[tokio::test]
    async fn delete_returns_the_remaining_heroes() {
        let app = TestApp::spawn().await;
        let first = create_hero(&app, "Spring cohort").await;
        let second = create_hero(&app, "Summer cohort").await;

        let res = app
            .delete_without_token(&routes::item(routes::HERO, second))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![first as i64]);
        assert_eq!(app.get(&routes::item(routes::HERO, second)).await.status, 404);
    }

    #[tokio::test]
    async fn missing_hero_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put_without_token(&routes::item(routes::HERO, 4242), &json!({"title": "x"}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
