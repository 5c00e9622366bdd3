use serde_json::json;

use crate::common::{TestApp, find, media_ids, newest, public_url, routes};

mod registry {
    use super::*;

    #[tokio::test]
    async fn registered_object_storage_asset_has_a_public_url() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let id = app
            .register_media(&token, "uploads/cohort.jpg", "image/jpeg")
            .await;
        let res = app.get(&routes::media(id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["storageBackend"], "object_storage");
        assert_eq!(res.body["url"], public_url("uploads/cohort.jpg"));
    }

    #[tokio::test]
    async fn archived_asset_never_exposes_a_url() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let id = app.register_archived_media(&token, "old-banner.jpg").await;
        let res = app.get(&routes::media(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["storageBackend"], "external_archive");
        assert!(res.body["url"].is_null());
    }

    #[tokio::test]
    async fn asset_without_path_gains_a_url_once_the_path_is_set() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::MEDIA,
                &json!({
                    "name": "pending.png",
                    "mimeType": "image/png",
                    "storageBackend": "object_storage",
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["url"].is_null());
        let id = res.id();

        let res = app
            .patch_with_token(
                &routes::media(id),
                &json!({"storagePath": "uploads/pending.png"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["url"], public_url("uploads/pending.png"));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let first = app.register_media(&token, "uploads/a.png", "image/png").await;
        let second = app.register_media(&token, "uploads/b.png", "image/png").await;

        let res = app.get(routes::MEDIA).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![second as i64, first as i64]);
    }

    #[tokio::test]
    async fn traversal_paths_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::MEDIA,
                &json!({
                    "name": "evil.png",
                    "mimeType": "image/png",
                    "storageBackend": "object_storage",
                    "storagePath": "../etc/passwd",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn mutations_require_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::MEDIA,
                &json!({
                    "name": "x.png",
                    "mimeType": "image/png",
                    "storageBackend": "object_storage",
                }),
            )
            .await;
        assert_eq!(res.status, 401);

        let res = app.delete_without_token(&routes::media(1)).await;
        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn missing_asset_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::media(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn uploaded_image_is_stored_and_registered() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let bytes = b"\x89PNG\r\n\x1a\nfake image body".to_vec();

        let res = app
            .upload_with_token("cohort.png", "image/png", bytes.clone(), Some("Cohort"), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Cohort");
        assert_eq!(res.body["mimeType"], "image/png");
        assert_eq!(res.body["size"], bytes.len() as i64);

        let path = res.body["storagePath"].as_str().unwrap().to_string();
        assert!(path.starts_with("uploads/") && path.ends_with(".png"));
        assert_eq!(res.body["url"], public_url(&path));

        let on_disk = app.storage_dir.path().join("media").join(&path);
        assert_eq!(std::fs::read(on_disk).unwrap(), bytes);
    }

    #[tokio::test]
    async fn non_media_files_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .upload_with_token("notes.pdf", "application/pdf", b"%PDF".to_vec(), None, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn hidden_file_names_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .upload_with_token(".hidden.png", "image/png", b"png".to_vec(), None, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn deleting_an_uploaded_asset_removes_the_blob() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .upload_with_token("clip.mp4", "video/mp4", b"not really mp4".to_vec(), None, &token)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();
        let path = res.body["storagePath"].as_str().unwrap().to_string();
        let on_disk = app.storage_dir.path().join("media").join(&path);
        assert!(on_disk.exists());

        let res = app.delete_with_token(&routes::media(id), &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], id);
        assert!(!on_disk.exists());
        assert_eq!(app.get(&routes::media(id)).await.status, 404);
    }

    #[tokio::test]
    async fn identical_uploads_share_one_blob_until_the_last_is_deleted() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let bytes = b"same pixels".to_vec();

        let first = app
            .upload_with_token("a.png", "image/png", bytes.clone(), None, &token)
            .await;
        let second = app
            .upload_with_token("b.png", "image/png", bytes.clone(), None, &token)
            .await;
        assert_eq!(first.status, 201, "{}", first.text);
        assert_eq!(second.status, 201, "{}", second.text);
        assert_ne!(first.id(), second.id());

        let path = first.body["storagePath"].as_str().unwrap().to_string();
        assert_eq!(second.body["storagePath"], path.as_str());
        let on_disk = app.storage_dir.path().join("media").join(&path);

        let res = app.delete_with_token(&routes::media(first.id()), &token).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(std::fs::read(&on_disk).unwrap(), bytes);

        let res = app.delete_with_token(&routes::media(second.id()), &token).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert!(!on_disk.exists());
    }
}

mod associations {
    use super::*;

    #[tokio::test]
    async fn media_round_trips_in_request_order() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let m1 = app.register_media(&token, "uploads/1.png", "image/png").await;
        let m2 = app.register_media(&token, "uploads/2.mp4", "video/mp4").await;

        let res = app
            .post_without_token(
                routes::TEAM,
                &json!({"name": "Ada", "role": "Engineer", "mediaIds": [m2, m1]}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let member = newest(&res.body);

        let media = member["media"].as_array().unwrap();
        assert_eq!(media.len(), 2);
        assert_eq!(media[0]["mediaId"], m2);
        assert_eq!(media[0]["order"], 0);
        assert_eq!(media[0]["type"], "video");
        assert_eq!(media[0]["url"], public_url("uploads/2.mp4"));
        assert_eq!(media[0]["altText"], "Team member media 1");
        assert_eq!(media[1]["mediaId"], m1);
        assert_eq!(media[1]["order"], 1);
        assert_eq!(media[1]["type"], "image");
    }

    #[tokio::test]
    async fn unresolvable_assets_are_skipped() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let good = app.register_media(&token, "uploads/good.png", "image/png").await;
        let archived = app.register_archived_media(&token, "archived.png").await;

        let res = app
            .post_without_token(
                routes::TEAM,
                &json!({"name": "Grace", "role": "Admiral", "mediaIds": [archived, 9999, good]}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let member = newest(&res.body);
        assert_eq!(media_ids(member), vec![good as i64]);
        assert_eq!(member["media"][0]["order"], 0);
    }

    #[tokio::test]
    async fn replacing_media_is_idempotent() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let m1 = app.register_media(&token, "uploads/1.png", "image/png").await;
        let m2 = app.register_media(&token, "uploads/2.png", "image/png").await;

        let res = app
            .post_without_token(routes::TEAM, &json!({"name": "Linus", "role": "Maintainer"}))
            .await;
        let id = newest(&res.body)["id"].as_i64().unwrap() as i32;

        for _ in 0..2 {
            let res = app
                .put_without_token(&routes::item(routes::TEAM, id), &json!({"mediaIds": [m1, m2]}))
                .await;
            assert_eq!(res.status, 200, "{}", res.text);
            assert_eq!(media_ids(find(&res.body, id)), vec![m1 as i64, m2 as i64]);
        }
    }

    #[tokio::test]
    async fn absent_media_ids_leave_media_alone_and_empty_list_clears() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let m1 = app.register_media(&token, "uploads/1.png", "image/png").await;

        let res = app
            .post_without_token(
                routes::TEAM,
                &json!({"name": "Barbara", "role": "Researcher", "mediaIds": [m1]}),
            )
            .await;
        let id = newest(&res.body)["id"].as_i64().unwrap() as i32;

        let res = app
            .put_without_token(&routes::item(routes::TEAM, id), &json!({"bio": "Pioneer"}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let member = find(&res.body, id);
        assert_eq!(member["bio"], "Pioneer");
        assert_eq!(media_ids(member), vec![m1 as i64]);

        let res = app
            .put_without_token(&routes::item(routes::TEAM, id), &json!({"mediaIds": []}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert!(media_ids(find(&res.body, id)).is_empty());
    }

    #[tokio::test]
    async fn deleting_an_asset_drops_it_from_content_reads() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let keep = app.register_media(&token, "uploads/keep.png", "image/png").await;
        let doomed = app.register_media(&token, "uploads/doomed.png", "image/png").await;

        let res = app
            .post_without_token(
                routes::TEAM,
                &json!({"name": "Margaret", "role": "Director", "mediaIds": [doomed, keep]}),
            )
            .await;
        let id = newest(&res.body)["id"].as_i64().unwrap() as i32;

        let res = app.delete_with_token(&routes::media(doomed), &token).await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app.get(&routes::item(routes::TEAM, id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(media_ids(&res.body), vec![keep as i64]);
    }

    #[tokio::test]
    async fn served_url_follows_the_current_storage_path() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let m = app.register_media(&token, "uploads/v1.png", "image/png").await;

        let res = app
            .post_without_token(
                routes::TEAM,
                &json!({"name": "Katherine", "role": "Analyst", "mediaIds": [m]}),
            )
            .await;
        let id = newest(&res.body)["id"].as_i64().unwrap() as i32;

        let res = app
            .patch_with_token(&routes::media(m), &json!({"storagePath": "uploads/v2.png"}), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app.get(&routes::item(routes::TEAM, id)).await;
        assert_eq!(res.body["media"][0]["url"], public_url("uploads/v2.png"));
    }
}
