//! Texture upload API integration tests.
//!
//! Run with: `cargo test -p skinvault-api --test textures_test`

mod helpers;

use axum::http::{Method, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};
use skinvault_api::constants::{IMAGES_FIELD_MULTI, TEXTURES_PATH};
use skinvault_core::ContentHash;

use helpers::fixtures::{create_fake_png, create_minimal_png, create_png_of_len};
use helpers::{images_form, setup_test_app, upload, TEST_MAX_FILE_SIZE};

#[tokio::test]
async fn test_upload_valid_and_fake_png() {
    let app = setup_test_app();
    let grass = create_png_of_len(1, 2048);

    let response = upload(
        &app,
        images_form(&[
            ("grass_alex.PNG", grass.clone()),
            ("notanimage_steve.png", create_fake_png()),
        ]),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Processed 1/2 files successfully");
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["success"], 1);
    assert_eq!(body["data"]["failed"], 1);

    let first = &body["data"]["results"][0];
    assert_eq!(first["success"], true);
    assert_eq!(first["filename"], "grass_alex.PNG");
    assert_eq!(first["name"], "grass");
    assert_eq!(first["type"], "alex");
    assert_eq!(first["size"], 2);
    assert_eq!(first["hash"], ContentHash::of(&grass).to_string());
    assert!(first["id"].as_i64().is_some());
    assert!(first.get("error").is_none());

    let second = &body["data"]["results"][1];
    assert_eq!(
        second,
        &json!({
            "success": false,
            "filename": "notanimage_steve.png",
            "error": "File is not a valid PNG image"
        })
    );

    let records = app.repository.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].uploader_id, 42);
    assert!(records[0].is_public);
    assert_eq!(records[0].likes, 0);
    assert!(app.blob_exists(&grass).await);
    assert_eq!(app.blob_count(), 1);
}

#[tokio::test]
async fn test_same_content_twice_keeps_one_record_and_blob() {
    let app = setup_test_app();
    let content = create_minimal_png();

    let first = upload(&app, images_form(&[("grass_alex.png", content.clone())])).await;
    assert_eq!(first.json::<Value>()["data"]["success"], 1);

    let second = upload(&app, images_form(&[("renamed_steve.png", content.clone())])).await;
    assert_eq!(second.status_code(), StatusCode::OK);
    let body: Value = second.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Processed 0/1 files successfully");
    assert_eq!(
        body["data"]["results"][0]["error"],
        "Identical file already exists"
    );

    assert_eq!(app.repository.len(), 1);
    assert_eq!(app.blob_count(), 1);
}

#[tokio::test]
async fn test_oversize_file_writes_no_blob() {
    let app = setup_test_app();
    let content = create_png_of_len(2, TEST_MAX_FILE_SIZE + 1);

    let response = upload(&app, images_form(&[("huge_alex.png", content.clone())])).await;

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["data"]["results"][0]["error"],
        "File exceeds the size limit (4KB)"
    );
    assert!(!app.blob_exists(&content).await);
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_failed_insert_removes_blob() {
    let app = setup_test_app();
    app.repository.set_fail_inserts(true);
    let content = create_minimal_png();

    let response = upload(&app, images_form(&[("grass_alex.png", content.clone())])).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let error = body["data"]["results"][0]["error"].as_str().unwrap();
    assert!(error.starts_with("Database error: "), "got {error}");
    assert!(!app.blob_exists(&content).await);
    assert_eq!(app.blob_count(), 0);
}

#[tokio::test]
async fn test_bracketed_field_name_and_other_fields() {
    let app = setup_test_app();

    let form = MultipartForm::new()
        .add_text("comment", "ignored")
        .add_part(
            IMAGES_FIELD_MULTI,
            Part::bytes(create_png_of_len(3, 100)).file_name("dirt_steve.png"),
        )
        .add_part(
            IMAGES_FIELD_MULTI,
            Part::bytes(create_png_of_len(4, 100)).file_name("stone_ALEX.png"),
        );

    let body: Value = upload(&app, form).await.json();

    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["success"], 2);
    assert_eq!(body["data"]["results"][0]["name"], "dirt");
    assert_eq!(body["data"]["results"][0]["type"], "steve");
    assert_eq!(body["data"]["results"][1]["name"], "stone");
    assert_eq!(body["data"]["results"][1]["type"], "alex");
}

#[tokio::test]
async fn test_empty_file_input_is_reported_per_file() {
    let app = setup_test_app();

    let form = MultipartForm::new()
        .add_part("images", Part::bytes(Vec::<u8>::new()).file_name(""))
        .add_part(
            "images",
            Part::bytes(create_png_of_len(9, 80)).file_name("grass_alex.png"),
        );
    let response = upload(&app, form).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["success"], 1);
    assert_eq!(
        body["data"]["results"][0],
        json!({
            "success": false,
            "filename": "",
            "error": "File upload failed: no file was selected"
        })
    );
    assert_eq!(body["data"]["results"][1]["success"], true);
    assert_eq!(app.repository.len(), 1);
    assert_eq!(app.blob_count(), 1);
}

#[tokio::test]
async fn test_every_file_is_reported_in_order() {
    let app = setup_test_app();

    let body: Value = upload(
        &app,
        images_form(&[
            ("nounderscore.png", create_png_of_len(5, 64)),
            ("dirt_steve.gif", create_png_of_len(6, 64)),
            ("dirt_zombie.png", create_png_of_len(7, 64)),
            ("dirt_steve.png", create_png_of_len(8, 64)),
        ]),
    )
    .await
    .json();

    let errors: Vec<Value> = body["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["error"].clone())
        .collect();
    assert_eq!(
        errors,
        vec![
            json!("Invalid filename format, expected: name_alex.png or name_steve.png"),
            json!("Only PNG image files are supported"),
            json!("Invalid filename format, expected: name_alex.png or name_steve.png"),
            Value::Null,
        ]
    );
    assert_eq!(body["data"]["failed"], 3);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_non_post_methods_are_rejected() {
    let app = setup_test_app();

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let response = app.client().method(method.clone(), TEXTURES_PATH).await;

        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "Only POST requests are supported",
                "data": null
            })
        );
    }
}

#[tokio::test]
async fn test_missing_images_field_is_rejected() {
    let app = setup_test_app();

    let form = MultipartForm::new()
        .add_text("images", "not a file")
        .add_part("image", Part::bytes(create_minimal_png()).file_name("grass_alex.png"));
    let response = upload(&app, form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No files uploaded, use the field name \"images\"");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_non_multipart_body_is_rejected() {
    let app = setup_test_app();

    let response = app
        .client()
        .post(TEXTURES_PATH)
        .json(&json!({ "images": [] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "No files uploaded, use the field name \"images\""
    );
}

#[tokio::test]
async fn test_unreachable_database_is_rejected() {
    let app = setup_test_app();
    app.repository.set_unavailable(true);
    let content = create_minimal_png();

    let response = upload(&app, images_form(&[("grass_alex.png", content.clone())])).await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Database connection failed");
    assert!(body["data"].is_null());
    assert!(!app.blob_exists(&content).await);
}

#[tokio::test]
async fn test_envelope_headers_on_every_response() {
    let app = setup_test_app();

    let ok = upload(&app, images_form(&[("grass_alex.png", create_minimal_png())])).await;
    let rejected = app.client().get(TEXTURES_PATH).await;

    for response in [ok, rejected] {
        assert_eq!(
            response.header("content-type"),
            "application/json; charset=utf-8"
        );
        assert_eq!(response.header("access-control-allow-origin"), "*");
        assert_eq!(response.header("access-control-allow-methods"), "POST");
        assert_eq!(response.header("access-control-allow-headers"), "Content-Type");
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = setup_test_app();

    let response = app
        .client()
        .method(Method::OPTIONS, TEXTURES_PATH)
        .add_header("Origin", "https://skins.example")
        .add_header("Access-Control-Request-Method", "POST")
        .add_header("Access-Control-Request-Headers", "content-type")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(response.header("access-control-allow-methods"), "POST");
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = setup_test_app();

    let health = app.client().get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    let body: Value = health.json();
    assert_eq!(body["database"], "healthy");
    assert_eq!(body["storage"], "healthy");

    app.repository.set_unavailable(true);
    let health = app.client().get("/health").await;
    assert_eq!(health.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let openapi: Value = app.client().get("/api/openapi.json").await.json();
    assert!(openapi["paths"]["/api/v0/textures"]["post"].is_object());
}
