#[cfg(test)]
mod tests {
    use crate::helpers::{FakeSheets, SheetsMode, make_test_app};
    use attendance::messages;
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header::CONTENT_TYPE},
        response::Response,
    };
    use chrono::NaiveDate;
    use db::models::attendance_event::{EventInput, Model as EventModel};
    use sea_orm::DatabaseConnection;
    use serde_json::{Value, json};
    use serial_test::serial;
    use std::sync::Arc;
    use tower::ServiceExt;

    const EXEC: &str = "https://script.google.com/macros/s/ABC/exec";

    async fn seed_event(db: &DatabaseConnection, active: bool) -> EventModel {
        EventModel::create(
            db,
            &EventInput {
                event_name: "Makrab 2025".into(),
                event_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                event_type: "general".into(),
                spreadsheet_url_senior: Some(EXEC.into()),
                spreadsheet_url_umum: None,
                spreadsheet_url_panitia: Some(EXEC.into()),
                is_active: active,
            },
        )
        .await
        .unwrap()
    }

    fn get(uri: &str) -> Request<AxumBody> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(AxumBody::empty())
            .unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(AxumBody::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn form_descriptor_lists_segment_fields() {
        let (app, db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;
        let event = seed_event(&db, true).await;

        let response = app
            .oneshot(get(&format!("/api/attendance/panitia/{}", event.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["event_name"], "Makrab 2025");
        assert_eq!(json["data"]["event_date"], "2025-03-01");
        assert_eq!(json["data"]["segment"], "panitia");
        assert_eq!(json["data"]["configured"], true);
        let names: Vec<&str> = json["data"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["nama", "npm", "angkatan"]);
        assert_eq!(json["data"]["fields"][2]["type"], "integer");
    }

    #[tokio::test]
    #[serial]
    async fn unconfigured_segment_is_reported_in_descriptor() {
        let (app, db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;
        let event = seed_event(&db, true).await;

        let response = app
            .oneshot(get(&format!("/api/attendance/umum/{}", event.id)))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["configured"], false);
    }

    #[tokio::test]
    #[serial]
    async fn inactive_or_missing_event_is_not_found() {
        let (app, db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;
        let inactive = seed_event(&db, false).await;

        let response = app
            .clone()
            .oneshot(get(&format!("/api/attendance/senior/{}", inactive.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], messages::EVENT_NOT_FOUND);

        let response = app
            .oneshot(get("/api/attendance/senior/does-not-exist"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn registry_outage_is_server_error() {
        let (app, db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;
        let event = seed_event(&db, true).await;
        db.close().await.unwrap();

        let response = app
            .oneshot(get(&format!("/api/attendance/senior/{}", event.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["message"], messages::EVENT_LOAD_FAILED);
    }

    #[tokio::test]
    #[serial]
    async fn unknown_segment_is_not_found() {
        let (app, db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;
        let event = seed_event(&db, true).await;

        let response = app
            .oneshot(get(&format!("/api/attendance/alumni/{}", event.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], messages::UNKNOWN_SEGMENT);
    }

    #[tokio::test]
    #[serial]
    async fn valid_check_in_is_delivered_once() {
        let sheets = Arc::new(FakeSheets::new(SheetsMode::Accept("Data tersimpan")));
        let (app, db) = make_test_app(sheets.clone()).await;
        let event = seed_event(&db, true).await;

        let response = app
            .oneshot(post(
                &format!("/api/attendance/senior/{}", event.id),
                json!({ "nama": "Andi", "angkatan": 2019 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Data tersimpan");

        let calls = sheets.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with(&format!(
            "POST {EXEC} nama=Andi&angkatan=2019&event_name=Makrab+2025&type=senior&waktu_checkin="
        )));
    }

    #[tokio::test]
    #[serial]
    async fn invalid_fields_are_rejected_before_delivery() {
        let sheets = Arc::new(FakeSheets::new(SheetsMode::Accept("Data tersimpan")));
        let (app, db) = make_test_app(sheets.clone()).await;
        let event = seed_event(&db, true).await;

        let response = app
            .oneshot(post(
                &format!("/api/attendance/panitia/{}", event.id),
                json!({ "nama": "", "npm": "21A", "angkatan": 0 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = json_body(response).await;
        let fields: Vec<&str> = json["data"]["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, ["nama", "npm", "angkatan"]);
        assert!(sheets.calls().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn unconfigured_segment_fails_without_network() {
        let sheets = Arc::new(FakeSheets::new(SheetsMode::Accept("Data tersimpan")));
        let (app, db) = make_test_app(sheets.clone()).await;
        let event = seed_event(&db, true).await;

        let response = app
            .oneshot(post(
                &format!("/api/attendance/umum/{}", event.id),
                json!({ "nama": "Budi", "prodi": "Teknik Informatika", "nomor_hp": "0812-3456-7890" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], messages::SHEETS_NOT_CONFIGURED);
        assert!(sheets.calls().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn unreachable_sheet_is_bad_gateway_after_get_fallback() {
        let sheets = Arc::new(FakeSheets::new(SheetsMode::Down));
        let (app, db) = make_test_app(sheets.clone()).await;
        let event = seed_event(&db, true).await;

        let response = app
            .oneshot(post(
                &format!("/api/attendance/senior/{}", event.id),
                json!({ "nama": "Andi", "angkatan": "2019" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["success"], false);

        let calls = sheets.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("POST "));
        assert!(calls[1].starts_with(&format!("GET {EXEC}?nama=Andi&angkatan=2019&")));
    }

    #[tokio::test]
    #[serial]
    async fn rejected_submission_surfaces_endpoint_message() {
        let sheets = Arc::new(FakeSheets::new(SheetsMode::Reject("Sheet terkunci")));
        let (app, db) = make_test_app(sheets).await;
        let event = seed_event(&db, true).await;

        let response = app
            .oneshot(post(
                &format!("/api/attendance/senior/{}", event.id),
                json!({ "nama": "Andi", "angkatan": 2019 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let message = json_body(response).await["message"].as_str().unwrap().to_owned();
        assert!(message.contains("Sheet terkunci"), "got {message}");
    }
}
