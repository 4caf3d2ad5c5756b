#[cfg(test)]
mod tests {
    use crate::helpers::{FakeSheets, SheetsMode, admin_token, make_test_app, user_token};
    use attendance::checkin_url::parse_checkin_url;
    use attendance::{Segment, messages};
    use axum::{
        body::Body as AxumBody,
        http::{
            Request, StatusCode,
            header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
        },
        response::Response,
    };
    use serde_json::{Value, json};
    use serial_test::serial;
    use std::sync::Arc;
    use tower::ServiceExt;

    const EXEC: &str = "https://script.google.com/macros/s/ABC/exec";

    fn request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<AxumBody> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"));
        match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(AxumBody::from(body.to_string()))
                .unwrap(),
            None => builder.body(AxumBody::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn event_body(name: &str) -> Value {
        json!({
            "event_name": name,
            "event_date": "2025-03-01",
            "spreadsheet_url_senior": EXEC,
            "spreadsheet_url_umum": "",
        })
    }

    #[tokio::test]
    #[serial]
    async fn missing_token_is_unauthorized() {
        let (app, _db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/admin/attendance/events")
            .body(AxumBody::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn non_admin_token_is_forbidden() {
        let (app, _db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;

        let response = app
            .oneshot(request("GET", "/api/admin/attendance/events", &user_token(), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn create_renders_codes_for_every_segment() {
        let (app, _db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;
        let token = admin_token();

        let response = app
            .oneshot(request(
                "POST",
                "/api/admin/attendance/events",
                &token,
                Some(event_body("Makrab 2025")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        let data = &json["data"];
        let id = data["id"].as_str().unwrap();
        assert_eq!(data["event_type"], "general");
        assert_eq!(data["is_active"], true);
        assert_eq!(data["spreadsheet_url_senior"], EXEC);
        assert!(data["spreadsheet_url_umum"].is_null());

        for segment in Segment::ALL {
            let key = segment.as_str();
            assert!(
                data[format!("qr_code_{key}")]
                    .as_str()
                    .unwrap()
                    .starts_with("data:image/png;base64,")
            );
            let url = data["checkin_urls"][key].as_str().unwrap();
            assert_eq!(parse_checkin_url(url), Some((segment, id.to_owned())));
        }
    }

    #[tokio::test]
    #[serial]
    async fn create_rejects_non_apps_script_destination() {
        let (app, db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;
        let mut body = event_body("Makrab 2025");
        body["spreadsheet_url_panitia"] = json!("https://docs.google.com/spreadsheets/d/1/edit");

        let response = app
            .oneshot(request("POST", "/api/admin/attendance/events", &admin_token(), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(response).await["message"],
            messages::INVALID_APPS_SCRIPT_URL_ADMIN
        );
        assert!(db::models::attendance_event::Model::list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn list_get_edit_and_delete() {
        let (app, _db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;
        let token = admin_token();

        let created = json_body(
            app.clone()
                .oneshot(request(
                    "POST",
                    "/api/admin/attendance/events",
                    &token,
                    Some(event_body("Makrab 2025")),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_owned();
        let uri = format!("/api/admin/attendance/events/{id}");

        let list = json_body(
            app.clone()
                .oneshot(request("GET", "/api/admin/attendance/events", &token, None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(list["data"].as_array().unwrap().len(), 1);

        let mut edit = event_body("Makrab Angkatan");
        edit["is_active"] = json!(false);
        let response = app
            .clone()
            .oneshot(request("PUT", &uri, &token, Some(edit)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let edited = json_body(response).await;
        assert_eq!(edited["data"]["event_name"], "Makrab Angkatan");
        assert_eq!(edited["data"]["is_active"], false);
        assert_eq!(edited["data"]["qr_code_umum"], created["data"]["qr_code_umum"]);

        let response = app
            .clone()
            .oneshot(request("DELETE", &uri, &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(request("GET", &uri, &token, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], messages::EVENT_MISSING);
    }

    #[tokio::test]
    #[serial]
    async fn qr_download_is_a_named_png() {
        let (app, _db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;
        let token = admin_token();

        let created = json_body(
            app.clone()
                .oneshot(request(
                    "POST",
                    "/api/admin/attendance/events",
                    &token,
                    Some(event_body("Makrab 2025")),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(request(
                "GET",
                &format!("/api/admin/attendance/events/{id}/qr/senior"),
                &token,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"qr-senior-makrab-2025.png\""
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");

        let response = app
            .oneshot(request(
                "GET",
                &format!("/api/admin/attendance/events/{id}/qr/alumni"),
                &token,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn regenerate_unknown_event_is_not_found() {
        let (app, _db) = make_test_app(Arc::new(FakeSheets::new(SheetsMode::Down))).await;

        let response = app
            .oneshot(request(
                "POST",
                "/api/admin/attendance/events/nope/qr",
                &admin_token(),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
