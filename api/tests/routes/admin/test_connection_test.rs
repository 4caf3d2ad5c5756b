#[cfg(test)]
mod tests {
    use crate::helpers::{FakeSheets, SheetsMode, admin_token, make_test_app};
    use attendance::messages;
    use axum::{
        body::Body as AxumBody,
        http::{
            Request, StatusCode,
            header::{AUTHORIZATION, CONTENT_TYPE},
        },
    };
    use serde_json::{Value, json};
    use serial_test::serial;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn probe(url: &str) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri("/api/admin/attendance/test-connection")
            .header(AUTHORIZATION, format!("Bearer {}", admin_token()))
            .header(CONTENT_TYPE, "application/json")
            .body(AxumBody::from(json!({ "url": url }).to_string()))
            .unwrap()
    }

    async fn call(mode: SheetsMode, url: &str) -> (Value, usize) {
        let sheets = Arc::new(FakeSheets::new(mode));
        let (app, _db) = make_test_app(sheets.clone()).await;

        let response = app.oneshot(probe(url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (serde_json::from_slice(&body).unwrap(), sheets.calls().len())
    }

    #[tokio::test]
    #[serial]
    async fn reachable_endpoint_reports_its_message() {
        let (json, calls) = call(
            SheetsMode::Accept("Apps Script aktif"),
            "https://script.google.com/macros/s/ABC/exec",
        )
        .await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Apps Script aktif");
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    #[serial]
    async fn unreachable_endpoint_is_reported() {
        let (json, _) = call(SheetsMode::Down, "https://script.google.com/macros/s/ABC/exec").await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], messages::CONNECTION_UNREACHABLE);
    }

    #[tokio::test]
    #[serial]
    async fn malformed_url_is_rejected_without_a_request() {
        let (json, calls) = call(SheetsMode::Accept("unused"), "https://example.com/exec").await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], messages::INVALID_URL_SHORT);
        assert_eq!(calls, 0);
    }
}
