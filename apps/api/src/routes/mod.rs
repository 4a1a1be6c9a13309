pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::applicants::handlers as applicants;
use crate::config::Config;
use crate::interviews::handlers as interviews;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::offers::handlers as offers;
use crate::state::AppState;

/// Room for the multipart framing and text fields around the resume itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .patch(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        // Applicants
        .route(
            "/api/v1/applicants",
            post(applicants::handle_register_applicant).get(applicants::handle_list_applicants),
        )
        .route("/api/v1/applicants/me", get(applicants::handle_get_own_profile))
        .route(
            "/api/v1/applicants/me/resume",
            put(applicants::handle_replace_resume),
        )
        .route("/api/v1/applicants/:id", get(applicants::handle_get_applicant))
        // Matching
        .route(
            "/api/v1/matching/jobs/:id/candidates",
            get(matching::handle_job_candidates),
        )
        .route(
            "/api/v1/matching/applicants/:id/matches",
            get(matching::handle_applicant_matches),
        )
        .route("/api/v1/matching/matches", get(matching::handle_company_matches))
        // Interviews
        .route(
            "/api/v1/interviews",
            post(interviews::handle_schedule_interview).get(interviews::handle_list_interviews),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handle_get_interview).patch(interviews::handle_update_interview),
        )
        // Offers
        .route(
            "/api/v1/offers",
            post(offers::handle_create_offer).get(offers::handle_list_offers),
        )
        .route("/api/v1/offers/:id", get(offers::handle_get_offer_letter))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Permissive when no origins are configured.
pub fn cors_layer(config: &Config) -> Result<CorsLayer> {
    if config.cors_allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{USER_ID_HEADER, USER_ROLE_HEADER};
    use crate::testing::{test_config, test_state};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    const BOUNDARY: &str = "recruit-test-boundary";

    fn request(method: &str, uri: &str, role: Option<&str>) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(role) = role {
            builder = builder
                .header(USER_ID_HEADER, Uuid::new_v4().to_string())
                .header(USER_ROLE_HEADER, role);
        }
        builder
    }

    fn json_body(builder: axum::http::request::Builder, body: Value) -> Request<Body> {
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn multipart_body(fields: &[(&str, &str)], file: (&str, &[u8])) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\n\
                     Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        let (filename, bytes) = file;
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_route() {
        let (status, body) =
            send(request("GET", "/health", None).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "recruit-api");
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let (status, body) =
            send(request("GET", "/api/v1/jobs", None).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_applicant_cannot_create_job() {
        let req = json_body(
            request("POST", "/api/v1/jobs", Some("applicant")),
            json!({"title": "Engineer", "description": "x", "skills": ["Rust"]}),
        );
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_blank_job_title_is_rejected() {
        let req = json_body(
            request("POST", "/api/v1/jobs", Some("company")),
            json!({"title": "   ", "skills": ["Rust"]}),
        );
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_applicant_list_is_company_only() {
        let (status, _) = send(
            request("GET", "/api/v1/applicants", Some("applicant"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_company_cannot_register_as_applicant() {
        let body = multipart_body(
            &[("name", "Ada"), ("email", "ada@example.com")],
            ("cv.pdf", b"%PDF-1.4"),
        );
        let req = request("POST", "/api/v1/applicants", Some("company"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_non_pdf_resume_is_rejected_before_parsing() {
        let body = multipart_body(
            &[("name", "Ada"), ("email", "ada@example.com")],
            ("resume.txt", b"plain text resume"),
        );
        let req = request("POST", "/api/v1/applicants", Some("applicant"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Only PDF files are allowed");
    }

    #[tokio::test]
    async fn test_registration_without_resume_is_rejected() {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nAda\r\n\
                 --{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"email\"\r\n\r\nada@example.com\r\n\
                 --{BOUNDARY}--\r\n"
            )
            .as_bytes(),
        );
        let req = request("POST", "/api/v1/applicants", Some("applicant"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_match_threshold_is_validated() {
        let (status, body) = send(
            request(
                "GET",
                "/api/v1/matching/matches?min_match_percentage=150",
                Some("company"),
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("min_match_percentage"));
    }

    #[tokio::test]
    async fn test_applicant_cannot_schedule_interviews() {
        let req = json_body(
            request("POST", "/api/v1/interviews", Some("applicant")),
            json!({
                "applicant_id": Uuid::new_v4(),
                "position_id": Uuid::new_v4(),
                "date_time": "2026-11-01T10:00:00Z"
            }),
        );
        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_applicant_cannot_issue_offers() {
        let req = json_body(
            request("POST", "/api/v1/offers", Some("applicant")),
            json!({"applicant_id": Uuid::new_v4(), "position_id": Uuid::new_v4()}),
        );
        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_cors_layer_rejects_bad_origin() {
        let mut config = test_config();
        config.cors_allowed_origins = vec!["http://localhost:3000".to_string()];
        assert!(cors_layer(&config).is_ok());
        config.cors_allowed_origins = vec!["bad\norigin".to_string()];
        assert!(cors_layer(&config).is_err());
    }
}
