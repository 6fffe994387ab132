//! REST API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Routes are nested under `/api/`.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::api::endpoints;
use crate::core_state::CoreState;

pub fn api_router(core: Arc<CoreState>) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/profile",
            put(endpoints::intake::put_profile).get(endpoints::intake::get_profile),
        )
        .route("/assessment", post(endpoints::intake::assessment))
        .route("/insights/run", post(endpoints::insights::start_run))
        .route("/insights/location", post(endpoints::insights::set_location))
        .route("/insights/sections", get(endpoints::insights::sections))
        .route("/insights/save", post(endpoints::insights::save))
        .route("/records", get(endpoints::records::list))
        .route("/records/:id", delete(endpoints::records::delete))
        .with_state(core);

    Router::new().nest("/api", routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::pipeline::gemini::MockGenerator;

    fn test_state(generator: MockGenerator) -> (Arc<CoreState>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellora.db");
        (
            Arc::new(CoreState::new(Arc::new(generator), path)),
            dir,
        )
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn send(
        core: &Arc<CoreState>,
        req: Request<Body>,
    ) -> axum::http::Response<Body> {
        api_router(core.clone()).oneshot(req).await.unwrap()
    }

    async fn submit_profile(core: &Arc<CoreState>) {
        let response = send(
            core,
            json_request(
                "PUT",
                "/api/profile",
                r#"{"name":"Priya","age":29,"gender":"female"}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Poll the sections endpoint until the run settles.
    async fn wait_for_settled(core: &Arc<CoreState>) -> serde_json::Value {
        for _ in 0..500 {
            let response = send(core, get_request("/api/insights/sections")).await;
            let json = response_json(response).await;
            if json["settled"] == true {
                return json;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("run never settled");
    }

    const RUN_BODY: &str = r#"{
        "query": "persistent headache",
        "measurement": {
            "height": {"unit": "cm", "value": 170.0},
            "weight": {"unit": "kg", "value": 60.0}
        }
    }"#;

    // ── Basic surface ───────────────────────────────────

    #[tokio::test]
    async fn health_response_shape() {
        let (core, _dir) = test_state(MockGenerator::new());
        let response = send(&core, get_request("/api/health")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["profile_active"], false);
        assert!(!json["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let (core, _dir) = test_state(MockGenerator::new());
        let response = send(&core, get_request("/api/nonexistent")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ── Intake ──────────────────────────────────────────

    #[tokio::test]
    async fn profile_round_trips_through_put_and_get() {
        let (core, _dir) = test_state(MockGenerator::new());
        submit_profile(&core).await;

        let response = send(&core, get_request("/api/profile")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["name"], "Priya");
        assert_eq!(json["age"], 29);
        assert_eq!(json["gender"], "female");
    }

    #[tokio::test]
    async fn profile_get_without_intake_returns_503() {
        let (core, _dir) = test_state(MockGenerator::new());
        let response = send(&core, get_request("/api/profile")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "NO_PROFILE");
    }

    #[tokio::test]
    async fn profile_rejects_blank_name() {
        let (core, _dir) = test_state(MockGenerator::new());
        let response = send(
            &core,
            json_request("PUT", "/api/profile", r#"{"name":"  ","age":29,"gender":"female"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn profile_resubmission_keeps_the_id() {
        let (core, _dir) = test_state(MockGenerator::new());
        submit_profile(&core).await;
        let first = core.require_profile().unwrap().id;

        let response = send(
            &core,
            json_request("PUT", "/api/profile", r#"{"name":"Priya","age":30,"gender":"female"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(core.require_profile().unwrap().id, first);
    }

    #[tokio::test]
    async fn assessment_computes_bmi_from_metric_units() {
        let (core, _dir) = test_state(MockGenerator::new());
        let response = send(
            &core,
            json_request(
                "POST",
                "/api/assessment",
                r#"{"height":{"unit":"cm","value":160.0},"weight":{"unit":"kg","value":90.0}}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["score"], 35.2);
        assert_eq!(json["category"], "Obese");
    }

    #[tokio::test]
    async fn assessment_accepts_imperial_units() {
        let (core, _dir) = test_state(MockGenerator::new());
        let response = send(
            &core,
            json_request(
                "POST",
                "/api/assessment",
                r#"{"height":{"unit":"feet_inches","feet":5.0,"inches":7.0},"weight":{"unit":"lbs","value":150.0}}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["score"], 23.5);
        assert_eq!(json["category"], "Normal Weight");
    }

    #[tokio::test]
    async fn assessment_rejects_out_of_range_measurement() {
        let (core, _dir) = test_state(MockGenerator::new());
        let response = send(
            &core,
            json_request(
                "POST",
                "/api/assessment",
                r#"{"height":{"unit":"cm","value":400.0},"weight":{"unit":"kg","value":60.0}}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // ── Insight runs ────────────────────────────────────

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn run_resolves_sections_and_opens_the_gate() {
        let generator = MockGenerator::new()
            .respond_with("Take rest.")
            .respond_with("**Dolo 650**: One tablet.")
            .respond_with("**Ginger tea**: Twice a day.");
        let (core, _dir) = test_state(generator);
        submit_profile(&core).await;

        let response = send(&core, json_request("POST", "/api/insights/run", RUN_BODY)).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let json = response_json(response).await;
        assert_eq!(json["run_id"], 1);

        let snapshot = wait_for_settled(&core).await;
        assert_eq!(snapshot["can_save"], true);
        let sections = snapshot["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0]["section"], "guidance");
        assert_eq!(sections[3]["state"], "idle");
    }

    #[tokio::test]
    async fn run_without_profile_returns_503() {
        let (core, _dir) = test_state(MockGenerator::new());
        let response = send(&core, json_request("POST", "/api/insights/run", RUN_BODY)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn run_with_empty_query_returns_400() {
        let (core, _dir) = test_state(MockGenerator::new());
        submit_profile(&core).await;

        let body = r#"{
            "query": "   ",
            "measurement": {
                "height": {"unit": "cm", "value": 170.0},
                "weight": {"unit": "kg", "value": 60.0}
            }
        }"#;
        let response = send(&core, json_request("POST", "/api/insights/run", body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn location_hint_is_accepted() {
        let (core, _dir) = test_state(MockGenerator::new());
        let response = send(
            &core,
            json_request(
                "POST",
                "/api/insights/location",
                r#"{"latitude":12.97,"longitude":77.59}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(core.engine().location().is_some());
    }

    // ── Save and records ────────────────────────────────

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn save_persists_and_lists_the_record() {
        let generator = MockGenerator::new()
            .respond_with("Take rest.")
            .respond_with("**Dolo 650**: One tablet.")
            .respond_with("**Ginger tea**: Twice a day.");
        let (core, _dir) = test_state(generator);
        submit_profile(&core).await;

        send(&core, json_request("POST", "/api/insights/run", RUN_BODY)).await;
        wait_for_settled(&core).await;

        let response = send(&core, json_request("POST", "/api/insights/save", "{}")).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let saved = response_json(response).await;
        assert_eq!(saved["symptoms"], "persistent headache");
        assert_eq!(saved["guidance"], "Take rest.");
        assert_eq!(saved["bmi"], 20.8);

        let response = send(&core, get_request("/api/records")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["records"].as_array().unwrap().len(), 1);
        assert_eq!(json["records"][0]["id"], saved["id"]);
    }

    #[tokio::test]
    async fn save_before_any_run_returns_409() {
        let (core, _dir) = test_state(MockGenerator::new());
        submit_profile(&core).await;

        let response = send(&core, json_request("POST", "/api/insights/save", "{}")).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_READY");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn delete_removes_a_saved_record() {
        let generator = MockGenerator::new()
            .respond_with("Take rest.")
            .respond_with("**Dolo 650**: One tablet.")
            .respond_with("**Ginger tea**: Twice a day.");
        let (core, _dir) = test_state(generator);
        submit_profile(&core).await;

        send(&core, json_request("POST", "/api/insights/run", RUN_BODY)).await;
        wait_for_settled(&core).await;
        let response = send(&core, json_request("POST", "/api/insights/save", "{}")).await;
        let saved = response_json(response).await;
        let id = saved["id"].as_str().unwrap();

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/records/{id}"))
            .body(Body::empty())
            .unwrap();
        let response = send(&core, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&core, get_request("/api/records")).await;
        let json = response_json(response).await;
        assert!(json["records"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_record_returns_404() {
        let (core, _dir) = test_state(MockGenerator::new());
        submit_profile(&core).await;

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/records/{}", uuid::Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        let response = send(&core, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_malformed_id_returns_400() {
        let (core, _dir) = test_state(MockGenerator::new());
        submit_profile(&core).await;

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/records/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let response = send(&core, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
