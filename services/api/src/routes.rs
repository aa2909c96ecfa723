use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use meta_scorer::error::AppError;
use meta_scorer::scoring::{AggregationResult, ModuleName};
use serde_json::{json, Map, Value};
use std::sync::atomic::Ordering;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/score", post(score_endpoint))
        .route("/api/v1/config/weights", get(weights_endpoint))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores one compound. The body is the raw module-output mapping so that
/// incomplete requests surface as a 400 listing every missing module.
pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AggregationResult>, AppError> {
    let Json(payload) = payload?;
    let result = state.aggregator.aggregate(&payload)?;
    Ok(Json(result))
}

pub(crate) async fn weights_endpoint(Extension(state): Extension<AppState>) -> Json<Value> {
    let weights: Map<String, Value> = ModuleName::ordered()
        .into_iter()
        .map(|module| {
            let weight = state
                .aggregator
                .config()
                .weight(module)
                .map_or(Value::Null, Value::from);
            (module.key().to_string(), weight)
        })
        .collect();

    Json(Value::Object(weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use meta_scorer::scoring::{NoopObserver, ScoringAggregator};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let config_path =
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/score_config.yaml");
        let aggregator = ScoringAggregator::from_path(config_path, Arc::new(NoopObserver))
            .expect("shipped configuration loads");
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            aggregator,
        };
        router().layer(Extension(state))
    }

    fn lead_compound() -> Value {
        json!({
            "docking": {"affinity_kcal": -8.6, "rmsd": 1.8, "num_converged_poses": 4},
            "adme_pk": {
                "logP": 2.5,
                "HIA": "high",
                "half_life_hr": 4.0,
                "CYP_inhibition": false,
                "clearance": "acceptable"
            },
            "toxicity": {"num_models_flagged": 1, "high_risk_models": []},
            "druggability": {"pocket_score": 0.75, "volume": 420, "hydrophobicity": 0.55},
            "drug_likeness": {"num_violations": 1},
            "off_target": {"num_off_targets": 3, "selectivity_index": 6.5}
        })
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.expect("router dispatch");
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload = serde_json::from_slice(&body).expect("json");
        (status, payload)
    }

    fn post_score(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/score")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).expect("serialize request")))
            .expect("request")
    }

    #[tokio::test]
    async fn score_endpoint_returns_aggregation_result() {
        let (status, payload) = send(app(true), post_score(&lead_compound())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["svs_score"], json!(80));
        assert_eq!(payload["go_decision"], json!("go"));
        assert_eq!(payload["score_breakdown"]["docking"], json!(20));
        assert_eq!(payload["failure_rationale"], json!([]));
    }

    #[tokio::test]
    async fn score_endpoint_rejects_incomplete_requests() {
        let mut request = lead_compound();
        request
            .as_object_mut()
            .expect("request is an object")
            .remove("toxicity");

        let (status, payload) = send(app(true), post_score(&request)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = payload["error"].as_str().expect("error message");
        assert!(message.contains("missing required modules: toxicity"));
    }

    #[tokio::test]
    async fn score_endpoint_wraps_malformed_bodies_in_json_errors() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/score")
            .header("content-type", "application/json")
            .body(Body::from("{\"docking\": "))
            .expect("request");

        let (status, payload) = send(app(true), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = payload["error"].as_str().expect("error message");
        assert!(message.starts_with("invalid request body:"));

        let untyped = Request::builder()
            .method("POST")
            .uri("/api/v1/score")
            .body(Body::from(serde_json::to_vec(&lead_compound()).expect("serialize")))
            .expect("request");

        let (status, payload) = send(app(true), untyped).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].is_string());
    }

    #[tokio::test]
    async fn score_endpoint_reports_override_rationale() {
        let mut request = lead_compound();
        request["toxicity"] = json!({"num_models_flagged": 3, "high_risk_models": ["DILIrank"]});

        let (status, payload) = send(app(true), post_score(&request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["go_decision"], json!("no-go"));
        let rationale = payload["failure_rationale"]
            .as_array()
            .expect("rationale list");
        assert_eq!(rationale.len(), 1);
        assert!(rationale[0]
            .as_str()
            .expect("rationale entry")
            .starts_with("Toxicity override triggered:"));
    }

    #[tokio::test]
    async fn weights_endpoint_lists_every_module() {
        let request = Request::builder()
            .uri("/api/v1/config/weights")
            .body(Body::empty())
            .expect("request");

        let (status, payload) = send(app(true), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            payload,
            json!({
                "docking": 25.0,
                "adme_pk": 20.0,
                "toxicity": 20.0,
                "druggability": 10.0,
                "drug_likeness": 10.0,
                "off_target": 15.0
            })
        );
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let request = || {
            Request::builder()
                .uri("/ready")
                .body(Body::empty())
                .expect("request")
        };

        let (status, payload) = send(app(false), request()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload["status"], json!("initializing"));

        let (status, _) = send(app(true), request()).await;
        assert_eq!(status, StatusCode::OK);
    }
}
