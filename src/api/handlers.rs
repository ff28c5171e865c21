//! API handlers and response envelope.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::agent::AgentKind;
use crate::orchestrator::Orchestrator;
use crate::viz::VizPayload;

/// Shared state: the orchestrator is cheap to share and fully stateless
/// across runs.
#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
}

/// Request body for an agent run. The prompt is optional; a missing or
/// blank prompt falls back to the agent's default instruction.
#[derive(Debug, Default, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Success envelope: `{ok: true, report, viz?}`.
#[derive(Debug, Serialize)]
struct RunEnvelope {
    ok: bool,
    report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    viz: Option<VizPayload>,
}

/// Error envelope: `{ok: false, error}`.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    ok: bool,
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorEnvelope {
        ok: false,
        error: message.into(),
    };
    (status, Json(body)).into_response()
}

/// `GET /api/health`
pub async fn health() -> Response {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
    .into_response()
}

/// `POST /api/run/:agent`
pub async fn run_agent(
    State(state): State<ApiState>,
    Path(agent): Path<String>,
    body: Option<Json<RunRequest>>,
) -> Response {
    let Ok(kind) = agent.parse::<AgentKind>() else {
        return error_response(StatusCode::BAD_REQUEST, format!("Unknown agent '{agent}'."));
    };

    let prompt = body
        .and_then(|Json(req)| req.prompt)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| state.orchestrator.default_instruction(kind));

    match state.orchestrator.run(kind, &prompt).await {
        Ok(outcome) => {
            let body = RunEnvelope {
                ok: true,
                report: outcome.report,
                viz: outcome.viz,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            error!(agent = kind.id(), error = %err, "agent run failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
