//! REST endpoints for running interviews.
//!
//! The server keeps no session state: every request carries the answers
//! collected so far and the client owns the step counter.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::error::ScoringError;
use crate::flow::{
    AnswerCheck, AnswerValue, CollectedAnswers, FlowCatalog, FlowKind, Question, QuestionFlow,
    QuestionnaireSubmission,
};
use crate::notify::{LeadNotification, NotificationDispatcher};
use crate::scoring::LeadScorer;

/// Shared state for interview routes.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<FlowCatalog>,
    pub scorer: Arc<LeadScorer>,
    pub dispatcher: NotificationDispatcher,
}

#[derive(Debug, Serialize)]
struct FlowSummary {
    kind: FlowKind,
    steps: usize,
    estimated_time: &'static str,
    scored: bool,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub step: usize,
    #[serde(default)]
    pub answers: CollectedAnswers,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub step: usize,
    pub input: String,
    #[serde(default)]
    pub answers: CollectedAnswers,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub answers: CollectedAnswers,
}

/// Outcome of one submitted answer, with what to show next.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub detour: bool,
    pub next_step: usize,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

impl AnswerResponse {
    fn from_check(
        flow: &QuestionFlow,
        step: usize,
        check: AnswerCheck,
        answers: CollectedAnswers,
    ) -> Self {
        // The question to show after this answer, if the flow isn't finished.
        let next = |step: usize, answers: &CollectedAnswers| {
            (!flow.is_complete(step)).then(|| flow.question(step, answers))
        };

        match check {
            AnswerCheck::Accepted {
                field,
                value,
                message,
            } => {
                let answers = answers.with(field.as_str(), value.clone());
                let next_step = step + 1;
                Self {
                    valid: true,
                    question: next(next_step, &answers),
                    field: Some(field),
                    value: Some(value),
                    message,
                    detour: false,
                    next_step,
                    complete: flow.is_complete(next_step),
                }
            }
            AnswerCheck::Rejected { message } => Self {
                valid: false,
                field: None,
                value: None,
                message: Some(message),
                detour: false,
                next_step: step,
                complete: flow.is_complete(step),
                question: next(step, &answers),
            },
            AnswerCheck::Detour { message } => Self {
                valid: false,
                field: None,
                value: None,
                message: Some(message),
                detour: true,
                next_step: step,
                complete: false,
                question: next(step, &answers),
            },
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({"error": message.into()}))).into_response()
}

/// 422 naming the fields still to be answered.
fn incomplete_response(missing: Vec<String>) -> Response {
    let error = ScoringError::IncompleteInterview {
        missing: missing.clone(),
    };
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({"error": error.to_string(), "missing": missing})),
    )
        .into_response()
}

/// 422 naming the first rejected answer and listing every rejected field.
fn invalid_response(invalid: Vec<(String, String)>) -> Response {
    let error = invalid
        .first()
        .map(|(field, reason)| ScoringError::InvalidAnswer {
            field: field.clone(),
            reason: reason.clone(),
        })
        .map(|e| e.to_string())
        .unwrap_or_default();
    let fields: Vec<String> = invalid.into_iter().map(|(field, _)| field).collect();
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({"error": error, "invalid": fields})),
    )
        .into_response()
}

/// Every declared field must be present and pass its step's rule.
fn check_answers(flow: &QuestionFlow, answers: &CollectedAnswers) -> Result<(), Response> {
    let missing = flow.missing_fields(answers);
    if !missing.is_empty() {
        return Err(incomplete_response(missing));
    }
    let invalid = flow.invalid_answers(answers);
    if !invalid.is_empty() {
        warn!(flow = %flow.kind(), fields = invalid.len(), "Completion rejected invalid answers");
        return Err(invalid_response(invalid));
    }
    Ok(())
}

/// Unwrap a JSON body, turning axum's plain-text rejection into the
/// `{"error": ...}` shape every other failure uses.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| error_response(rejection.status(), rejection.body_text()))
}

fn parse_kind(raw: &str) -> Result<FlowKind, Response> {
    raw.parse::<FlowKind>()
        .map_err(|e| error_response(StatusCode::NOT_FOUND, e))
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/flows
///
/// Lists every questionnaire with its length and estimated completion time.
async fn list_flows(State(state): State<AppState>) -> impl IntoResponse {
    let flows: Vec<FlowSummary> = state
        .catalog
        .iter()
        .map(|flow| FlowSummary {
            kind: flow.kind(),
            steps: flow.len(),
            estimated_time: flow.kind().estimated_time(),
            scored: flow.kind().is_scored(),
        })
        .collect();
    Json(flows)
}

/// POST /api/flows/{kind}/question
async fn get_question(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };
    let req = match json_body(payload) {
        Ok(req) => req,
        Err(resp) => return resp,
    };
    Json(state.catalog.get(kind).question(req.step, &req.answers)).into_response()
}

/// POST /api/flows/{kind}/answer
///
/// Validates one answer. The caller stores `value` under `field` and moves
/// to `next_step`; rejected and detour responses keep the same step.
async fn submit_answer(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };
    let req = match json_body(payload) {
        Ok(req) => req,
        Err(resp) => return resp,
    };
    let flow = state.catalog.get(kind);
    let check = flow.validate_answer(req.step, &req.input, &req.answers);
    Json(AnswerResponse::from_check(flow, req.step, check, req.answers)).into_response()
}

/// POST /api/flows/{kind}/complete
///
/// Scores a readiness interview and queues the lead notification; other
/// questionnaires are returned as a submission record. Answers are checked
/// against the flow first, so a partial or tampered set gets a 422.
async fn complete(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: Result<Json<CompleteRequest>, JsonRejection>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };
    let req = match json_body(payload) {
        Ok(req) => req,
        Err(resp) => return resp,
    };

    let flow = state.catalog.get(kind);
    if let Err(resp) = check_answers(flow, &req.answers) {
        return resp;
    }

    if !kind.is_scored() {
        return match QuestionnaireSubmission::from_answers(flow, req.answers) {
            Ok(submission) => {
                info!(flow = %kind, answers = submission.answers.len(), "Questionnaire completed");
                Json(submission).into_response()
            }
            Err(missing) => incomplete_response(missing),
        };
    }

    match state.scorer.score(&req.answers) {
        Ok(result) => {
            let queued = state
                .dispatcher
                .dispatch(LeadNotification::new(kind, req.answers, result.clone()));
            info!(score = result.score, notification_queued = queued, "Interview completed");
            Json(result).into_response()
        }
        Err(ScoringError::IncompleteInterview { missing }) => incomplete_response(missing),
        Err(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    }
}

/// Build the interview REST routes.
pub fn interview_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/flows", get(list_flows))
        .route("/api/flows/{kind}/question", post(get_question))
        .route("/api/flows/{kind}/answer", post(submit_answer))
        .route("/api/flows/{kind}/complete", post(complete))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
