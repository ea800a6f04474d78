//! HTTP handlers for interview endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    ChangeLanguageCommand, ChangeLanguageHandler, GetTranscriptHandler, GetTranscriptQuery,
    InterviewError, StartInterviewCommand, StartInterviewHandler, SubmitUtteranceCommand,
    SubmitUtteranceHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::screening::DisplayLanguage;

use super::dto::{
    ChangeLanguageRequest, ErrorResponse, LanguageResponse, StartInterviewRequest,
    StartInterviewResponse, SubmitMessageRequest, TranscriptResponse, TurnResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InterviewHandlers {
    start_handler: Arc<StartInterviewHandler>,
    submit_handler: Arc<SubmitUtteranceHandler>,
    language_handler: Arc<ChangeLanguageHandler>,
    transcript_handler: Arc<GetTranscriptHandler>,
}

impl InterviewHandlers {
    pub fn new(
        start_handler: Arc<StartInterviewHandler>,
        submit_handler: Arc<SubmitUtteranceHandler>,
        language_handler: Arc<ChangeLanguageHandler>,
        transcript_handler: Arc<GetTranscriptHandler>,
    ) -> Self {
        Self {
            start_handler,
            submit_handler,
            language_handler,
            transcript_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/interviews - Start an interview
pub async fn start_interview(
    State(handlers): State<InterviewHandlers>,
    body: Option<Json<StartInterviewRequest>>,
) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let language = match req.language.as_deref().map(str::parse::<DisplayLanguage>) {
        None => DisplayLanguage::default(),
        Some(Ok(language)) => language,
        Some(Err(e)) => return bad_request(e.to_string()),
    };

    match handlers
        .start_handler
        .handle(StartInterviewCommand { language })
        .await
    {
        Ok(result) => {
            let response: StartInterviewResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/interviews/:id/messages - Submit one candidate utterance
pub async fn submit_message(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitMessageRequest>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid interview ID"),
    };

    let cmd = SubmitUtteranceCommand {
        session_id,
        text: req.text,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response: TurnResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// PUT /api/interviews/:id/language - Switch display language
pub async fn change_language(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<ChangeLanguageRequest>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid interview ID"),
    };
    let language = match req.language.parse::<DisplayLanguage>() {
        Ok(language) => language,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = ChangeLanguageCommand {
        session_id,
        language,
    };

    match handlers.language_handler.handle(cmd).await {
        Ok(result) => {
            let response: LanguageResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/interviews/:id - Transcript view
pub async fn get_interview(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid interview ID"),
    };

    match handlers
        .transcript_handler
        .handle(GetTranscriptQuery { session_id })
        .await
    {
        Ok(view) => {
            let response: TranscriptResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

fn handle_interview_error(error: InterviewError) -> Response {
    let status = match &error {
        InterviewError::MalformedUserInput => StatusCode::BAD_REQUEST,
        InterviewError::NotFound(_) => StatusCode::NOT_FOUND,
        InterviewError::AlreadyTerminated(_) => StatusCode::CONFLICT,
        InterviewError::Storage(msg) => {
            tracing::error!(error = %msg, "interview storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse::new(error.code(), error.to_string())),
    )
        .into_response()
}
