use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, NotFoundKind, SequenceKind, StatusKind, ValidationKind,
};
use crate::errors::ErrorCode;
use crate::trace_ctx;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Engine failure: {detail}")]
    Engine { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Engine { .. } => ErrorCode::EngineFailure,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Helper method to extract error detail from any error variant
    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Engine { detail } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Engine { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: String) -> Self {
        Self::Validation {
            code,
            detail,
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    pub fn bad_request(code: ErrorCode, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn not_found(code: ErrorCode, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn conflict(code: ErrorCode, detail: String) -> Self {
        Self::Conflict { code, detail }
    }

    pub fn engine(detail: String) -> Self {
        Self::Engine { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Sequence(kind, detail) => {
                let code = match kind {
                    SequenceKind::Game => ErrorCode::GameSequence,
                    SequenceKind::Deal => ErrorCode::DealSequence,
                    SequenceKind::Trick => ErrorCode::TrickSequence,
                    SequenceKind::Bid => ErrorCode::BidSequence,
                    SequenceKind::Play => ErrorCode::PlaySequence,
                };
                AppError::conflict(code, detail)
            }
            DomainError::Status(kind, detail) => {
                let code = match kind {
                    StatusKind::SessionInactive => ErrorCode::SessionInactive,
                    StatusKind::GameInactive => ErrorCode::GameInactive,
                    StatusKind::DealInactive => ErrorCode::DealInactive,
                    StatusKind::TrickInactive => ErrorCode::TrickInactive,
                    StatusKind::PreviousActive => ErrorCode::PreviousActive,
                    StatusKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                    StatusKind::TrickIncomplete => ErrorCode::TrickIncomplete,
                };
                AppError::conflict(code, detail)
            }
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidCard => ErrorCode::InvalidCard,
                    ValidationKind::InvalidDeck => ErrorCode::InvalidDeck,
                    ValidationKind::InvalidSeat => ErrorCode::InvalidSeat,
                    ValidationKind::InvalidSuit => ErrorCode::InvalidSuit,
                    ValidationKind::InvalidStatus => ErrorCode::InvalidStatus,
                    ValidationKind::InvalidBid => ErrorCode::InvalidBid,
                    ValidationKind::CardNotInDealerHand => ErrorCode::CardNotInDealerHand,
                    ValidationKind::TurnCardMismatch => ErrorCode::TurnCardMismatch,
                    ValidationKind::DeclarerMismatch => ErrorCode::DeclarerMismatch,
                    ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
                    ValidationKind::SkippedSeat => ErrorCode::SkippedSeat,
                    ValidationKind::NotADefender => ErrorCode::NotADefender,
                    ValidationKind::IllegalMove => ErrorCode::IllegalMove,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::invalid(code, detail)
            }
            DomainError::Engine(kind, detail) => {
                AppError::engine(format!("{kind:?}: {detail}"))
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Deal => ErrorCode::DealNotFound,
                    NotFoundKind::Trick => ErrorCode::TrickNotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::SessionExists => ErrorCode::SessionExists,
                };
                AppError::conflict(code, detail)
            }
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://euchre.invalid/errors/{}", code.as_str()),
            title: Self::humanize_code(code.as_str()),
            status: status.as_u16(),
            detail,
            code: code.as_str().to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}
