use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::DealRef;
use crate::errors::ErrorCode;

pub mod health;
pub mod hands;
pub mod lifecycle;

/// Lifecycle status carried by every create/patch body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    New,
    Update,
    Complete,
}

impl RequestStatus {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "new" => Ok(Self::New),
            "update" => Ok(Self::Update),
            "complete" => Ok(Self::Complete),
            other => Err(DomainError::validation(
                ValidationKind::InvalidStatus,
                format!("unknown status {other:?}"),
            )),
        }
    }
}

/// Fields shared by every request that addresses a deal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPath {
    pub token: String,
    pub n_game: i32,
    pub n_deal: i32,
}

impl DealPath {
    pub fn deal_ref(&self) -> DealRef {
        DealRef {
            token: self.token.clone(),
            game: self.n_game,
            deal: self.n_deal,
        }
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected json body");
    AppError::bad_request(ErrorCode::BadRequest, format!("invalid JSON body: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    AppError::bad_request(ErrorCode::BadRequest, format!("invalid query: {err}")).into()
}

/// Registers every route plus extractor configs that render payload errors
/// as Problem Details.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));

    cfg.service(web::scope("/health").configure(health::configure_routes));
    lifecycle::configure_routes(cfg);
    hands::configure_routes(cfg);
}
