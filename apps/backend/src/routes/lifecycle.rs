//! Session, game, deal and trick lifecycle: `POST` creates (`status: "new"`),
//! `PATCH` reports (`"update"`) or finishes (`"complete"`).

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

use super::{DealPath, RequestStatus};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBody {
    pub token: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameBody {
    pub token: String,
    pub n_game: i32,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealBody {
    #[serde(flatten)]
    pub at: DealPath,
    pub status: String,
    /// Wire card id at each of the 24 deck positions; required on create.
    #[serde(default)]
    pub cards: Option<Vec<i32>>,
    /// Dealer seat.
    #[serde(default)]
    pub pos: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickBody {
    #[serde(flatten)]
    pub at: DealPath,
    pub n_trick: i32,
    pub status: String,
}

fn expect_new(raw: &str) -> Result<(), DomainError> {
    match RequestStatus::parse(raw)? {
        RequestStatus::New => Ok(()),
        other => Err(DomainError::validation(
            ValidationKind::InvalidStatus,
            format!("create requires status \"new\", got {other:?}"),
        )),
    }
}

/// `PATCH` accepts only `update` or `complete`; returns true for `complete`.
fn patch_completes(raw: &str) -> Result<bool, DomainError> {
    match RequestStatus::parse(raw)? {
        RequestStatus::Update => Ok(false),
        RequestStatus::Complete => Ok(true),
        RequestStatus::New => Err(DomainError::validation(
            ValidationKind::InvalidStatus,
            "use POST to create",
        )),
    }
}

async fn create_session(
    body: web::Json<SessionBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    expect_new(&body.status)?;
    let tables = app_state.registry.create_session(&body.token)?;
    Ok(HttpResponse::Created().json(tables))
}

async fn patch_session(
    body: web::Json<SessionBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let registry = &app_state.registry;
    let summary = if patch_completes(&body.status)? {
        registry.complete_session(&body.token)?
    } else {
        registry.session_summary(&body.token)?
    };
    Ok(HttpResponse::Ok().json(summary))
}

async fn create_game(
    body: web::Json<GameBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    expect_new(&body.status)?;
    let summary = app_state.registry.create_game(&body.token, body.n_game)?;
    Ok(HttpResponse::Created().json(summary))
}

async fn patch_game(
    body: web::Json<GameBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let registry = &app_state.registry;
    let summary = if patch_completes(&body.status)? {
        registry.complete_game(&body.token, body.n_game)?
    } else {
        registry.game_summary(&body.token, body.n_game)?
    };
    Ok(HttpResponse::Ok().json(summary))
}

async fn create_deal(
    body: web::Json<DealBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    expect_new(&body.status)?;
    let cards = body.cards.as_deref().ok_or_else(|| {
        DomainError::validation(ValidationKind::InvalidDeck, "cards are required")
    })?;
    debug!(token = %body.at.token, game = body.at.n_game, deal = body.at.n_deal, "create deal");
    let summary = app_state
        .registry
        .create_deal(&body.at.deal_ref(), cards, body.pos)?;
    Ok(HttpResponse::Created().json(summary))
}

async fn patch_deal(
    body: web::Json<DealBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let at = body.at.deal_ref();
    let registry = &app_state.registry;
    let summary = if patch_completes(&body.status)? {
        registry.complete_deal(&at)?
    } else {
        registry.deal_summary(&at)?
    };
    Ok(HttpResponse::Ok().json(summary))
}

async fn create_trick(
    body: web::Json<TrickBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    expect_new(&body.status)?;
    let view = app_state
        .registry
        .create_trick(&body.at.deal_ref(), body.n_trick)?;
    Ok(HttpResponse::Created().json(view))
}

async fn patch_trick(
    body: web::Json<TrickBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let at = body.at.deal_ref();
    let registry = &app_state.registry;
    if patch_completes(&body.status)? {
        Ok(HttpResponse::Ok().json(registry.complete_trick(&at, body.n_trick)?))
    } else {
        Ok(HttpResponse::Ok().json(registry.trick_summary(&at, body.n_trick)?))
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/session")
            .route(web::post().to(create_session))
            .route(web::patch().to(patch_session)),
    )
    .service(
        web::resource("/game")
            .route(web::post().to(create_game))
            .route(web::patch().to(patch_game)),
    )
    .service(
        web::resource("/deal")
            .route(web::post().to(create_deal))
            .route(web::patch().to(patch_deal)),
    )
    .service(
        web::resource("/trick")
            .route(web::post().to(create_trick))
            .route(web::patch().to(patch_trick)),
    );
}
