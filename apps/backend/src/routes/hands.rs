//! Bid, kitty swap, defense and play. `GET` (query string) asks the hand
//! engine for a suggestion and changes nothing; `POST` (JSON body) submits.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::bidding::BidOutcome;
use crate::domain::codec::WireCardId;
use crate::domain::deal::PlayResult;
use crate::domain::state::Seat;
use crate::error::AppError;
use crate::services::{BidRequest, DealRef, PlayRequest, SwapRequest};
use crate::state::AppState;

fn deal_ref(token: &str, n_game: i32, n_deal: i32) -> DealRef {
    DealRef {
        token: token.to_string(),
        game: n_game,
        deal: n_deal,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidParams {
    pub token: String,
    pub n_game: i32,
    pub n_deal: i32,
    pub round: i32,
    pub turn_card: i32,
    pub seat: i32,
    /// Suit code, -1 to pass.
    #[serde(default)]
    pub suit: Option<i32>,
    #[serde(default)]
    pub alone: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    pub suit: i32,
    pub alone: bool,
    /// 0 pass, 1 call, 2 alone.
    pub strength: u8,
    pub declarer: Option<Seat>,
    pub partner: Option<Seat>,
}

impl From<BidOutcome> for BidResponse {
    fn from(outcome: BidOutcome) -> Self {
        Self {
            suit: outcome.call.suit_code(),
            alone: outcome.call.alone(),
            strength: outcome.strength.code(),
            declarer: outcome.declarer,
            partner: outcome.partner,
        }
    }
}

fn bid(params: &BidParams, state: &AppState, commit: bool) -> Result<HttpResponse, AppError> {
    let req = BidRequest {
        round: params.round,
        turn_card: params.turn_card,
        seat: params.seat,
        suit: params.suit,
        alone: params.alone,
    };
    let outcome = state.registry.bid(
        &deal_ref(&params.token, params.n_game, params.n_deal),
        &req,
        commit,
    )?;
    Ok(HttpResponse::Ok().json(BidResponse::from(outcome)))
}

async fn get_bid(
    query: web::Query<BidParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    bid(&query, &app_state, false)
}

async fn post_bid(
    body: web::Json<BidParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    bid(&body, &app_state, true)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParams {
    pub token: String,
    pub n_game: i32,
    pub n_deal: i32,
    pub declarer: i32,
    pub turn_card: i32,
    pub seat: i32,
    #[serde(default)]
    pub card: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub card: u8,
}

impl From<WireCardId> for CardResponse {
    fn from(card: WireCardId) -> Self {
        Self { card: card.value() }
    }
}

fn swap(params: &SwapParams, state: &AppState, commit: bool) -> Result<HttpResponse, AppError> {
    let req = SwapRequest {
        declarer: params.declarer,
        turn_card: params.turn_card,
        seat: params.seat,
        card: params.card,
    };
    let card = state.registry.swap(
        &deal_ref(&params.token, params.n_game, params.n_deal),
        &req,
        commit,
    )?;
    Ok(HttpResponse::Ok().json(CardResponse::from(card)))
}

async fn get_swap(
    query: web::Query<SwapParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    swap(&query, &app_state, false)
}

async fn post_swap(
    body: web::Json<SwapParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    swap(&body, &app_state, true)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseParams {
    pub token: String,
    pub n_game: i32,
    pub n_deal: i32,
    pub seat: i32,
    #[serde(default)]
    pub alone: bool,
}

fn defense(params: &DefenseParams, state: &AppState) -> Result<HttpResponse, AppError> {
    let echo = state.registry.defense(
        &deal_ref(&params.token, params.n_game, params.n_deal),
        params.seat,
        params.alone,
    )?;
    Ok(HttpResponse::Ok().json(echo))
}

// Lone defense is echoed only, so both verbs behave the same.
async fn get_defense(
    query: web::Query<DefenseParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    defense(&query, &app_state)
}

async fn post_defense(
    body: web::Json<DefenseParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    defense(&body, &app_state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayParams {
    pub token: String,
    pub n_game: i32,
    pub n_deal: i32,
    pub n_trick: i32,
    /// Play sequence number within the trick.
    pub seq: i32,
    pub seat: i32,
    #[serde(default)]
    pub card: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse {
    pub seq: u8,
    pub seat: Seat,
    pub card: u8,
    pub winning_seat: Option<Seat>,
    pub trick_ready: bool,
    pub committed: bool,
}

impl From<PlayResult> for PlayResponse {
    fn from(result: PlayResult) -> Self {
        Self {
            seq: result.slot,
            seat: result.seat,
            card: result.card.value(),
            winning_seat: result.winning_seat,
            trick_ready: result.trick_ready,
            committed: result.committed,
        }
    }
}

fn play(params: &PlayParams, state: &AppState, commit: bool) -> Result<HttpResponse, AppError> {
    let req = PlayRequest {
        trick: params.n_trick,
        seq: params.seq,
        seat: params.seat,
        card: params.card,
    };
    let result = state.registry.play(
        &deal_ref(&params.token, params.n_game, params.n_deal),
        &req,
        commit,
    )?;
    Ok(HttpResponse::Ok().json(PlayResponse::from(result)))
}

async fn get_play(
    query: web::Query<PlayParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    play(&query, &app_state, false)
}

async fn post_play(
    body: web::Json<PlayParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    play(&body, &app_state, true)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/bid")
            .route(web::get().to(get_bid))
            .route(web::post().to(post_bid)),
    )
    .service(
        web::resource("/swap")
            .route(web::get().to(get_swap))
            .route(web::post().to(post_swap)),
    )
    .service(
        web::resource("/defense")
            .route(web::get().to(get_defense))
            .route(web::post().to(post_defense)),
    )
    .service(
        web::resource("/play")
            .route(web::get().to(get_play))
            .route(web::post().to(post_play)),
    );
}
