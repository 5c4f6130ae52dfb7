//! Handler for `POST /vote`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use glossa_core::{
  identity::IdentityService, outcome::VoteOutcome, request::VoteRequest, store::TranslationStore,
};

use crate::{AppState, error::ApiError, response::VoteResponse};

/// `POST /vote`
pub async fn vote<S, I>(
  State(state): State<AppState<S, I>>,
  payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<VoteResponse>, ApiError>
where
  S: TranslationStore,
  I: IdentityService,
{
  let Json(request) = payload?;
  let response = match state.engine.vote(request).await? {
    VoteOutcome::Accepted { tally, .. } => VoteResponse::accepted(tally),
    VoteOutcome::Rejected(rejection) => VoteResponse::rejected(rejection),
    VoteOutcome::UnknownTranslation => {
      return Err(ApiError::bad_request("invalid value 'translationId'"));
    }
  };
  Ok(Json(response))
}
