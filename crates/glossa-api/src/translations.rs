//! Handlers for translation endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/translation` | Body: `SubmitTranslationRequest` |
//! | `GET`  | `/word/{w}/language/{l}/translations` | `continuation-token` in and out |
//! | `GET`  | `/word/{w}/language/{l}/confirmed-translation` | `null` when none |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::{HeaderMap, HeaderValue},
  response::{IntoResponse, Response},
};
use glossa_core::{
  identity::IdentityService, request::SubmitTranslationRequest, store::TranslationStore,
  translation::WordId,
};

use crate::{
  AppState, CONTINUATION_TOKEN,
  error::ApiError,
  response::{
    GetConfirmedTranslationResponse, GetTranslationsResponse, SubmitTranslationResponse,
  },
};

fn parse_word(raw: &str) -> Result<WordId, ApiError> {
  raw.parse().map_err(|_| ApiError::bad_request("invalid value 'word'"))
}

// ─── Submit ──────────────────────────────────────────────────────────────────

/// `POST /translation`
pub async fn submit<S, I>(
  State(state): State<AppState<S, I>>,
  payload: Result<Json<SubmitTranslationRequest>, JsonRejection>,
) -> Result<Json<SubmitTranslationResponse>, ApiError>
where
  S: TranslationStore,
  I: IdentityService,
{
  let Json(request) = payload?;
  let outcome = state.engine.submit(request).await?;
  Ok(Json(outcome.into()))
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /word/{word}/language/{language}/translations`
pub async fn list<S, I>(
  State(state): State<AppState<S, I>>,
  Path((word, language)): Path<(String, String)>,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: TranslationStore,
  I: IdentityService,
{
  let word = parse_word(&word)?;
  let token = headers
    .get(CONTINUATION_TOKEN)
    .map(HeaderValue::to_str)
    .transpose()
    .map_err(|_| ApiError::bad_request("invalid value 'continuation-token'"))?
    .unwrap_or_default();

  let page = state.engine.list(word, &language, token).await?;

  let mut out = HeaderMap::new();
  if let Some(next) = page.next {
    let value = HeaderValue::try_from(next.encode()).map_err(|e| ApiError::Internal(Box::new(e)))?;
    out.insert(CONTINUATION_TOKEN, value);
  }
  let body = GetTranslationsResponse {
    translations: page.translations.into_iter().map(Into::into).collect(),
  };
  Ok((out, Json(body)).into_response())
}

// ─── Confirmed ───────────────────────────────────────────────────────────────

/// `GET /word/{word}/language/{language}/confirmed-translation`
pub async fn confirmed<S, I>(
  State(state): State<AppState<S, I>>,
  Path((word, language)): Path<(String, String)>,
) -> Result<Json<GetConfirmedTranslationResponse>, ApiError>
where
  S: TranslationStore,
  I: IdentityService,
{
  let word = parse_word(&word)?;
  let translation = state.engine.confirmed(word, &language).await?;
  Ok(Json(GetConfirmedTranslationResponse { translation: translation.map(Into::into) }))
}
