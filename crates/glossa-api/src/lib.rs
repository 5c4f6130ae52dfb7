//! JSON HTTP API for Glossa.
//!
//! Exposes an axum [`Router`] backed by an [`Engine`] over any
//! [`TranslationStore`] and [`IdentityService`]. TLS and listener setup are the
//! caller's responsibility.

pub mod error;
pub mod response;
pub mod translations;
pub mod votes;

use std::sync::{
  Arc,
  atomic::{AtomicU64, Ordering},
};

use axum::{
  Router,
  extract::{Request, State},
  http::{HeaderName, Method, header},
  middleware::{self, Next},
  response::Response,
  routing::{get, post},
};
use glossa_core::{engine::Engine, identity::IdentityService, store::TranslationStore};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use tracing::{Instrument as _, debug, info_span};

pub use error::ApiError;

/// Request and response header carrying the listing cursor.
pub const CONTINUATION_TOKEN: HeaderName = HeaderName::from_static("continuation-token");

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, I> {
  pub engine: Arc<Engine<S, I>>,
}

impl<S, I> Clone for AppState<S, I> {
  fn clone(&self) -> Self { Self { engine: self.engine.clone() } }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router for `engine`.
pub fn api_router<S, I>(engine: Arc<Engine<S, I>>) -> Router<()>
where
  S: TranslationStore + 'static,
  I: IdentityService + 'static,
{
  let request_ids = Arc::new(AtomicU64::new(0));

  Router::new()
    .route("/translation", post(translations::submit::<S, I>))
    .route(
      "/word/{word}/language/{language}/translations",
      get(translations::list::<S, I>),
    )
    .route(
      "/word/{word}/language/{language}/confirmed-translation",
      get(translations::confirmed::<S, I>),
    )
    .route("/vote", post(votes::vote::<S, I>))
    .with_state(AppState { engine })
    .layer(middleware::from_fn_with_state(request_ids, request_span))
    .layer(TraceLayer::new_for_http())
    .layer(cors())
}

fn cors() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::PUT, Method::OPTIONS])
    .allow_headers([
      HeaderName::from_static("x-requested-with"),
      header::CONTENT_TYPE,
      CONTINUATION_TOKEN,
    ])
    .expose_headers([CONTINUATION_TOKEN])
}

/// Run the request inside a span tagged with a process-unique id.
async fn request_span(State(ids): State<Arc<AtomicU64>>, req: Request, next: Next) -> Response {
  let id = ids.fetch_add(1, Ordering::Relaxed) + 1;
  let span = info_span!("request", id, method = %req.method(), path = %req.uri().path());

  async move {
    debug!("request started");
    let resp = next.run(req).await;
    debug!(status = %resp.status(), "request finished");
    resp
  }
  .instrument(span)
  .await
}
