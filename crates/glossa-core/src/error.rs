//! Error types for `glossa-core`.
//!
//! Business-rule refusals are not errors; they travel as
//! [`Rejection`](crate::outcome::Rejection) values. This type only covers
//! client-input failures and infrastructure failures.

use thiserror::Error;

use crate::identity::IdentityError;

#[derive(Debug, Error)]
pub enum Error {
  /// The request was malformed or failed validation. Never retried.
  #[error("{0}")]
  BadRequest(String),

  #[error("identity service error: {0}")]
  Identity(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("word catalog error: {0}")]
  Catalog(#[from] serde_json::Error),
}

impl Error {
  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::BadRequest(message.into())
  }

  pub fn is_client_error(&self) -> bool { matches!(self, Self::BadRequest(_)) }
}

impl From<IdentityError> for Error {
  fn from(e: IdentityError) -> Self {
    match e {
      IdentityError::Rejected(message) => Self::BadRequest(message),
      other => Self::Identity(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
