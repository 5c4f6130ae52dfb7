//! Error type for `glossa-node`.

use glossa_core::identity::IdentityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{url} answered {status}")]
  Status {
    url:    String,
    status: reqwest::StatusCode,
  },

  /// The node answered with an error envelope.
  #[error("node error: {0}")]
  Node(String),

  /// The node answered with neither a result nor an error.
  #[error("node returned an empty response")]
  EmptyResponse,

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Catalog(#[from] glossa_core::Error),
}

impl From<Error> for IdentityError {
  fn from(e: Error) -> Self { IdentityError::unavailable(e) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
