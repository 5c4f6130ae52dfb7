//! The `IdentityService` trait: signer recovery and identity membership.

use std::future::Future;

use thiserror::Error;

/// Identity states that count as a valid network identity.
pub const VALID_STATES: [&str; 3] = ["Newbie", "Verified", "Human"];

pub fn is_valid_state(state: &str) -> bool { VALID_STATES.contains(&state) }

#[derive(Debug, Error)]
pub enum IdentityError {
  /// The service understood the request and refused it (e.g. a malformed
  /// signature). Surfaces to the caller as a client error.
  #[error("{0}")]
  Rejected(String),

  /// The service could not be reached or answered unexpectedly.
  #[error("identity service unavailable: {0}")]
  Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
  pub fn unavailable(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    Self::Unavailable(e.into())
  }
}

/// External service that recovers signers and reports identity validity.
///
/// Implementations apply a bounded timeout and never retry.
pub trait IdentityService: Send + Sync {
  /// Recover the address that produced `signature` over `message`.
  fn recover_signer<'a>(
    &'a self,
    message: &'a str,
    signature: &'a str,
  ) -> impl Future<Output = Result<String, IdentityError>> + Send + 'a;

  /// Whether `address` is currently a valid identity. Unknown addresses are
  /// `false`, not an error.
  fn is_identity<'a>(
    &'a self,
    address: &'a str,
  ) -> impl Future<Output = Result<bool, IdentityError>> + Send + 'a;
}
