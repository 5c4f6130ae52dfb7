//! Core types, transition rules, and trait definitions for the Glossa
//! flip-word translation service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::TranslationStore`]; identity backends
//! implement [`identity::IdentityService`]. The [`engine::Engine`] ties the
//! two together.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod cursor;
pub mod engine;
pub mod error;
pub mod identity;
pub mod outcome;
pub mod request;
pub mod rules;
pub mod signing;
pub mod store;
pub mod translation;
pub mod validation;
pub mod words;

pub use error::{Error, Result};
