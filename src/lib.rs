//! # Sesame (password sessions)
//!
//! `sesame` registers users, logs them in with a password, and keeps them
//! logged in with rotating refresh tokens delivered through an `HttpOnly`
//! cookie.
//!
//! ## Sessions
//!
//! - **Access token:** short-lived HS256 JWT returned in the JSON body.
//! - **Refresh token:** a row in `refresh_tokens`; only its id travels to the
//!   client, in the `@NASDAQ-refresh` cookie.
//! - **Rotation:** login and refresh delete every refresh token of the user
//!   before issuing a new one.
//!
//! The refresh flow rotates the token *before* checking whether the presented
//! one had expired, so an expired cookie still leaves a fresh token behind even
//! though the client gets a `401`.

pub mod cli;
pub mod sesame;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
