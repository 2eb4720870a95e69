//! Turnbridge: one request contract for many conversational platforms.
//!
//! Inbound webhook payloads are hydrated into platform adapters that all
//! implement [`request::CanonicalRequest`]. The dialogue engine queries and
//! mutates requests through that trait only, then serializes them back with
//! [`codec::RequestCodec`] for the next turn.
//!
//! See `DESIGN.md` for the architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accessor;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;

pub mod platforms;
pub mod request;

pub use codec::{JsonInput, RequestCodec};
pub use error::RequestError;
pub use platforms::{AnyRequest, GoogleActionRequest, GoogleBusinessRequest, Platform};
pub use request::{CanonicalRequest, CanonicalView};
