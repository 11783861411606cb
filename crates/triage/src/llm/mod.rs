//! Remote classification orchestration.
//!
//! The provider trait is the network seam: it sends one request and hands
//! back the raw response envelope. Envelope normalization and the
//! retry/backoff state machine live above it, so tests can drive the whole
//! path with a scripted provider.

pub mod client;
pub mod envelope;
pub mod mock_provider;
pub mod provider;

pub use client::{TriageClient, BACKOFF_SCHEDULE};
pub use envelope::ResponseBody;
pub use provider::{CompletionProvider, OpenAiProvider};
