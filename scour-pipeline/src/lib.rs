//! The reactive search pipeline: raw input events in, result list out.
//!
//! Two input signals (explicit query submission and a keystroke-level
//! empty-flag) drive a single driver task that deduplicates consecutive
//! submissions, runs fetches on background tasks, and publishes the latest
//! results plus a busy flag through `watch` channels. Only the most recently
//! triggered fetch may update the visible output; superseded outcomes are
//! dropped. Fetch failures collapse to an empty result list, never to an
//! error state.

pub mod backend;
pub mod pipeline;

pub use backend::SearchBackend;
pub use pipeline::{PipelineClosed, PipelineInput, SearchPipeline};
