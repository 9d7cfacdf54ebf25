//! Estimation Requester
//!
//! Obtains plausible values for engine attributes the verified store cannot
//! guarantee, by prompting an external generative text service and parsing
//! its structured reply. Every failure here is soft: the pipeline completes
//! with store data only and a recorded diagnostic.

pub mod client;
pub mod estimate;
pub mod prompt;

pub use client::{CompletionError, OllamaClient, TextCompletion};
pub use estimate::{parse_estimate, strip_reply_wrapper, EstimateError};
pub use prompt::build_prompt;
