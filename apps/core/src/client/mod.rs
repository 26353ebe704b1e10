//! Request client for the classification service.
//!
//! `traits` defines the seam the controller depends on, `gemini` is the
//! production implementation, and `prompt` holds the instructions sent
//! alongside the user's text.

pub mod gemini;
pub mod prompt;
pub mod traits;

pub use gemini::GeminiClient;
pub use traits::DignityClassifier;
