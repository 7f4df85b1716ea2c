// The `utils` module holds Google authentication and the text template engine.

pub mod context_hub;
pub mod google_auth;
pub mod template;

pub use crate::utils::template::{TEngine, TEngineError};
