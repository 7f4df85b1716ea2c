//! Conversational layer over the processed emails.
//!
//! A [`ChatSession`] classifies each query, answers summary requests locally,
//! and forwards everything else (augmented with the recency convention) to a
//! [`ChatEngine`] together with the bounded [`ChatMemory`].

pub mod engine;
pub mod intent;
pub mod memory;
pub mod prompt;
pub mod session;

pub use self::engine::{ChatEngine, ContextChatEngine, EngineRequest, ResponseMode};
pub use self::intent::{Intent, classify};
pub use self::memory::{ChatMemory, ChatTurn, Role};
pub use self::session::{ChatSession, all_emails_summary};
