//! Pollcast - Telegram bot that publishes MCQ questions from HTML exports
//! as polls to a group chat.
//!
//! A single authorized operator uploads an HTML file; the bot extracts the
//! questions, asks for a yes/no confirmation, and then sends each question
//! to the configured group as a non-anonymous poll (preceded by its image
//! when the question has one).
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, and logging
//! - `mcq`: HTML extraction of questions
//! - `session`: per-user pending-batch state and the confirmation dialog
//! - `telegram`: bot integration, handler tree, and outbound publishing

pub mod cli;
pub mod core;
pub mod mcq;
pub mod session;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult, Config};
pub use mcq::{extract_questions, Question};
pub use session::{ConfirmAction, PendingBatch, SessionStore};
pub use telegram::{publish_batch, PollPublisher, QuestionPublisher};
