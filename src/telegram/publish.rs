//! Outbound publishing of confirmed questions.
//!
//! The Telegram calls sit behind [`QuestionPublisher`] so the drain logic
//! can be exercised in tests with a recording stub.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, InputPollOption};

use crate::core::{AppError, AppResult};
use crate::mcq::Question;
use crate::session::PendingBatch;

/// Sends one question to the destination chat. Implementations send the
/// illustration first (when present), then the poll, and report a single
/// outcome for the pair.
#[async_trait]
pub trait QuestionPublisher: Send + Sync {
    async fn publish(&self, question: &Question) -> AppResult<()>;
}

/// Publishes questions as non-anonymous polls to one fixed group chat.
pub struct PollPublisher {
    bot: Bot,
    chat: ChatId,
}

impl PollPublisher {
    pub fn new(bot: Bot, chat: ChatId) -> Self {
        Self { bot, chat }
    }
}

#[async_trait]
impl QuestionPublisher for PollPublisher {
    async fn publish(&self, question: &Question) -> AppResult<()> {
        if let Some(image) = &question.image_url {
            let url = url::Url::parse(image).map_err(AppError::Url)?;
            self.bot.send_photo(self.chat, InputFile::url(url)).await?;
        }

        self.bot
            .send_poll(
                self.chat,
                question.text.clone(),
                question
                    .options
                    .iter()
                    .cloned()
                    .map(InputPollOption::new)
                    .collect::<Vec<_>>(),
            )
            .is_anonymous(false)
            .await?;

        Ok(())
    }
}

/// Result of draining one confirmed batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Questions whose photo/poll pair went out.
    pub sent: usize,
    /// Question prompt and error for every failed send, in batch order.
    pub failures: Vec<(String, AppError)>,
}

impl BatchOutcome {
    pub fn attempted(&self) -> usize {
        self.sent + self.failures.len()
    }
}

/// Sends every question in the batch, in order, awaiting each outcome
/// before the next. A failed send is recorded and does not stop the rest;
/// there are no retries.
pub async fn publish_batch(publisher: &dyn QuestionPublisher, batch: &PendingBatch) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for question in &batch.questions {
        match publisher.publish(question).await {
            Ok(()) => {
                outcome.sent += 1;
                log::info!("Poll sent for question: {}", preview(&question.text));
            }
            Err(e) => {
                log::error!("Failed to send poll for question {}: {}", preview(&question.text), e);
                outcome.failures.push((question.text.clone(), e));
            }
        }
    }

    outcome
}

fn preview(text: &str) -> String {
    text.chars().take(40).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records published prompts; fails any question containing "boom".
    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl QuestionPublisher for RecordingPublisher {
        async fn publish(&self, question: &Question) -> AppResult<()> {
            if question.text.contains("boom") {
                return Err(AppError::Validation("simulated send failure".to_string()));
            }
            self.published.lock().unwrap().push(question.text.clone());
            Ok(())
        }
    }

    fn batch_of(texts: &[&str]) -> PendingBatch {
        PendingBatch {
            questions: texts
                .iter()
                .map(|t| Question {
                    text: (*t).to_string(),
                    options: vec!["a".to_string(), "b".to_string()],
                    image_url: None,
                })
                .collect(),
            source_name: "quiz.html".to_string(),
        }
    }

    #[tokio::test]
    async fn test_publishes_every_question_in_order() {
        let publisher = RecordingPublisher::default();
        let batch = batch_of(&["first", "second", "third"]);

        let outcome = publish_batch(&publisher, &batch).await;

        assert_eq!(outcome.sent, 3);
        assert!(outcome.failures.is_empty());
        assert_eq!(*publisher.published.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_the_batch() {
        let publisher = RecordingPublisher::default();
        let batch = batch_of(&["first", "boom in the middle", "third"]);

        let outcome = publish_batch(&publisher, &batch).await;

        assert_eq!(outcome.sent, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, "boom in the middle");
        assert_eq!(outcome.attempted(), 3);
        // The question after the failure still went out.
        assert_eq!(*publisher.published.lock().unwrap(), vec!["first", "third"]);
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_no_op() {
        let publisher = RecordingPublisher::default();
        let outcome = publish_batch(&publisher, &batch_of(&[])).await;

        assert_eq!(outcome.sent, 0);
        assert!(outcome.failures.is_empty());
        assert!(publisher.published.lock().unwrap().is_empty());
    }
}
