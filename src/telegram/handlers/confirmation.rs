//! Free-text yes/no handler that drains or discards the pending batch.

use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{authorized_sender, HandlerDeps, HandlerError, NOT_AUTHORIZED};
use crate::session::ConfirmAction;
use crate::telegram::publish::publish_batch;

/// Handler for plain text replies (the confirmation dialog).
pub(super) fn confirmation_handler(deps: HandlerDeps) -> teloxide::dispatching::UpdateHandler<HandlerError> {
    use teloxide::dispatching::UpdateFilterExt;

    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_confirmation(&bot, &msg, &deps).await }
        })
}

async fn handle_confirmation(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let Some(user) = authorized_sender(&deps.config, msg) else {
        bot.send_message(chat_id, NOT_AUTHORIZED).await?;
        return Ok(());
    };

    match deps.sessions.resolve_reply(user, text) {
        ConfirmAction::Publish(batch) => {
            bot.send_message(
                chat_id,
                format!(
                    "Sending {} questions from {} as polls...",
                    batch.questions.len(),
                    batch.source_name
                ),
            )
            .await?;

            let outcome = publish_batch(deps.publisher.as_ref(), &batch).await;

            for (question, error) in &outcome.failures {
                // Keep reporting the rest even if one report fails to send.
                let _ = bot
                    .send_message(chat_id, format!("Failed to send poll \"{}\": {}", preview(question), error))
                    .await;
            }

            let summary = if outcome.failures.is_empty() {
                "All polls sent.".to_string()
            } else {
                format!("Done: {} of {} polls sent.", outcome.sent, outcome.attempted())
            };
            bot.send_message(chat_id, summary).await?;
        }
        ConfirmAction::NothingPending => {
            bot.send_message(chat_id, "No questions to send. Please upload an HTML file first.")
                .await?;
        }
        ConfirmAction::Discard => {
            bot.send_message(chat_id, "Okay, I will not send the polls.").await?;
        }
        ConfirmAction::Reprompt => {
            bot.send_message(chat_id, "Invalid option. Please reply with 'Yes' or 'No'.")
                .await?;
        }
    }

    Ok(())
}

fn preview(text: &str) -> String {
    text.chars().take(40).collect()
}
