//! Document upload handler: HTML in, pending confirmation out.

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{Document, KeyboardButton, KeyboardMarkup, Message};

use super::types::{authorized_sender, HandlerDeps, HandlerError, NOT_AUTHORIZED};
use crate::core::{AppError, AppResult};
use crate::mcq::extract_questions;
use crate::session::PendingBatch;

/// Handler for document uploads from the operator.
pub(super) fn document_handler(deps: HandlerDeps) -> teloxide::dispatching::UpdateHandler<HandlerError> {
    use teloxide::dispatching::UpdateFilterExt;

    Update::filter_message()
        .filter(|msg: Message| msg.document().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_document(&bot, &msg, &deps).await }
        })
}

async fn handle_document(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;

    let Some(user) = authorized_sender(&deps.config, msg) else {
        bot.send_message(chat_id, NOT_AUTHORIZED).await?;
        return Ok(());
    };

    let Some(doc) = msg.document() else {
        return Ok(());
    };
    let file_name = doc.file_name.clone().unwrap_or_default();

    if !has_html_extension(&file_name) {
        bot.send_message(chat_id, "Please upload an HTML file.").await?;
        return Ok(());
    }

    // A stored batch is never silently replaced; the operator has to answer
    // the open confirmation (or "No" it away) before the next file counts.
    if deps.sessions.has_pending(user) {
        bot.send_message(
            chat_id,
            "The previous upload is still waiting for a Yes/No answer. \
             Reply No first if you want to discard it.",
        )
        .await?;
        return Ok(());
    }

    let html = match fetch_document_text(bot, doc).await {
        Ok(html) => html,
        Err(e) => {
            log::error!("Error processing document {}: {}", file_name, e);
            bot.send_message(chat_id, format!("Error processing the file: {}", e))
                .await?;
            return Ok(());
        }
    };

    let questions = extract_questions(&html);
    if questions.is_empty() {
        bot.send_message(chat_id, "No valid MCQ questions found in the HTML file.")
            .await?;
        return Ok(());
    }

    let count = questions.len();
    log::info!("Extracted {} questions from {} for user {}", count, file_name, user);

    deps.sessions.insert(
        user,
        PendingBatch {
            questions,
            source_name: file_name.clone(),
        },
    );

    bot.send_message(
        chat_id,
        format!("Found {count} questions in {file_name}.\n\nDo you want to send them as polls to the group?"),
    )
    .reply_markup(confirm_keyboard())
    .await?;

    Ok(())
}

/// Fetches the uploaded document's bytes into memory as UTF-8 text.
async fn fetch_document_text(bot: &Bot, doc: &Document) -> AppResult<String> {
    let file = bot.get_file(doc.file.id.clone()).await?;

    let mut buf: Vec<u8> = Vec::with_capacity(file.size as usize);
    bot.download_file(&file.path, &mut buf).await?;

    String::from_utf8(buf).map_err(|_| AppError::Validation("uploaded file is not valid UTF-8 text".to_string()))
}

fn has_html_extension(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".htm")
}

/// One-time Yes/No reply keyboard for the confirmation prompt.
fn confirm_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new("Yes"), KeyboardButton::new("No")]])
        .one_time_keyboard()
        .resize_keyboard()
}
