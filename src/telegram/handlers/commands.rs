//! /start and /help instruction message

use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{authorized_sender, HandlerDeps, HandlerError, NOT_AUTHORIZED};

pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;

    if authorized_sender(&deps.config, msg).is_none() {
        bot.send_message(chat_id, NOT_AUTHORIZED).await?;
        return Ok(());
    }

    let first_name = msg
        .from
        .as_ref()
        .map(|user| user.first_name.as_str())
        .unwrap_or("there");

    // Plain text on purpose: the template below must show its tags literally.
    bot.send_message(chat_id, instructions(first_name)).await?;

    Ok(())
}

fn instructions(first_name: &str) -> String {
    format!(
        "Hello {first_name}!\n\n\
         I publish MCQ questions as polls to a Telegram group.\n\n\
         Send me an HTML file with your questions. Each question goes in a \
         <div class=\"question-box\"> with the prompt in a <p> tag and an \
         optional <img>; every following <div class=\"answer\"> holds one \
         option in its own <p>.\n\n\
         Example:\n\
         <div class=\"question-box\">\n  <p>What is the capital of France?</p>\n  <img src=\"https://example.com/paris.jpg\">\n</div>\n\
         <div class=\"answer\"><p>London</p></div>\n\
         <div class=\"answer\"><p>Paris</p></div>\n\
         <div class=\"answer\"><p>Berlin</p></div>\n\
         <div class=\"answer\"><p>Rome</p></div>\n\n\
         After parsing I will ask for a Yes/No confirmation before anything \
         is sent to the group."
    )
}
