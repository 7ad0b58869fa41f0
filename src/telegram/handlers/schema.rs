//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::handle_start_command;
use super::confirmation::confirmation_handler;
use super::documents::document_handler;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// This function returns a handler tree that can be used with teloxide's
/// Dispatcher. The same schema is used in production and in integration
/// tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_documents = deps.clone();

    dptree::entry()
        // Commands first so "/start" is never read as a confirmation reply
        .branch(command_handler(deps_commands))
        // Document uploads
        .branch(document_handler(deps_documents))
        // Free-text yes/no replies
        .branch(confirmation_handler(deps))
}

/// Handler for bot commands (/start, /help)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start | Command::Help => {
                        handle_start_command(&bot, &msg, &deps).await?;
                    }
                }
                Ok(())
            }
        },
    ))
}
