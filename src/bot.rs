use crate::config::Config;
use crate::relay::Relay;
use std::sync::Arc;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::ChatAction;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    Start,
}

pub async fn run_bot(config: Config) -> anyhow::Result<()> {
    let bot = Bot::new(&config.telegram_bot_token);
    let relay = Arc::new(Relay::new(&config));

    if !relay.is_configured() {
        tracing::warn!(
            "OLLAMA_HOST is not set; messages will be answered with a configuration error"
        );
    }

    let handler = {
        let command_handler = dptree::entry()
            .filter_command::<Command>()
            .endpoint(handle_command);

        // Plain text only; unknown /commands are dropped, like the start
        // command branch drops non-commands.
        let text_handler = dptree::filter(|msg: Message| {
            msg.text().is_some_and(|text| !text.starts_with('/'))
        })
        .endpoint({
            let relay = relay.clone();
            move |bot: Bot, msg: Message| {
                let relay = relay.clone();
                async move { handle_text(bot, msg, relay).await }
            }
        });

        Update::filter_message()
            .branch(command_handler)
            .branch(text_handler)
    };

    tracing::info!(model = %config.ollama_model, "Bot started. Waiting for messages...");

    Dispatcher::builder(bot.clone(), handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            teloxide::update_listeners::polling_default(bot).await,
            LoggingErrorHandler::with_custom_text("Dispatcher error"),
        )
        .await;

    Ok(())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
) -> Result<(), teloxide::RequestError> {
    match cmd {
        Command::Start => {
            let name = msg
                .from
                .as_ref()
                .map_or("there", |user| user.first_name.as_str());
            bot.send_message(msg.chat.id, greeting(name)).await?;
        }
    }
    Ok(())
}

/// Greeting sent for /start; never touches the inference endpoint.
pub fn greeting(first_name: &str) -> String {
    format!(
        "Hi {first_name}! I'm a bot powered by a local Ollama model. \
         Just send me a message and I'll respond."
    )
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    relay: Arc<Relay>,
) -> Result<(), teloxide::RequestError> {
    let chat_id = msg.chat.id;
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // The configuration-error branch replies without a typing indicator.
    if relay.is_configured()
        && let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await
    {
        tracing::warn!(chat_id = chat_id.0, "Failed to send typing action: {e}");
    }

    let reply = relay.reply_to(text).await;
    bot.send_message(chat_id, reply).await?;

    Ok(())
}
