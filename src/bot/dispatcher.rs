use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use log::{debug, error, info, warn};
use teloxide::{
    dispatching::UpdateHandler,
    error_handlers::ErrorHandler,
    prelude::*,
    types::{AllowedUpdate, MessageKind, WebAppData},
    update_listeners::{webhooks, Polling},
    utils::command::BotCommands,
};

use crate::bot::commands::{Command, Commands};
use crate::bot::traits::BotApi;
use crate::config::{Settings, UpdateMode};
use crate::error::{Result, RetailBotError};

/// 处理过程中出现的任何错误都只写日志，不做分类、重试或吞掉
#[derive(Debug, Default)]
pub struct UpdateErrorLogger {
    handled: AtomicU64,
}

impl UpdateErrorLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn handled_count(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }
}

impl<E> ErrorHandler<E> for UpdateErrorLogger
where
    E: Debug + Send + 'static,
{
    fn handle_error(self: Arc<Self>, error: E) -> BoxFuture<'static, ()> {
        self.handled.fetch_add(1, Ordering::Relaxed);
        warn!("Update caused error: {error:?}");
        Box::pin(async {})
    }
}

/// 订阅全部更新类型
pub fn all_update_kinds() -> Vec<AllowedUpdate> {
    vec![
        AllowedUpdate::Message,
        AllowedUpdate::EditedMessage,
        AllowedUpdate::ChannelPost,
        AllowedUpdate::EditedChannelPost,
        AllowedUpdate::InlineQuery,
        AllowedUpdate::ChosenInlineResult,
        AllowedUpdate::CallbackQuery,
        AllowedUpdate::ShippingQuery,
        AllowedUpdate::PreCheckoutQuery,
        AllowedUpdate::Poll,
        AllowedUpdate::PollAnswer,
        AllowedUpdate::MyChatMember,
        AllowedUpdate::ChatMember,
        AllowedUpdate::ChatJoinRequest,
    ]
}

/// 更新处理树：三个命令 + Mini App 回传数据
///
/// 依赖：`Arc<dyn BotApi>`、`Commands`，以及 Dispatcher 自动注入的 `Update`、`Me`。
pub fn schema() -> UpdateHandler<RetailBotError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(command_endpoint),
        )
        .branch(dptree::filter_map(web_app_data).endpoint(webapp_data_endpoint))
}

/// Mini App 通过 sendData 回传的数据（`MessageKind::WebAppData`）
pub fn web_app_data(msg: Message) -> Option<WebAppData> {
    match msg.kind {
        MessageKind::WebAppData(data) => Some(data.web_app_data),
        _ => None,
    }
}

async fn command_endpoint(
    api: Arc<dyn BotApi>,
    commands: Commands,
    msg: Message,
    cmd: Command,
) -> Result<()> {
    debug!(
        "Handling command {} from chat: {}, user: {:?}",
        cmd.as_str(),
        msg.chat.id,
        msg.from().map(|u| u.id)
    );

    commands
        .handle_command(api.as_ref(), msg.chat.id, msg.from(), cmd)
        .await
}

async fn webapp_data_endpoint(
    api: Arc<dyn BotApi>,
    commands: Commands,
    msg: Message,
    data: WebAppData,
) -> Result<()> {
    commands
        .handle_webapp_data(api.as_ref(), msg.chat.id, &data.data)
        .await
}

pub struct BotDispatcher {
    settings: Arc<Settings>,
    commands: Commands,
    error_logger: Arc<UpdateErrorLogger>,
}

impl BotDispatcher {
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let commands = Commands::new(settings.clone());
        Self {
            settings,
            commands,
            error_logger: UpdateErrorLogger::new(),
        }
    }

    pub fn error_logger(&self) -> Arc<UpdateErrorLogger> {
        self.error_logger.clone()
    }

    pub async fn run(self, bot: Bot) -> Result<()> {
        info!("🤖 Starting dispatcher...");

        let api: Arc<dyn BotApi> = Arc::new(bot.clone());

        info!(
            "Registered {} command handlers and 1 error observer",
            Command::bot_commands().len()
        );

        let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
            .dependencies(dptree::deps![api, self.commands.clone()])
            .default_handler(|upd| async move {
                debug!("Unhandled update: {:?}", upd.id);
            })
            .error_handler(self.error_logger.clone())
            .enable_ctrlc_handler()
            .build();

        let listener_errors = LoggingErrorHandler::with_custom_text("An error from the update listener");

        match &self.settings.mode {
            UpdateMode::Polling => {
                info!("📡 Receiving updates via long polling");
                let listener = Polling::builder(bot)
                    .allowed_updates(all_update_kinds())
                    .delete_webhook()
                    .await
                    .build();

                dispatcher
                    .dispatch_with_listener(listener, listener_errors)
                    .await;
            }
            UpdateMode::Webhook { url, addr } => {
                info!("🌐 Receiving updates via webhook {url} (listening on {addr})");
                let listener =
                    webhooks::axum(bot, webhooks::Options::new(*addr, url.clone())).await?;

                dispatcher
                    .dispatch_with_listener(listener, listener_errors)
                    .await;
            }
        }

        info!("Dispatcher stopped");
        Ok(())
    }
}

/// 启动机器人的主函数
///
/// token 仍为占位值时直接返回错误，不会创建客户端。
pub async fn start_bot(settings: Settings) -> Result<()> {
    settings.validate()?;

    info!("Starting bot...");
    info!("Mini App URL: {}", settings.webapp_url);

    let bot = match &settings.api_url {
        Some(api_url) => {
            info!("Using Bot API server: {api_url}");
            Bot::new(&settings.bot_token).set_api_url(api_url.clone())
        }
        None => Bot::new(&settings.bot_token),
    };

    match bot.get_me().await {
        Ok(me) => {
            info!("✅ Bot connected successfully:");
            info!("  - Username: @{}", me.username());
            info!("  - Name: {}", me.first_name);
            info!("  - ID: {}", me.id);
        }
        Err(e) => {
            error!("❌ Failed to connect to Telegram Bot API: {e}");
            return Err(e.into());
        }
    }

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to publish command menu: {e}");
    }

    BotDispatcher::new(settings).run(bot).await
}
