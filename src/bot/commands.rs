use std::sync::Arc;

use log::info;
use teloxide::{
    types::{ChatId, User},
    utils::command::BotCommands,
};

use crate::bot::replies;
use crate::bot::traits::BotApi;
use crate::config::Settings;
use crate::error::Result;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Mavjud buyruqlar:")]
pub enum Command {
    #[command(description = "Botni ishga tushirish va kalkulyatorni ochish")]
    Start,
    #[command(description = "Yordam olish")]
    Help,
    #[command(description = "Bot haqida ma'lumot")]
    About,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "/start",
            Command::Help => "/help",
            Command::About => "/about",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Commands {
    settings: Arc<Settings>,
}

impl Commands {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn handle_command(
        &self,
        api: &dyn BotApi,
        chat_id: ChatId,
        from: Option<&User>,
        command: Command,
    ) -> Result<()> {
        match command {
            Command::Start => self.handle_start(api, chat_id, from).await,
            Command::Help => self.handle_help(api, chat_id).await,
            Command::About => self.handle_about(api, chat_id).await,
        }
    }

    async fn handle_start(
        &self,
        api: &dyn BotApi,
        chat_id: ChatId,
        from: Option<&User>,
    ) -> Result<()> {
        let name = replies::display_name(from);
        let reply = replies::greeting(name, &self.settings.webapp_url);

        api.send_reply(chat_id, reply).await?;
        Ok(())
    }

    async fn handle_help(&self, api: &dyn BotApi, chat_id: ChatId) -> Result<()> {
        api.send_reply(chat_id, replies::help(&self.settings)).await?;
        Ok(())
    }

    async fn handle_about(&self, api: &dyn BotApi, chat_id: ChatId) -> Result<()> {
        api.send_reply(chat_id, replies::about(&self.settings)).await?;
        Ok(())
    }

    /// Mini App 回传的数据只记录并确认，不做解析
    pub async fn handle_webapp_data(
        &self,
        api: &dyn BotApi,
        chat_id: ChatId,
        data: &str,
    ) -> Result<()> {
        info!("Received data from Mini App in chat {chat_id}: {data}");

        api.send_reply(chat_id, replies::webapp_data_received(data))
            .await?;
        Ok(())
    }
}
