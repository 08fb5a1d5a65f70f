use std::sync::Arc;

use async_trait::async_trait;
use cucumber::{given, then, when, World};
use teloxide::types::{ChatId, MessageId, ParseMode, User};
use teloxide::utils::command::BotCommands;
use teloxide::RequestError;
use tokio::sync::Mutex;

// 导入项目模块
use retailcalcbot::bot::commands::{Command, Commands};
use retailcalcbot::bot::replies::Reply;
use retailcalcbot::bot::traits::BotApi;
use retailcalcbot::config::Settings;
use retailcalcbot::error::RetailBotError;

// 重用integration_tests中的MockBotApi实现
#[derive(Debug, Clone, Default)]
pub struct MockBotApi {
    pub sent_messages: Arc<Mutex<Vec<(ChatId, Reply)>>>,
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockBotApi {
    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().await = should_fail;
    }

    pub async fn get_sent_messages(&self) -> Vec<(ChatId, Reply)> {
        self.sent_messages.lock().await.clone()
    }

    pub async fn clear_all(&self) {
        self.sent_messages.lock().await.clear();
        *self.should_fail.lock().await = false;
    }
}

#[async_trait]
impl BotApi for MockBotApi {
    async fn send_reply(&self, chat_id: ChatId, reply: Reply) -> Result<MessageId, RequestError> {
        if *self.should_fail.lock().await {
            return Err(RequestError::Api(teloxide::ApiError::Unknown(
                "Network connection failed".to_string(),
            )));
        }

        let mut messages = self.sent_messages.lock().await;
        messages.push((chat_id, reply));
        Ok(MessageId(messages.len() as i32))
    }
}

// World结构，管理测试状态
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct RetailBotWorld {
    pub bot_api: MockBotApi,
    pub commands: Option<Commands>,
    pub current_chat_id: ChatId,
    pub current_user: Option<User>,
    pub last_result: Option<Result<(), RetailBotError>>,
}

impl RetailBotWorld {
    async fn new() -> Self {
        Self {
            bot_api: MockBotApi::default(),
            commands: None,
            current_chat_id: ChatId(12345), // 默认值，可通过测试步骤修改
            current_user: None,
            last_result: None,
        }
    }

    fn commands(&self) -> &Commands {
        self.commands.as_ref().expect("Mini App 地址尚未设置")
    }

    async fn last_reply(&self) -> Reply {
        let messages = self.bot_api.get_sent_messages().await;
        messages.last().expect("没有发送任何回复").1.clone()
    }
}

#[given(expr = "Mock Bot API 已经初始化")]
async fn mock_bot_api_initialized(world: &mut RetailBotWorld) {
    world.bot_api.clear_all().await;
}

#[given(expr = "Mini App 地址为 {string}")]
async fn webapp_url_is(world: &mut RetailBotWorld, url: String) {
    let settings = Settings::from_lookup(|key| match key {
        "BOT_TOKEN" => Some("123456:CUCUMBER".to_string()),
        "WEBAPP_URL" => Some(url.clone()),
        _ => None,
    })
    .unwrap();
    world.commands = Some(Commands::new(Arc::new(settings)));
}

#[given(expr = "用户 {string} 在聊天 {string} 中")]
async fn user_in_chat(world: &mut RetailBotWorld, name: String, chat_id: String) {
    world.current_chat_id = ChatId(chat_id.parse().unwrap());
    world.current_user = Some(
        serde_json::from_str(
            &serde_json::json!({
                "id": 1000,
                "is_bot": false,
                "first_name": name,
            })
            .to_string(),
        )
        .unwrap(),
    );
}

#[given(expr = "匿名用户在聊天 {string}")]
async fn anonymous_in_chat(world: &mut RetailBotWorld, chat_id: String) {
    world.current_chat_id = ChatId(chat_id.parse().unwrap());
    world.current_user = None;
}

#[given(expr = "Bot API 被设置为失败模式")]
async fn set_bot_api_to_fail(world: &mut RetailBotWorld) {
    world.bot_api.set_should_fail(true).await;
}

#[when(expr = "用户发送命令 {string}")]
async fn user_sends_command(world: &mut RetailBotWorld, text: String) {
    let command = Command::parse(&text, "retail_calc_bot").unwrap();
    let result = world
        .commands()
        .handle_command(
            &world.bot_api,
            world.current_chat_id,
            world.current_user.as_ref(),
            command,
        )
        .await;
    world.last_result = Some(result);
}

#[then(expr = "回复应该发送成功")]
async fn reply_should_be_sent(world: &mut RetailBotWorld) {
    assert!(matches!(world.last_result, Some(Ok(()))));
    let messages = world.bot_api.get_sent_messages().await;
    assert_eq!(messages.last().unwrap().0, world.current_chat_id);
}

#[then(expr = "回复应该包含 {string}")]
async fn reply_should_contain(world: &mut RetailBotWorld, expected_text: String) {
    let reply = world.last_reply().await;
    assert!(
        reply.text.contains(&expected_text),
        "{:?} does not contain {:?}",
        reply.text,
        expected_text
    );
}

#[then(expr = "回复按钮应该打开 {string}")]
async fn reply_button_should_open(world: &mut RetailBotWorld, url: String) {
    let reply = world.last_reply().await;
    assert_eq!(reply.webapp_url().map(|u| u.as_str()), Some(url.as_str()));
}

#[then(expr = "回复应该使用 HTML 格式")]
async fn reply_should_use_html(world: &mut RetailBotWorld) {
    assert_eq!(world.last_reply().await.parse_mode, Some(ParseMode::Html));
}

#[then(expr = "回复不应该带按钮")]
async fn reply_should_have_no_button(world: &mut RetailBotWorld) {
    assert!(world.last_reply().await.markup.is_none());
}

#[then(expr = "应该返回 Telegram 错误")]
async fn should_return_telegram_error(world: &mut RetailBotWorld) {
    assert!(matches!(
        world.last_result,
        Some(Err(RetailBotError::Telegram(_)))
    ));
}

#[then(expr = "不应该发送任何消息")]
async fn nothing_should_be_sent(world: &mut RetailBotWorld) {
    assert!(world.bot_api.get_sent_messages().await.is_empty());
}

#[tokio::main]
async fn main() {
    RetailBotWorld::run("tests/features").await;
}
