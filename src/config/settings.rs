use std::env;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, RetailBotError};

/// BotFather 文档中的占位 token，未替换时拒绝启动
pub const PLACEHOLDER_TOKEN: &str = "YOUR_BOT_TOKEN_HERE";
pub const DEFAULT_WEBAPP_URL: &str = "https://muminoff.com/retail-calc/";
pub const DEFAULT_WEBHOOK_ADDR: &str = "0.0.0.0:8443";
pub const DEFAULT_SUPPORT_CONTACT: &str = "@your_username";

/// 接收更新的方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateMode {
    Polling,
    Webhook { url: Url, addr: SocketAddr },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub bot_token: String,
    pub webapp_url: Url,
    pub mode: UpdateMode,
    pub support_contact: String,
    /// 自建 Bot API 服务器地址，未设置时使用 api.telegram.org
    pub api_url: Option<Url>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构建配置，空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bot_token = get("BOT_TOKEN").unwrap_or_else(|| PLACEHOLDER_TOKEN.to_string());

        let webapp_url = get("WEBAPP_URL").unwrap_or_else(|| DEFAULT_WEBAPP_URL.to_string());
        let webapp_url = Url::parse(&webapp_url)
            .map_err(|e| RetailBotError::invalid_url("WEBAPP_URL", e))?;

        let mode = match get("WEBHOOK_URL") {
            Some(raw) => {
                let url = Url::parse(&raw)
                    .map_err(|e| RetailBotError::invalid_url("WEBHOOK_URL", e))?;

                let addr = match (get("WEBHOOK_ADDR"), get("PORT")) {
                    (Some(addr), _) => addr
                        .parse::<SocketAddr>()
                        .map_err(|_| RetailBotError::invalid_address("WEBHOOK_ADDR", addr))?,
                    (None, Some(port)) => {
                        let port = port
                            .parse::<u16>()
                            .map_err(|_| RetailBotError::invalid_address("PORT", port))?;
                        SocketAddr::from(([0, 0, 0, 0], port))
                    }
                    (None, None) => DEFAULT_WEBHOOK_ADDR
                        .parse::<SocketAddr>()
                        .map_err(|_| {
                            RetailBotError::invalid_address("WEBHOOK_ADDR", DEFAULT_WEBHOOK_ADDR)
                        })?,
                };

                UpdateMode::Webhook { url, addr }
            }
            None => UpdateMode::Polling,
        };

        let support_contact =
            get("SUPPORT_CONTACT").unwrap_or_else(|| DEFAULT_SUPPORT_CONTACT.to_string());

        let api_url = get("TELEGRAM_API_URL")
            .map(|raw| Url::parse(&raw))
            .transpose()
            .map_err(|e| RetailBotError::invalid_url("TELEGRAM_API_URL", e))?;

        Ok(Settings {
            bot_token,
            webapp_url,
            mode,
            support_contact,
            api_url,
        })
    }

    /// 唯一在本地区分的错误：token 仍是占位值
    pub fn validate(&self) -> Result<()> {
        if self.has_placeholder_token() {
            return Err(RetailBotError::PlaceholderToken);
        }

        Ok(())
    }

    pub fn has_placeholder_token(&self) -> bool {
        self.bot_token == PLACEHOLDER_TOKEN
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bot_token = token.into();
        self
    }
}
