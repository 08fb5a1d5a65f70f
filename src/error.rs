use teloxide::RequestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetailBotError {
    #[error("Please set your bot token in BOT_TOKEN environment variable!")]
    PlaceholderToken,

    #[error("Invalid URL in {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid listen address in {name}: {value}")]
    InvalidAddress { name: &'static str, value: String },

    #[error("Telegram API error: {0}")]
    Telegram(#[from] RequestError),
}

pub type Result<T> = std::result::Result<T, RetailBotError>;

impl RetailBotError {
    pub fn invalid_url(name: &'static str, source: url::ParseError) -> Self {
        Self::InvalidUrl { name, source }
    }

    pub fn invalid_address(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidAddress {
            name,
            value: value.into(),
        }
    }

    /// 启动阶段的配置错误，进程不会进入接收循环
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RetailBotError::PlaceholderToken
                | RetailBotError::InvalidUrl { .. }
                | RetailBotError::InvalidAddress { .. }
        )
    }
}
