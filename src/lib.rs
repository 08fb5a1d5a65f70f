// 公开内部模块以便测试
pub mod bot;
pub mod config;
pub mod error;
pub mod utils;

// 重新导出常用的类型和结构体
pub use bot::{start_bot, BotApi, BotDispatcher, Command, Commands, Reply};
pub use config::Settings;
pub use error::RetailBotError;
