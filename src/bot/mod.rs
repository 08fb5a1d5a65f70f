pub mod commands;
pub mod dispatcher;
pub mod replies;
pub mod traits;

pub use commands::{Command, Commands};
pub use dispatcher::{schema, start_bot, BotDispatcher, UpdateErrorLogger};
pub use replies::Reply;
pub use traits::BotApi;
