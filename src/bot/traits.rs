use async_trait::async_trait;
use teloxide::{
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, MessageId},
    Bot, RequestError,
};

use crate::bot::replies::Reply;

/// 抽象Bot API操作的trait，用于测试时mock
#[async_trait]
pub trait BotApi: Send + Sync {
    /// 发送一条回复（文本、解析模式、内联键盘），返回新消息的 ID
    async fn send_reply(&self, chat_id: ChatId, reply: Reply) -> Result<MessageId, RequestError>;
}

#[async_trait]
impl BotApi for Bot {
    async fn send_reply(&self, chat_id: ChatId, reply: Reply) -> Result<MessageId, RequestError> {
        let mut request = self.send_message(chat_id, reply.text);

        if let Some(parse_mode) = reply.parse_mode {
            request = request.parse_mode(parse_mode);
        }
        if let Some(markup) = reply.markup {
            request = request.reply_markup(markup);
        }

        let sent = request.await?;
        Ok(sent.id)
    }
}
