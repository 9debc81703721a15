use crate::common::*;

use crate::model::chat::chat_identity::*;

#[async_trait]
pub trait TelegramRepository: Send + Sync {
    async fn register_commands(&self, commands: Vec<BotCommand>) -> anyhow::Result<()>;
    async fn download_file(&self, file_id: &str) -> anyhow::Result<Vec<u8>>;
    async fn send_text(&self, chat: ChatIdentity, text: &str) -> anyhow::Result<()>;
    async fn send_file(
        &self,
        chat: ChatIdentity,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<()>;
}
