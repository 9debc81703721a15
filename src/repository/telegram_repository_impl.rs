use crate::common::*;

use crate::model::chat::chat_identity::*;

use crate::traits::repository_traits::telegram_repository::*;

#[doc = "teloxide `Bot` 위에 올린 Telegram 전송 어댑터"]
#[derive(Debug, Clone, new)]
pub struct TelegramRepositoryImpl {
    bot: Bot,
}

#[async_trait]
impl TelegramRepository for TelegramRepositoryImpl {
    #[doc = "봇 명령 메뉴(setMyCommands) 등록"]
    async fn register_commands(&self, commands: Vec<BotCommand>) -> anyhow::Result<()> {
        self.bot
            .set_my_commands(commands)
            .await
            .context("[TelegramRepositoryImpl->register_commands] setMyCommands failed")?;

        Ok(())
    }

    #[doc = "첨부 파일 전체를 메모리로 다운로드"]
    async fn download_file(&self, file_id: &str) -> anyhow::Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(file_id)
            .await
            .context("[TelegramRepositoryImpl->download_file] getFile failed")?;

        let mut buffer: Vec<u8> = Vec::with_capacity(file.meta.size as usize);

        self.bot
            .download_file(&file.path, &mut buffer)
            .await
            .with_context(|| {
                format!(
                    "[TelegramRepositoryImpl->download_file] download failed: {}",
                    file.path
                )
            })?;

        Ok(buffer)
    }

    async fn send_text(&self, chat: ChatIdentity, text: &str) -> anyhow::Result<()> {
        self.bot
            .send_message(ChatId::from(chat), text)
            .await
            .with_context(|| {
                format!("[TelegramRepositoryImpl->send_text] sendMessage failed: chat {}", chat)
            })?;

        Ok(())
    }

    async fn send_file(
        &self,
        chat: ChatIdentity,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<()> {
        let document: InputFile = InputFile::memory(bytes).file_name(file_name.to_string());

        self.bot
            .send_document(ChatId::from(chat), document)
            .await
            .with_context(|| {
                format!(
                    "[TelegramRepositoryImpl->send_file] sendDocument failed: chat {}, {}",
                    chat, file_name
                )
            })?;

        Ok(())
    }
}
