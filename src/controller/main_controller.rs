use crate::common::*;

use crate::dto::{bot_effect::*, inbound_event::*, upload_meta::*};

use crate::enums::message_route::*;

use crate::errors::bot_error::*;

use crate::enums::bot_command_kind::*;

use crate::model::chat::chat_identity::*;

use crate::traits::repository_traits::telegram_repository::*;
use crate::traits::service_traits::command_service::*;

#[derive(Debug, new)]
pub struct MainController<T: TelegramRepository, S: CommandService> {
    telegram_repository: T,
    command_service: S,
}

impl<T, S> MainController<T, S>
where
    T: TelegramRepository + 'static,
    S: CommandService + 'static,
{
    #[doc = r#"
        봇 메인 루프.

        1. 명령 메뉴(setMyCommands) 등록 - 실패해도 봇은 계속 동작
        2. teloxide Dispatcher 로 메시지 업데이트를 수신
           - 같은 채팅의 업데이트는 순서대로, 다른 채팅끼리는 동시에 처리된다
        3. Ctrl-C 수신 시 종료

        # Returns
        * `anyhow::Result<()>` - 정상 종료 시 Ok(())
    "#]
    pub async fn main_task(self: Arc<Self>, bot: Bot) -> anyhow::Result<()> {
        if let Err(e) = self
            .telegram_repository
            .register_commands(BotCommandKind::menu())
            .await
        {
            error!("[MainController->main_task] Failed to register bot commands: {:?}", e);
        }

        let handler = Update::filter_message().endpoint({
            let controller: Arc<Self> = Arc::clone(&self);
            move |msg: Message| {
                let controller: Arc<Self> = Arc::clone(&controller);
                async move {
                    controller.handle_message(msg).await;
                    respond(())
                }
            }
        });

        info!("Dataset plot bot dispatcher start!");

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Dataset plot bot dispatcher stopped");

        Ok(())
    }

    #[doc = "수신 메시지 1건을 처리하고, 모든 오류는 채팅 응답 또는 로그로 끝낸다"]
    async fn handle_message(&self, msg: Message) {
        let chat: ChatIdentity = ChatIdentity::from(msg.chat.id);
        let route: MessageRoute =
            MessageRoute::classify(msg.text(), msg.caption(), msg.document().is_some());

        let event: InboundEvent = match route {
            MessageRoute::Ignore => return,
            MessageRoute::Command(command) => {
                info!("[MainController->handle_message] chat {}: {}", chat, command);
                InboundEvent::Command(command)
            }
            MessageRoute::DatasetUpload => {
                let Some(document) = msg.document() else {
                    return;
                };

                match self.receive_document(chat, document).await {
                    Ok(event) => event,
                    Err(effect) => {
                        self.apply_effect(chat, effect).await;
                        return;
                    }
                }
            }
        };

        let effect: BotEffect = self.command_service.handle_event(chat, event).await;
        self.apply_effect(chat, effect).await;
    }

    #[doc = r#"
        업로드 문서를 검증 후 메모리로 다운로드한다.
        거절되거나 다운로드에 실패하면 사용자에게 보낼 응답을 Err 로 돌려준다.
    "#]
    async fn receive_document(
        &self,
        chat: ChatIdentity,
        document: &Document,
    ) -> Result<InboundEvent, BotEffect> {
        let meta: UploadMeta = UploadMeta::from(document);

        if let Some(rejection) = self.command_service.precheck_upload(&meta) {
            return Err(rejection);
        }

        info!(
            "[MainController->receive_document] chat {}: downloading {:?} ({} bytes)",
            chat,
            meta.file_name(),
            meta.size()
        );

        match self.telegram_repository.download_file(&document.file.id).await {
            Ok(content) => Ok(InboundEvent::DatasetUpload { meta, content }),
            Err(e) => {
                error!("[MainController->receive_document] chat {}: {:?}", chat, e);
                Err(BotEffect::ReplyText(
                    BotError::Transport("could not download the file, please try again".to_string())
                        .to_string(),
                ))
            }
        }
    }

    #[doc = "BotEffect 를 Telegram 으로 전송. 전송 실패는 로그만 남긴다"]
    async fn apply_effect(&self, chat: ChatIdentity, effect: BotEffect) {
        let result: anyhow::Result<()> = match effect {
            BotEffect::ReplyText(text) => self.telegram_repository.send_text(chat, &text).await,
            BotEffect::ReplyFile { file_name, bytes } => {
                self.telegram_repository
                    .send_file(chat, &file_name, bytes)
                    .await
            }
            BotEffect::NoOp => Ok(()),
        };

        if let Err(e) = result {
            error!("[MainController->apply_effect] chat {}: {:?}", chat, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::dataset_registry_impl::*;
    use crate::service::{
        chart_service_impl::*, command_service_impl::*, dataset_service_impl::*,
    };

    #[derive(Debug, Default)]
    struct RecordingTelegram {
        sent: Mutex<Vec<(ChatIdentity, String)>>,
        fail_download: bool,
    }

    #[async_trait]
    impl TelegramRepository for RecordingTelegram {
        async fn register_commands(&self, _commands: Vec<BotCommand>) -> anyhow::Result<()> {
            Ok(())
        }

        async fn download_file(&self, _file_id: &str) -> anyhow::Result<Vec<u8>> {
            if self.fail_download {
                Err(anyhow!("network down"))
            } else {
                Ok(b"X,Y\n1,2\n".to_vec())
            }
        }

        async fn send_text(&self, chat: ChatIdentity, text: &str) -> anyhow::Result<()> {
            self.sent.lock().push((chat, text.to_string()));
            Ok(())
        }

        async fn send_file(
            &self,
            chat: ChatIdentity,
            file_name: &str,
            _bytes: Vec<u8>,
        ) -> anyhow::Result<()> {
            self.sent.lock().push((chat, format!("file:{}", file_name)));
            Ok(())
        }
    }

    type TestController = MainController<
        RecordingTelegram,
        CommandServiceImpl<DatasetRegistryImpl, DatasetServiceImpl, ChartServiceImpl>,
    >;

    fn controller(fail_download: bool) -> TestController {
        let telegram: RecordingTelegram = RecordingTelegram {
            fail_download,
            ..Default::default()
        };
        let command_service = CommandServiceImpl::new(
            Arc::new(DatasetRegistryImpl::new()),
            DatasetServiceImpl::new(5, 1024),
            ChartServiceImpl::new(320, 240),
        );
        MainController::new(telegram, command_service)
    }

    fn document_json(file_name: &str, mime: &str, size: u32) -> Document {
        serde_json::from_value(serde_json::json!({
            "file_id": "FILE_ID",
            "file_unique_id": "UNIQUE",
            "file_size": size,
            "file_name": file_name,
            "mime_type": mime,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn effects_are_sent_to_the_chat() {
        let controller: TestController = controller(false);
        let chat: ChatIdentity = ChatIdentity::new(11);

        controller
            .apply_effect(chat, BotEffect::text("hello"))
            .await;
        controller
            .apply_effect(
                chat,
                BotEffect::ReplyFile {
                    file_name: "scatter.png".to_string(),
                    bytes: vec![1, 2, 3],
                },
            )
            .await;
        controller.apply_effect(chat, BotEffect::NoOp).await;

        let sent = controller.telegram_repository.sent.lock().clone();
        assert_eq!(
            sent,
            vec![
                (chat, "hello".to_string()),
                (chat, "file:scatter.png".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn downloaded_document_becomes_upload_event() {
        let controller: TestController = controller(false);
        let document: Document = document_json("data.csv", "text/csv", 8);

        let event: InboundEvent = controller
            .receive_document(ChatIdentity::new(12), &document)
            .await
            .unwrap();

        match event {
            InboundEvent::DatasetUpload { meta, content } => {
                assert_eq!(meta.file_name().as_deref(), Some("data.csv"));
                assert_eq!(content, b"X,Y\n1,2\n".to_vec());
            }
            other => panic!("expected upload event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn oversized_document_is_not_downloaded() {
        let controller: TestController = controller(true);
        let document: Document = document_json("big.csv", "text/csv", 4096);

        let rejection: BotEffect = controller
            .receive_document(ChatIdentity::new(13), &document)
            .await
            .unwrap_err();

        assert_eq!(
            rejection,
            BotEffect::text("file too large: 4096 bytes (limit 1024 bytes)")
        );
    }

    #[tokio::test]
    async fn download_failure_is_reported_to_the_user() {
        let controller: TestController = controller(true);
        let document: Document = document_json("data.csv", "text/csv", 8);

        let rejection: BotEffect = controller
            .receive_document(ChatIdentity::new(14), &document)
            .await
            .unwrap_err();

        assert_eq!(
            rejection,
            BotEffect::text(
                "failed to reach telegram: could not download the file, please try again"
            )
        );
    }
}
