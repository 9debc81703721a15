use crate::common::*;

use crate::dto::{bot_effect::*, inbound_event::*, upload_meta::*};

use crate::enums::{bot_command_kind::*, plot_kind::*};

use crate::errors::bot_error::*;

use crate::model::{chat::chat_identity::*, dataset::dataset::*};

use crate::traits::repository_traits::dataset_registry::*;
use crate::traits::service_traits::{chart_service::*, command_service::*, dataset_service::*};

const SET_DATASET_USAGE: &str = "attach a CSV file with the caption /set_dataset";

#[doc = r#"
    채팅 이벤트를 응답(BotEffect)으로 바꾸는 전송 계층 독립 디스패처.

    레지스트리는 외부에서 주입받으며, 모든 요청 단위 오류는 여기서 텍스트 응답으로 변환된다.
"#]
#[derive(Debug, new)]
pub struct CommandServiceImpl<R: DatasetRegistry, D: DatasetService, C: ChartService> {
    registry: Arc<R>,
    dataset_service: D,
    chart_service: C,
}

impl<R, D, C> CommandServiceImpl<R, D, C>
where
    R: DatasetRegistry,
    D: DatasetService,
    C: ChartService,
{
    #[doc = r#"
        데이터셋 업로드 처리.

        1. 문서 형식/크기 검증
        2. CSV 파싱 (실패 시 레지스트리는 건드리지 않는다)
        3. 레지스트리에 채팅 기준으로 저장 (기존 값 교체)
        4. 미리보기 문자열 반환
    "#]
    fn ingest_dataset(
        &self,
        chat: ChatIdentity,
        meta: &UploadMeta,
        content: &[u8],
    ) -> Result<String, BotError> {
        self.dataset_service.validate_upload(meta)?;

        let dataset: Dataset = self.dataset_service.parse_dataset(content)?;
        let preview: String = self.dataset_service.render_preview(&dataset);

        info!(
            "[CommandServiceImpl->ingest_dataset] chat {}: {} rows x {} columns",
            chat,
            dataset.row_count(),
            dataset.column_count()
        );

        self.registry.set(chat, dataset);
        info!(
            "[CommandServiceImpl->ingest_dataset] registry now holds {} chat(s)",
            self.registry.len()
        );

        Ok(preview)
    }

    #[doc = "레지스트리의 데이터셋으로 플롯을 그려 PNG 파일 응답을 만든다"]
    async fn plot(&self, chat: ChatIdentity, kind: PlotKind) -> Result<BotEffect, BotError> {
        let dataset: Arc<Dataset> = self.registry.get(chat).ok_or(BotError::NoDataset)?;

        let bytes: Vec<u8> = self.chart_service.render_plot(kind, dataset).await?;

        Ok(BotEffect::ReplyFile {
            file_name: kind.file_name().to_string(),
            bytes,
        })
    }

    fn reply_error(chat: ChatIdentity, context: &str, err: BotError) -> BotEffect {
        match err {
            BotError::NoDataset => {
                info!("[CommandServiceImpl->{}] chat {}: {}", context, chat, err)
            }
            _ => error!("[CommandServiceImpl->{}] chat {}: {}", context, chat, err),
        }

        BotEffect::ReplyText(err.to_string())
    }
}

#[async_trait]
impl<R, D, C> CommandService for CommandServiceImpl<R, D, C>
where
    R: DatasetRegistry,
    D: DatasetService,
    C: ChartService,
{
    fn precheck_upload(&self, meta: &UploadMeta) -> Option<BotEffect> {
        self.dataset_service
            .validate_upload(meta)
            .err()
            .map(|e| {
                warn!("[CommandServiceImpl->precheck_upload] rejected upload: {}", e);
                BotEffect::ReplyText(e.to_string())
            })
    }

    async fn handle_event(&self, chat: ChatIdentity, event: InboundEvent) -> BotEffect {
        match event {
            InboundEvent::DatasetUpload { meta, content } => {
                match self.ingest_dataset(chat, &meta, &content) {
                    Ok(preview) => BotEffect::ReplyText(preview),
                    Err(e) => Self::reply_error(chat, "ingest_dataset", e),
                }
            }
            InboundEvent::Command(BotCommandKind::SetDataset) => BotEffect::text(SET_DATASET_USAGE),
            InboundEvent::Command(command) => {
                let Some(kind) = PlotKind::from_command(command) else {
                    return BotEffect::NoOp;
                };

                match self.plot(chat, kind).await {
                    Ok(effect) => effect,
                    Err(e) => Self::reply_error(chat, "plot", e),
                }
            }
            InboundEvent::Unrecognized => BotEffect::NoOp,
        }
    }
}
