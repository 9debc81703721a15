use crate::enums::bot_command_kind::*;

#[doc = "수신 메시지를 어떤 처리 흐름으로 보낼지에 대한 분류"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRoute {
    DatasetUpload,
    Command(BotCommandKind),
    Ignore,
}

impl MessageRoute {
    #[doc = r#"
        메시지의 텍스트/캡션/첨부 여부만으로 처리 경로를 결정한다.

        - 첨부 파일 + 캡션이 정확히 `/set_dataset` → 데이터셋 업로드
        - 그 외 첨부 파일 → 무시
        - 텍스트가 명령 토큰과 정확히 일치 → 명령
    "#]
    pub fn classify(text: Option<&str>, caption: Option<&str>, has_document: bool) -> Self {
        if has_document {
            return match caption.and_then(BotCommandKind::parse) {
                Some(BotCommandKind::SetDataset) => MessageRoute::DatasetUpload,
                _ => MessageRoute::Ignore,
            };
        }

        match text.and_then(BotCommandKind::parse) {
            Some(command) => MessageRoute::Command(command),
            None => MessageRoute::Ignore,
        }
    }
}
