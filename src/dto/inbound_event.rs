use crate::enums::bot_command_kind::*;

use crate::dto::upload_meta::*;

#[doc = "전송 계층과 분리된, 한 채팅에서 들어온 이벤트"]
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    DatasetUpload { meta: UploadMeta, content: Vec<u8> },
    Command(BotCommandKind),
    Unrecognized,
}
