use crate::common::*;

use crate::dto::{bot_effect::*, inbound_event::*, upload_meta::*};

use crate::model::chat::chat_identity::*;

#[async_trait]
pub trait CommandService: Send + Sync {
    #[doc = "다운로드 전에 업로드를 거절해야 하면 응답을 반환"]
    fn precheck_upload(&self, meta: &UploadMeta) -> Option<BotEffect>;

    async fn handle_event(&self, chat: ChatIdentity, event: InboundEvent) -> BotEffect;
}
