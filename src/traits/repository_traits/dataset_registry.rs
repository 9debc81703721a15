use crate::common::*;

use crate::model::{chat::chat_identity::*, dataset::dataset::*};

#[doc = r#"
    채팅 식별자 → 최신 데이터셋 저장소.

    채팅당 최대 하나의 데이터셋만 유지하며, `set` 은 병합 없이 기존 값을 교체한다.
"#]
pub trait DatasetRegistry: Send + Sync {
    fn set(&self, chat: ChatIdentity, dataset: Dataset);
    fn get(&self, chat: ChatIdentity) -> Option<Arc<Dataset>>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
