use crate::common::*;

#[doc = "데이터셋 소유 단위가 되는 대화(채팅) 식별자"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, new)]
pub struct ChatIdentity(i64);

impl From<ChatId> for ChatIdentity {
    fn from(chat_id: ChatId) -> Self {
        ChatIdentity(chat_id.0)
    }
}

impl From<ChatIdentity> for ChatId {
    fn from(chat: ChatIdentity) -> Self {
        ChatId(chat.0)
    }
}

impl Display for ChatIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
