#[doc = "이벤트 처리 결과로 채팅에 수행할 응답"]
#[derive(Debug, Clone, PartialEq)]
pub enum BotEffect {
    ReplyText(String),
    ReplyFile { file_name: String, bytes: Vec<u8> },
    NoOp,
}

impl BotEffect {
    pub fn text(msg: impl Into<String>) -> Self {
        BotEffect::ReplyText(msg.into())
    }
}
