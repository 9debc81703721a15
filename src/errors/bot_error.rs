use crate::common::*;

#[doc = r#"
    요청 단위로 발생하는 사용자 노출용 오류.

    `Display` 문자열이 그대로 채팅 응답 메시지가 되므로, 문구를 바꿀 때는
    사용자에게 보이는 텍스트가 바뀐다는 점에 유의한다.
"#]
#[derive(Debug, Error)]
pub enum BotError {
    #[error("failed to parse dataset: {0}")]
    DatasetParse(String),

    #[error("unsupported file type: expected a CSV text document")]
    UnsupportedDocument,

    #[error("file too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("no dataset specified")]
    NoDataset,

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("column {column} contains non-numeric value '{value}' at row {row}")]
    NonNumericValue {
        column: String,
        value: String,
        row: usize,
    },

    #[error("column {0} has no numeric values")]
    NoNumericValues(String),

    #[error("column {0} value range is too large to plot")]
    RangeTooLarge(String),

    #[error("failed to render plot: {0}")]
    Render(String),

    #[error("failed to reach telegram: {0}")]
    Transport(String),
}

impl From<csv::Error> for BotError {
    fn from(err: csv::Error) -> Self {
        BotError::DatasetParse(err.to_string())
    }
}
