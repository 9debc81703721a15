use crate::errors::bot_error::*;

use crate::model::dataset::dataset::*;

use crate::dto::upload_meta::*;

pub trait DatasetService: Send + Sync {
    #[doc = "업로드된 문서가 CSV 텍스트 문서이고 크기 제한 이내인지 확인"]
    fn validate_upload(&self, meta: &UploadMeta) -> Result<(), BotError>;

    #[doc = "CSV 바이트를 Dataset 으로 파싱 (첫 행은 헤더)"]
    fn parse_dataset(&self, content: &[u8]) -> Result<Dataset, BotError>;

    #[doc = "채팅 응답용 표 미리보기 문자열"]
    fn render_preview(&self, dataset: &Dataset) -> String;
}
