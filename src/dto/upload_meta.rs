use crate::common::*;

#[doc = "다운로드 전에 알 수 있는 업로드 문서 정보"]
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, new)]
#[getset(get = "pub")]
pub struct UploadMeta {
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub size: u64,
}

impl From<&Document> for UploadMeta {
    fn from(doc: &Document) -> Self {
        UploadMeta {
            file_name: doc.file_name.clone(),
            mime_type: doc.mime_type.as_ref().map(|mime| mime.essence_str().to_string()),
            size: u64::from(doc.file.size),
        }
    }
}
