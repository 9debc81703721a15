use crate::common::*;

#[derive(Debug, Clone, Deserialize, Getters)]
#[serde(default)]
#[getset(get = "pub")]
pub struct SystemConfig {
    /* 미리보기에서 앞/뒤로 보여줄 행 수 */
    pub preview_rows: usize,
    pub max_upload_bytes: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            preview_rows: 5,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}
