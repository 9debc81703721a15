use crate::common::*;

#[derive(Debug, Clone, Copy, Deserialize, Getters)]
#[serde(default)]
#[getset(get = "pub")]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 800,
            height: 600,
        }
    }
}
