use crate::common::*;

use crate::model::configs::{chart_config::*, system_config::*};

use crate::utils_modules::io_utils::*;

use crate::env_configuration::env_config::*;

static TOTAL_CONFIG: once_lazy<TotalConfig> = once_lazy::new(initialize_bot_config);

#[doc = "Function to initialize bot configuration information instances"]
pub fn initialize_bot_config() -> TotalConfig {
    info!("initialize_bot_config() START!");
    TotalConfig::new()
}

#[derive(Debug, Default, Deserialize, Getters)]
#[serde(default)]
#[getset(get = "pub")]
pub struct TotalConfig {
    pub system: SystemConfig,
    pub chart: ChartConfig,
}

#[doc = "system 설정 정보"]
pub fn get_system_config_info() -> &'static SystemConfig {
    &TOTAL_CONFIG.system
}

#[doc = "차트 렌더링 설정 정보"]
pub fn get_chart_config_info() -> &'static ChartConfig {
    &TOTAL_CONFIG.chart
}

impl TotalConfig {
    fn new() -> Self {
        let Some(config_path) = BOT_CONFIG_PATH.as_deref() else {
            info!("[TotalConfig->new] BOT_CONFIG_PATH is not set. Using default configuration.");
            return TotalConfig::default();
        };

        match read_toml_from_file::<TotalConfig>(config_path) {
            Ok(config) => config,
            Err(e) => {
                let err_msg: &str =
                    "Failed to convert the data from BOT_CONFIG_PATH into the TotalConfig structure.";
                error!("[TotalConfig->new] {} {} {:?}", err_msg, config_path, e);
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: TotalConfig = toml::from_str(
            r#"
            [chart]
            width = 1024
            "#,
        )
        .unwrap();

        assert_eq!(*config.chart().width(), 1024);
        assert_eq!(*config.chart().height(), 600);
        assert_eq!(*config.system().preview_rows(), 5);
        assert_eq!(*config.system().max_upload_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn empty_file_is_default_config() {
        let config: TotalConfig = toml::from_str("").unwrap();
        assert_eq!(*config.chart().width(), 800);
    }
}
