/*
Create date : 2026-10-00
Description : Telegram bot that stores an uploaded CSV dataset per chat and
              replies with scatter / histogram / heatmap plots of it.

History     : 2026-10-00       # [v.1.0.0] first create
*/

mod common;
mod external_deps;
mod prelude;
use common::*;

mod env_configuration;
use env_configuration::env_config::*;

mod errors;

mod enums;

mod dto;

mod model;
use model::configs::{chart_config::*, system_config::*, total_config::*};

mod traits;

mod repository;
use repository::{dataset_registry_impl::*, telegram_repository_impl::*};

mod service;
use service::{chart_service_impl::*, command_service_impl::*, dataset_service_impl::*};

mod utils_modules;
use utils_modules::logger_utils::*;

mod controller;
use controller::main_controller::*;

#[tokio::main]
async fn main() {
    /* 전역로거 설정 및 초기 설정 */
    dotenv().ok();
    let _logger_handle: LoggerHandle = set_global_logger().unwrap_or_else(|e| {
        let err_msg: &str = "[main] An issue occurred while initializing the global logger.";
        eprintln!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    info!("Dataset plot bot start!");

    /* 필수 설정: 봇 토큰 (없으면 치명적 오류로 종료) */
    let bot: Bot = Bot::new(BOT_TOKEN.as_str());

    let system_config: &SystemConfig = get_system_config_info();
    let chart_config: &ChartConfig = get_chart_config_info();

    /* 의존 주입 */
    let registry: Arc<DatasetRegistryImpl> = Arc::new(DatasetRegistryImpl::new());
    let dataset_service: DatasetServiceImpl = DatasetServiceImpl::new(
        *system_config.preview_rows(),
        *system_config.max_upload_bytes(),
    );
    let chart_service: ChartServiceImpl =
        ChartServiceImpl::new(*chart_config.width(), *chart_config.height());
    let command_service: CommandServiceImpl<
        DatasetRegistryImpl,
        DatasetServiceImpl,
        ChartServiceImpl,
    > = CommandServiceImpl::new(registry, dataset_service, chart_service);

    let telegram_repository: TelegramRepositoryImpl = TelegramRepositoryImpl::new(bot.clone());

    let main_controller: Arc<
        MainController<
            TelegramRepositoryImpl,
            CommandServiceImpl<DatasetRegistryImpl, DatasetServiceImpl, ChartServiceImpl>,
        >,
    > = Arc::new(MainController::new(telegram_repository, command_service));

    main_controller.main_task(bot).await.unwrap_or_else(|e| {
        error!("{:?}", e);
        panic!("{:?}", e)
    });
}
