pub mod chart_service;
pub mod command_service;
pub mod dataset_service;
