pub mod chart_service_impl;
pub mod command_service_impl;
pub mod dataset_service_impl;
