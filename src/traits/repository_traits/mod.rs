pub mod dataset_registry;
pub mod telegram_repository;
