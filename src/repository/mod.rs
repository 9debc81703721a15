pub mod dataset_registry_impl;
pub mod telegram_repository_impl;
