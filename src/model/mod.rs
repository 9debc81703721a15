pub mod chat;
pub mod configs;
pub mod dataset;
