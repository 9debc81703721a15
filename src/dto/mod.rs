pub mod bot_effect;
pub mod inbound_event;
pub mod upload_meta;
