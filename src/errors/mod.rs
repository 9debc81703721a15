pub mod bot_error;
