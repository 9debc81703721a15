pub mod bot_command_kind;
pub mod plot_kind;
pub mod message_route;
