pub use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
    Record,
};
pub use parking_lot::Mutex;
pub use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    net::Download,
    prelude::{Bot, Message, Requester, Update},
    respond,
    types::{BotCommand, ChatId, Document, InputFile},
};
