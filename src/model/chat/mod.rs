pub mod chat_identity;
