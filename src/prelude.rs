pub use std::{
    collections::HashMap,
    env,
    fmt::{self, Display},
    io::{Cursor, Write},
    sync::Arc,
};

pub use anyhow::{anyhow, Context};
pub use async_trait::async_trait;
pub use derive_new::new;
pub use dotenv::dotenv;
pub use getset::Getters;
pub use log::{error, info, warn};
pub use once_cell::sync::Lazy as once_lazy;
pub use serde::{de::DeserializeOwned, Deserialize};
pub use thiserror::Error;
