pub mod config;
pub mod data;
pub mod error;
pub mod messages;
pub mod prompt;
pub mod proxy;
pub mod stream;

mod log;

pub use config::RelayConfig;
pub use log::{logging_file, logging_stdout};
pub use prompt::PromptProfile;
pub use reqwest::RequestBuilder;
