// scriptcast-core: command script generation for Adobe host applications

pub mod app;
pub mod args;
pub mod broadcast;
pub mod builder;
pub mod config;
pub mod creator;
pub mod error;

pub use app::{AppName, ScriptFileType};
pub use args::{serialize_variables, ArgValue, Args};
pub use broadcast::Dialect;
pub use builder::ScriptBuilder;
pub use config::{AppConfig, Config};
pub use creator::{command_name, ScriptFileCreator};
pub use error::{ConfigError, ScriptError};
