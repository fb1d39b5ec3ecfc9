// Options shared by the script-generating subcommands.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::{Map, Value};
use thiserror::Error;

use scriptcast_core::{AppName, ArgValue, Args as ScriptArgs, Config};

/// Bad command-line input; mapped to the usage exit code.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("invalid --arg `{0}`: name must be a JavaScript identifier")]
    InvalidArgName(String),

    #[error("invalid --args-json: {0}")]
    InvalidArgsJson(String),

    #[error("failed to load config `{path}`: {message}")]
    Config { path: String, message: String },
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config file (defaults to `~/.scriptcast/config.toml`).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target application (animate, photoshop, illustrator, indesign).
    #[arg(long)]
    app: Option<AppName>,

    /// Listener host embedded in the broadcast.
    #[arg(long)]
    host: Option<String>,

    /// Listener port embedded in the broadcast.
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding custom command scripts.
    #[arg(long, value_name = "DIR")]
    scripts_path: Option<PathBuf>,

    /// Directory holding built-in scripts, one subdirectory per app.
    #[arg(long, value_name = "DIR")]
    builtin_scripts_path: Option<PathBuf>,

    /// Directory the host application loads generated scripts from.
    #[arg(long, value_name = "DIR")]
    adobe_scripts_path: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the config file, then apply command-line overrides.
    pub fn resolve(&self) -> anyhow::Result<Config> {
        let loaded = match &self.config {
            Some(path) => Config::load_from(path).map_err(|error| UsageError::Config {
                path: path.display().to_string(),
                message: error.to_string(),
            }),
            None => Config::load().map_err(|error| UsageError::Config {
                path: "~/.scriptcast/config.toml".into(),
                message: error.to_string(),
            }),
        };
        let mut config = loaded?;

        if let Some(app) = self.app {
            config.app.name = app;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(path) = &self.scripts_path {
            config.scripts_path = path.clone();
        }
        if let Some(path) = &self.builtin_scripts_path {
            config.builtin_scripts_path = Some(path.clone());
        }
        if let Some(path) = &self.adobe_scripts_path {
            config.app.adobe_scripts_path = Some(path.clone());
        }
        tracing::debug!(
            app = %config.app.name,
            host = %config.host,
            port = config.port,
            "resolved configuration"
        );
        Ok(config)
    }
}

#[derive(Debug, Args)]
pub struct ScriptOptions {
    /// Command to generate (a name like `resize` or a script file like `tools/resize.js`).
    pub command: String,

    /// Prefer the built-in script for this command over a custom one.
    #[arg(long)]
    pub builtin: bool,

    /// Script argument as `name=value`; values are parsed as JSON, else taken as text.
    /// A bare `name` declares the variable without a value.
    #[arg(long = "arg", value_name = "NAME=VALUE")]
    pub arg: Vec<String>,

    /// Script arguments as a JSON object, applied before `--arg` values.
    #[arg(long, value_name = "JSON")]
    pub args_json: Option<String>,
}

impl ScriptOptions {
    /// Collect `--args-json` and `--arg` values in command-line order.
    pub fn script_args(&self) -> anyhow::Result<Option<ScriptArgs>> {
        if self.arg.is_empty() && self.args_json.is_none() {
            return Ok(None);
        }

        let mut args = match &self.args_json {
            Some(raw) => parse_args_json(raw)?,
            None => ScriptArgs::new(),
        };
        for raw in &self.arg {
            let (name, value) = parse_arg(raw)?;
            args.insert(name, value);
        }
        Ok(Some(args))
    }
}

pub fn parse_arg(raw: &str) -> anyhow::Result<(String, ArgValue)> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value)),
        None => (raw.trim(), None),
    };
    if !is_identifier(name) {
        return Err(UsageError::InvalidArgName(raw.to_string()).into());
    }

    let value = match value {
        None => ArgValue::Absent,
        Some(text) => serde_json::from_str::<Value>(text)
            .map(ArgValue::from)
            .unwrap_or_else(|_| ArgValue::Text(text.to_string())),
    };
    Ok((name.to_string(), value))
}

fn parse_args_json(raw: &str) -> anyhow::Result<ScriptArgs> {
    let map: Map<String, Value> = serde_json::from_str(raw)
        .map_err(|error| UsageError::InvalidArgsJson(error.to_string()))
        .context("--args-json must be a JSON object")?;
    if let Some(name) = map.keys().find(|name| !is_identifier(name)) {
        return Err(UsageError::InvalidArgName(name.clone()).into());
    }
    Ok(ScriptArgs::from(map))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}
