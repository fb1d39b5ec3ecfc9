// `scriptcast create`: generate a command script and write it for the host app.

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

use scriptcast_core::{command_name, AppName, Args as ScriptArgs, Config, ScriptFileCreator};

use super::options::{ConfigArgs, ScriptOptions};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub script: ScriptOptions,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResult {
    pub command: String,
    pub app: AppName,
    pub path: PathBuf,
}

pub fn run(args: CreateArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = args
        .config
        .resolve()
        .and_then(|config| {
            let script_args = args.script.script_args()?;
            super::block_on(create_script(config, &args.script, script_args))
        });

    match result {
        Ok(result) => {
            output::print_output(format, &result, format_human)?;
            Ok(())
        }
        Err(error) => {
            output::print_anyhow_error(format, &error);
            Err(error)
        }
    }
}

async fn create_script(
    config: Config,
    script: &ScriptOptions,
    script_args: Option<ScriptArgs>,
) -> anyhow::Result<CreateResult> {
    let app = config.app.name;
    let creator = ScriptFileCreator::new(config);
    let path = creator.create(&script.command, script.builtin, script_args.as_ref()).await?;
    Ok(CreateResult { command: command_name(&script.command), app, path })
}

fn format_human(result: &CreateResult) -> String {
    format!("Created {} ({} script for {})", result.path.display(), result.command, result.app)
}
