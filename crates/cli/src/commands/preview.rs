// `scriptcast preview`: print the generated script without writing it.

use clap::Args;
use serde::Serialize;

use scriptcast_core::{command_name, AppName, ScriptFileCreator};

use super::options::{ConfigArgs, ScriptOptions};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub script: ScriptOptions,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewResult {
    pub command: String,
    pub app: AppName,
    pub extension: &'static str,
    pub script: String,
}

pub fn run(args: PreviewArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = args.config.resolve().and_then(|config| {
        let script_args = args.script.script_args()?;
        let app = config.app.name;
        let creator = ScriptFileCreator::new(config);
        let script = super::block_on(async {
            creator
                .render(&args.script.command, args.script.builtin, script_args.as_ref())
                .await
                .map_err(anyhow::Error::from)
        })?;
        Ok(PreviewResult {
            command: command_name(&args.script.command),
            app,
            extension: app.script_file_type().extension(),
            script,
        })
    });

    match result {
        Ok(result) => {
            output::print_output(format, &result, |result| result.script.clone())?;
            Ok(())
        }
        Err(error) => {
            output::print_anyhow_error(format, &error);
            Err(error)
        }
    }
}
