// `scriptcast apps`: list supported host applications.

use clap::Args;
use serde::Serialize;

use scriptcast_core::AppName;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct AppsArgs {
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppInfo {
    pub name: AppName,
    pub extension: &'static str,
    pub dialect: &'static str,
}

pub fn supported_apps() -> Vec<AppInfo> {
    AppName::ALL
        .into_iter()
        .map(|name| AppInfo {
            name,
            extension: name.script_file_type().extension(),
            dialect: name.dialect().as_str(),
        })
        .collect()
}

pub fn run(args: AppsArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    output::print_output(format, supported_apps().as_slice(), format_human)?;
    Ok(())
}

fn format_human(apps: &[AppInfo]) -> String {
    apps.iter()
        .map(|app| format!("{:<12} .{:<5} {}", app.name.as_str(), app.extension, app.dialect))
        .collect::<Vec<_>>()
        .join("\n")
}
