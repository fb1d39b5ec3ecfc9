// CLI subcommand dispatch.

use std::future::Future;

use anyhow::Context;
use clap::Subcommand;

pub mod apps;
pub mod create;
pub mod options;
pub mod preview;

#[derive(Subcommand)]
pub enum Command {
    /// Generate a command script and write it for the host app
    Create(create::CreateArgs),
    /// Print the generated script without writing it
    Preview(preview::PreviewArgs),
    /// List supported host applications
    Apps(apps::AppsArgs),
}

pub fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Create(args) => create::run(args),
        Command::Preview(args) => preview::run(args),
        Command::Apps(args) => apps::run(args),
    }
}

/// Drive `future` on the ambient runtime, or a fresh current-thread one.
pub(crate) fn block_on<F, T>(future: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle.block_on(future),
        Err(_) => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build tokio runtime")?
            .block_on(future),
    }
}
