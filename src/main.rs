use anyhow::Context;
use clap::Parser;
use ifc::config::{Cli, IfcConfig};
use ifc::error::IfcError;
use log::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = IfcConfig::from(Cli::parse());
    match ifc::run(&config).await {
        // Only flag parsing decides the exit status; a client that cannot be
        // built is reported and the run ends normally.
        Err(err @ IfcError::Connection { .. }) => {
            error!("{err}");
            Ok(())
        }
        result => result.context("failed to print interface table"),
    }
}
