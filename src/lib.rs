pub mod config;
pub mod docker_client;
pub mod error;
pub mod table;

use crate::config::IfcConfig;
use crate::docker_client::DockerClient;
use crate::error::IfcError;
use std::io;

/// Connects to the configured daemon and prints the interface table on
/// stdout.
///
/// A failed listing is printed instead of the table and is not returned;
/// only client construction and stdout write failures are.
pub async fn run(config: &IfcConfig) -> Result<(), IfcError> {
    let client = DockerClient::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    table::print_interfaces(&client, config, &mut out).await?;

    Ok(())
}
