use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IfcError {
    /// The client handle could not be built: bad address, unreadable TLS
    /// material or a rejected client configuration.
    #[error("cannot connect to Docker daemon at {host}: {reason}")]
    Connection { host: String, reason: String },
    /// The daemon could not answer the list call.
    #[error("{0}")]
    Listing(String),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl IfcError {
    pub fn connection(host: &str, reason: impl ToString) -> Self {
        IfcError::Connection {
            host: host.to_string(),
            reason: reason.to_string(),
        }
    }
}
