use crate::config::IfcConfig;
use crate::error::IfcError;
use async_trait::async_trait;
use bollard::Docker;
use bollard::container::ListContainersOptions;
use bollard::models::EndpointSettings;
use log::debug;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use strip_prefix_suffix_sane::StripPrefixSuffixSane;

/// One running container as far as the interface table is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    /// Keyed by network name, so rows come out sorted by network.
    pub networks: BTreeMap<String, NetworkAttachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkAttachment {
    pub ip_address: String,
    pub mac_address: String,
    pub gateway: String,
    pub endpoint_id: String,
    pub network_id: String,
}

impl ContainerSummary {
    /// First name without its leading `/`.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(|name| name.strip_prefix_sane("/"))
    }
}

#[async_trait]
pub trait ContainerLister: Send + Sync {
    async fn list_running_containers(&self) -> Result<Vec<ContainerSummary>, IfcError>;
}

/// Where the daemon lives, derived from the `--host` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Unix socket or Windows named pipe.
    Socket(String),
    Http(String),
    Https(String),
}

impl Endpoint {
    pub fn parse(host: &str, tls: bool) -> Result<Self, IfcError> {
        if host.starts_with('/') {
            return Self::socket(host, tls);
        }

        let Some((scheme, address)) = host.split_once("://") else {
            return Err(IfcError::connection(host, "missing scheme, expected unix://, tcp://, http:// or https://"));
        };
        if address.is_empty() {
            return Err(IfcError::connection(host, "empty address"));
        }

        match scheme {
            #[cfg(unix)]
            "npipe" => Err(IfcError::connection(host, "named pipes are only available on Windows")),
            #[cfg(not(unix))]
            "npipe" => Self::socket(host, tls),
            "unix" => Self::socket(host, tls),
            "tcp" | "http" if tls => Ok(Endpoint::Https(address.to_string())),
            "tcp" | "http" => Ok(Endpoint::Http(address.to_string())),
            "https" => Ok(Endpoint::Https(address.to_string())),
            other => Err(IfcError::connection(host, format!("unsupported scheme {other}://"))),
        }
    }

    fn socket(host: &str, tls: bool) -> Result<Self, IfcError> {
        if tls {
            return Err(IfcError::connection(host, "TLS requires a tcp:// or https:// host"));
        }
        Ok(Endpoint::Socket(host.to_string()))
    }
}

pub struct DockerClient {
    client: Docker,
}

impl DockerClient {
    /// Builds a client handle for the configured daemon.
    ///
    /// Nothing is sent to the daemon here; an unreachable daemon only shows
    /// up on the first request.
    pub fn new(config: &IfcConfig) -> Result<Self, IfcError> {
        let host = config.host.as_str();
        let endpoint = Endpoint::parse(host, config.use_tls())?;
        let version = bollard::API_DEFAULT_VERSION;

        let client = match &endpoint {
            Endpoint::Socket(path) => {
                debug!("Connecting to Docker socket at {path}");
                Docker::connect_with_socket(path, config.timeout_seconds, version)
            }
            Endpoint::Http(address) => {
                debug!("Connecting to Docker over plain HTTP at {address}");
                Docker::connect_with_http(address, config.timeout_seconds, version)
            }
            Endpoint::Https(address) => {
                let tls = &config.tls_paths;
                for path in [&tls.ca_cert, &tls.cert, &tls.key] {
                    ensure_readable(host, path)?;
                }
                debug!("Connecting to Docker over TLS at {address}");
                Docker::connect_with_ssl(
                    address,
                    &tls.key,
                    &tls.cert,
                    &tls.ca_cert,
                    config.timeout_seconds,
                    version,
                )
            }
        }
        .map_err(|e| IfcError::connection(host, e))?;

        Ok(Self { client })
    }
}

fn ensure_readable(host: &str, path: &Path) -> Result<(), IfcError> {
    File::open(path)
        .map(drop)
        .map_err(|e| IfcError::connection(host, format!("cannot read {}: {e}", path.display())))
}

#[async_trait]
impl ContainerLister for DockerClient {
    async fn list_running_containers(&self) -> Result<Vec<ContainerSummary>, IfcError> {
        let options = ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        };
        let containers = self
            .client
            .list_containers(Some(options))
            .await
            .map_err(|e| IfcError::Listing(e.to_string()))?;

        debug!("Daemon reported {} running containers", containers.len());
        Ok(containers.into_iter().map(ContainerSummary::from).collect())
    }
}

impl From<bollard::models::ContainerSummary> for ContainerSummary {
    fn from(container: bollard::models::ContainerSummary) -> Self {
        let networks = container
            .network_settings
            .and_then(|settings| settings.networks)
            .unwrap_or_default()
            .into_iter()
            .map(|(name, endpoint)| (name, NetworkAttachment::from(endpoint)))
            .collect();

        Self {
            id: container.id.unwrap_or_default(),
            names: container.names.unwrap_or_default(),
            networks,
        }
    }
}

impl From<EndpointSettings> for NetworkAttachment {
    fn from(endpoint: EndpointSettings) -> Self {
        Self {
            ip_address: endpoint.ip_address.unwrap_or_default(),
            mac_address: endpoint.mac_address.unwrap_or_default(),
            gateway: endpoint.gateway.unwrap_or_default(),
            endpoint_id: endpoint.endpoint_id.unwrap_or_default(),
            network_id: endpoint.network_id.unwrap_or_default(),
        }
    }
}
