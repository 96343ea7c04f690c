use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "unix:///var/run/docker.sock";
pub const DEFAULT_MAX_NAME_LEN: usize = 20;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Interface configuration of docker containers
#[derive(Parser, Debug)]
#[command(name = "ifc", version, about)]
pub struct Cli {
    /// Daemon socket to connect to
    #[arg(short = 'H', long, value_name = "socket", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Use TLS; implied by --tlsverify. The daemon is always verified
    /// against --tlscacert, so this behaves like --tlsverify
    #[arg(long)]
    pub tls: bool,

    /// Trust certs signed only by this CA
    #[arg(long, value_name = "path", default_value_os_t = docker_cert_path("ca.pem"))]
    pub tlscacert: PathBuf,

    /// Path to TLS certificate file
    #[arg(long, value_name = "path", default_value_os_t = docker_cert_path("cert.pem"))]
    pub tlscert: PathBuf,

    /// Path to TLS key file
    #[arg(long, value_name = "path", default_value_os_t = docker_cert_path("key.pem"))]
    pub tlskey: PathBuf,

    /// Use TLS and verify the remote
    #[arg(long)]
    pub tlsverify: bool,

    /// Max name len
    #[arg(long = "max_name_len", value_name = "len", default_value_t = DEFAULT_MAX_NAME_LEN)]
    pub max_name_len: usize,
}

/// `~/.docker/<file>`, or an empty path when there is no home directory.
fn docker_cert_path(file: &str) -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".docker").join(file))
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub ca_cert: PathBuf,
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Settings for one run. Built once from the command line and only ever
/// borrowed afterwards.
#[derive(Debug, Clone)]
pub struct IfcConfig {
    pub host: String,
    pub tls: bool,
    pub tls_verify: bool,
    pub tls_paths: TlsPaths,
    pub max_name_len: usize,
    pub timeout_seconds: u64,
}

impl IfcConfig {
    pub fn use_tls(&self) -> bool {
        self.tls || self.tls_verify
    }
}

impl Default for IfcConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            tls: false,
            tls_verify: false,
            tls_paths: TlsPaths {
                ca_cert: docker_cert_path("ca.pem"),
                cert: docker_cert_path("cert.pem"),
                key: docker_cert_path("key.pem"),
            },
            max_name_len: DEFAULT_MAX_NAME_LEN,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl From<Cli> for IfcConfig {
    fn from(cli: Cli) -> Self {
        let max_name_len = match cli.max_name_len {
            0 => DEFAULT_MAX_NAME_LEN,
            len => len,
        };

        Self {
            host: cli.host,
            tls: cli.tls,
            tls_verify: cli.tlsverify,
            tls_paths: TlsPaths {
                ca_cert: cli.tlscacert,
                cert: cli.tlscert,
                key: cli.tlskey,
            },
            max_name_len,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}
