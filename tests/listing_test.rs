use async_trait::async_trait;
use ifc::config::IfcConfig;
use ifc::docker_client::{ContainerLister, ContainerSummary, DockerClient, NetworkAttachment};
use ifc::error::IfcError;
use ifc::table::print_interfaces;

struct StaticLister {
    containers: Vec<ContainerSummary>,
}

#[async_trait]
impl ContainerLister for StaticLister {
    async fn list_running_containers(&self) -> Result<Vec<ContainerSummary>, IfcError> {
        Ok(self.containers.clone())
    }
}

struct FailingLister;

#[async_trait]
impl ContainerLister for FailingLister {
    async fn list_running_containers(&self) -> Result<Vec<ContainerSummary>, IfcError> {
        Err(IfcError::Listing(
            "error trying to connect: No such file or directory (os error 2)".to_string(),
        ))
    }
}

fn foo_container() -> ContainerSummary {
    ContainerSummary {
        id: "abcdef123456789".to_string(),
        names: vec!["/foo".to_string()],
        networks: [(
            "bridge".to_string(),
            NetworkAttachment {
                ip_address: "172.17.0.2".to_string(),
                mac_address: "02:42:ac:11:00:02".to_string(),
                gateway: "172.17.0.1".to_string(),
                endpoint_id: "e1e2e3e4e5e6e7e8".to_string(),
                network_id: "n1n2n3n4n5n6n7n8".to_string(),
            },
        )]
        .into_iter()
        .collect(),
    }
}

async fn render(lister: &dyn ContainerLister, config: &IfcConfig) -> (usize, String) {
    let mut out = Vec::new();
    let rows = print_interfaces(lister, config, &mut out).await.unwrap();
    (rows, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn prints_one_row_for_single_attachment() {
    let lister = StaticLister {
        containers: vec![foo_container()],
    };

    let (rows, output) = render(&lister, &IfcConfig::default()).await;

    assert_eq!(rows, 1);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("ID"));
    assert_eq!(
        lines[1],
        "abcdef123456    bridge  172.17.0.2       02:42:ac:11:00:02  172.17.0.1       e1e2e3e4e5e6    n1n2n3n4n5n6    foo"
    );
}

#[tokio::test]
async fn row_count_matches_total_attachments() {
    let mut multi = foo_container();
    multi.id = "fedcba987654321".to_string();
    multi.names = vec!["/web1".to_string(), "/web1-alias".to_string()];
    multi
        .networks
        .insert("backend".to_string(), NetworkAttachment::default());
    let detached = ContainerSummary {
        id: "0000000000000000".to_string(),
        names: vec!["/idle".to_string()],
        ..Default::default()
    };
    let lister = StaticLister {
        containers: vec![foo_container(), detached, multi],
    };

    let (rows, output) = render(&lister, &IfcConfig::default()).await;

    assert_eq!(rows, 3);
    assert_eq!(output.lines().count(), 4);
    assert!(!output.contains("idle"));
    assert_eq!(output.lines().filter(|line| line.ends_with("web1")).count(), 2);
}

#[tokio::test]
async fn container_without_networks_prints_header_only() {
    let lister = StaticLister {
        containers: vec![ContainerSummary {
            id: "abcdef123456789".to_string(),
            names: vec!["/lonely".to_string()],
            ..Default::default()
        }],
    };

    let (rows, output) = render(&lister, &IfcConfig::default()).await;

    assert_eq!(rows, 0);
    assert_eq!(output.lines().count(), 1);
    assert!(output.starts_with("ID"));
}

#[tokio::test]
async fn listing_failure_prints_only_the_message() {
    let (rows, output) = render(&FailingLister, &IfcConfig::default()).await;

    assert_eq!(rows, 0);
    assert_eq!(
        output,
        "error trying to connect: No such file or directory (os error 2)\n"
    );
}

#[tokio::test]
async fn configured_name_width_applies() {
    let mut container = foo_container();
    container.names = vec!["/a-rather-long-service-name".to_string()];
    let lister = StaticLister {
        containers: vec![container],
    };
    let config = IfcConfig {
        max_name_len: 5,
        ..IfcConfig::default()
    };

    let (_, output) = render(&lister, &config).await;

    assert!(output.lines().nth(1).unwrap().ends_with("  a-rat"));
}

#[tokio::test]
async fn plain_tcp_client_is_built_without_contacting_the_daemon() {
    let config = IfcConfig {
        host: "tcp://127.0.0.1:1".to_string(),
        ..IfcConfig::default()
    };

    assert!(DockerClient::new(&config).is_ok());
}

#[test]
fn missing_tls_material_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = IfcConfig {
        host: "tcp://127.0.0.1:2376".to_string(),
        tls_verify: true,
        ..IfcConfig::default()
    };
    config.tls_paths.ca_cert = dir.path().join("ca.pem");
    config.tls_paths.cert = dir.path().join("cert.pem");
    config.tls_paths.key = dir.path().join("key.pem");

    let err = DockerClient::new(&config).err().unwrap();

    assert!(matches!(err, IfcError::Connection { .. }));
    assert!(err.to_string().contains("ca.pem"));
}

#[test]
fn unsupported_host_scheme_is_a_connection_error() {
    let config = IfcConfig {
        host: "ftp://127.0.0.1".to_string(),
        ..IfcConfig::default()
    };

    assert!(matches!(
        DockerClient::new(&config),
        Err(IfcError::Connection { .. })
    ));
}
