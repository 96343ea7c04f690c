use crate::config::IfcConfig;
use crate::docker_client::{ContainerLister, ContainerSummary, NetworkAttachment};
use log::debug;
use std::io::{self, Write};

const ID_LEN: usize = 12;
const NETWORK_LEN: usize = 6;

/// Cuts `value` down to at most `max` characters.
pub fn truncate(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// One line of the interface table, already truncated for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub id: &'a str,
    pub network: &'a str,
    pub ipv4: &'a str,
    pub mac: &'a str,
    pub gateway: &'a str,
    pub endpoint_id: &'a str,
    pub network_id: &'a str,
    pub name: &'a str,
}

impl<'a> Row<'a> {
    fn new(id: &'a str, name: &'a str, network: &'a str, attachment: &'a NetworkAttachment) -> Self {
        Self {
            id,
            network: truncate(network, NETWORK_LEN),
            ipv4: &attachment.ip_address,
            mac: &attachment.mac_address,
            gateway: &attachment.gateway,
            endpoint_id: truncate(&attachment.endpoint_id, ID_LEN),
            network_id: truncate(&attachment.network_id, ID_LEN),
            name,
        }
    }

    fn header() -> Self {
        Self {
            id: "ID",
            network: "Network",
            ipv4: "IPv4",
            mac: "Mac",
            gateway: "Gateway",
            endpoint_id: "EndpointID",
            network_id: "NetworkID",
            name: "Name",
        }
    }

    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{:<16}{:<8}{:<17}{:<19}{:<17}{:<16}{:<16}{}",
            self.id, self.network, self.ipv4, self.mac, self.gateway, self.endpoint_id, self.network_id, self.name
        )
    }
}

/// Flattens containers into one row per (container, network) pair.
///
/// A container without networks yields no rows.
pub fn rows(containers: &[ContainerSummary], max_name_len: usize) -> Vec<Row<'_>> {
    containers
        .iter()
        .flat_map(|container| {
            let id = truncate(&container.id, ID_LEN);
            let name = container
                .primary_name()
                .map(|name| truncate(name, max_name_len))
                .unwrap_or_default();
            container
                .networks
                .iter()
                .map(move |(network, attachment)| Row::new(id, name, network, attachment))
        })
        .collect()
}

/// Writes the header followed by every row. Returns the number of data rows.
pub fn write_table<W: Write>(out: &mut W, containers: &[ContainerSummary], max_name_len: usize) -> io::Result<usize> {
    let rows = rows(containers, max_name_len);

    Row::header().write_to(out)?;
    for row in &rows {
        row.write_to(out)?;
    }

    Ok(rows.len())
}

/// Lists running containers and prints their interface table.
///
/// A failed listing is reported on `out` in place of the table and is not
/// an error for the caller.
pub async fn print_interfaces<L, W>(lister: &L, config: &IfcConfig, out: &mut W) -> io::Result<usize>
where
    L: ContainerLister + ?Sized,
    W: Write,
{
    let containers = match lister.list_running_containers().await {
        Ok(containers) => containers,
        Err(err) => {
            debug!("Listing containers failed: {err:?}");
            writeln!(out, "{err}")?;
            return Ok(0);
        }
    };

    write_table(out, &containers, config.max_name_len)
}
