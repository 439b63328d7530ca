use anyhow::Result;
use clap::Subcommand;
use tabled::{Table, Tabled};

use shared::data::{CreateNetworkRequest, IpNetworkRequest, ListNetworksResponse, NetworkView};

use crate::http::Api;

#[derive(Subcommand)]
pub enum NetworksCommand {
    /// List virtual networks
    List {
        /// Print ids only
        #[arg(long)]
        ids: bool,
    },

    /// Create a virtual network
    Create {
        /// Network name
        name: String,

        /// IPv4 subnet in CIDR form
        #[arg(long)]
        subnet: String,

        /// IPv4 gateway inside the subnet
        #[arg(long)]
        gateway: String,

        /// Whitespace-separated nameservers
        #[arg(long, default_value = "")]
        nameservers: String,

        /// Search domains
        #[arg(long, default_value = "")]
        search_domains: String,

        /// VXLAN id; 0 selects a NAT network
        #[arg(long, default_value_t = 0)]
        bridge_id: u32,
    },
}

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "SUBNET")]
    subnet: String,
    #[tabled(rename = "GATEWAY")]
    gateway: String,
    #[tabled(rename = "MODE")]
    mode: String,
}

pub async fn run(api: &Api, command: NetworksCommand) -> Result<()> {
    match command {
        NetworksCommand::List { ids } => {
            let response: ListNetworksResponse = api.get("/api/v1/networks").await?;
            if ids {
                for network in &response.networks {
                    println!("{}", network.id);
                }
                return Ok(());
            }

            let rows: Vec<NetworkRow> = response
                .networks
                .iter()
                .map(|network| NetworkRow {
                    id: network.id.clone(),
                    name: network.name.clone(),
                    subnet: network.ipv4_subnet.clone(),
                    gateway: network.ipv4_gateway.clone(),
                    mode: if network.bridge_id == 0 {
                        "nat".to_string()
                    } else {
                        format!("vxlan-{}", network.bridge_id)
                    },
                })
                .collect();
            println!("{}", Table::new(rows));
            Ok(())
        }

        NetworksCommand::Create {
            name,
            subnet,
            gateway,
            nameservers,
            search_domains,
            bridge_id,
        } => {
            let request = CreateNetworkRequest {
                name,
                ipv4: IpNetworkRequest { subnet, gateway },
                ipv6: None,
                nameservers,
                search_domains,
                bridge_id,
            };
            let response: NetworkView = api.post("/api/v1/networks", &request).await?;
            println!("{}", response.id);
            Ok(())
        }
    }
}
