use anyhow::Result;
use clap::Subcommand;
use tabled::{Table, Tabled};

use shared::data::{
    CreateMachineRequest, CreateMachineResponse, ListMachinesResponse, MachineDetailsResponse,
    Specs, TriggerEvent, TriggerMachineRequest, TriggerMachineResponse,
};

use crate::http::Api;

#[derive(Subcommand)]
pub enum MachinesCommand {
    /// List virtual machines
    List {
        /// Print ids only
        #[arg(long)]
        ids: bool,
    },

    /// Create a new virtual machine instance
    Create {
        /// Machine name
        name: String,

        /// vCPU count
        #[arg(long, default_value_t = 1)]
        cpus: i64,

        /// Memory in MB
        #[arg(long, default_value_t = 1024)]
        memory: i64,

        /// Disk size in GB
        #[arg(long, default_value_t = 10)]
        disk: i64,

        /// Base image id
        #[arg(long)]
        image: String,

        /// Ssh key ids (repeatable)
        #[arg(long = "ssh-key", required = true)]
        ssh_keys: Vec<String>,

        /// Network ids (repeatable)
        #[arg(long = "network", required = true)]
        networks: Vec<String>,

        /// Login user created in the guest
        #[arg(long)]
        user: String,
    },

    /// Show details for one machine
    Show {
        /// Machine id or name
        id: String,
    },

    /// Delete an existing virtual machine instance
    Delete {
        /// Machine id or name
        id: String,
    },

    /// Trigger a lifecycle event
    Trigger {
        /// Machine id or name
        id: String,

        /// Event: poweron, poweroff or reboot
        #[arg(value_enum)]
        event: Event,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum Event {
    Poweron,
    Poweroff,
    Reboot,
}

impl From<Event> for TriggerEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Poweron => TriggerEvent::Poweron,
            Event::Poweroff => TriggerEvent::Poweroff,
            Event::Reboot => TriggerEvent::Reboot,
        }
    }
}

#[derive(Tabled)]
struct MachineRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "CPUS")]
    cpus: i64,
    #[tabled(rename = "MEMORY")]
    memory_mb: i64,
    #[tabled(rename = "IPV4")]
    ipv4: String,
}

pub async fn run(api: &Api, command: MachinesCommand) -> Result<()> {
    match command {
        MachinesCommand::List { ids } => {
            let response: ListMachinesResponse = api.get("/api/v1/machines").await?;
            if ids {
                for machine in &response.machines {
                    println!("{}", machine.id);
                }
                return Ok(());
            }

            let rows: Vec<MachineRow> = response
                .machines
                .iter()
                .map(|machine| MachineRow {
                    id: machine.id.clone(),
                    name: machine.name.clone(),
                    status: machine.status.to_string(),
                    cpus: machine.specs.cpus,
                    memory_mb: machine.specs.memory_mb,
                    ipv4: machine
                        .networks
                        .iter()
                        .map(|iface| iface.ipv4.clone())
                        .collect::<Vec<_>>()
                        .join(" "),
                })
                .collect();
            println!("{}", Table::new(rows));
            Ok(())
        }

        MachinesCommand::Create {
            name,
            cpus,
            memory,
            disk,
            image,
            ssh_keys,
            networks,
            user,
        } => {
            let request = CreateMachineRequest {
                name,
                specs: Specs {
                    cpus,
                    memory_mb: memory,
                    disk_gb: disk,
                },
                image_id: image,
                ssh_key_ids: ssh_keys,
                network_ids: networks,
                user,
            };
            let response: CreateMachineResponse = api.post("/api/v1/machines", &request).await?;
            println!("{}", response.id);
            Ok(())
        }

        MachinesCommand::Show { id } => {
            let response: MachineDetailsResponse =
                api.get(&format!("/api/v1/machines/{id}")).await?;
            let machine = &response.machine;

            println!("id:      {}", machine.id);
            println!("name:    {}", machine.name);
            println!("status:  {}", machine.status);
            println!("user:    {}", machine.user);
            println!("image:   {}", machine.image_id);
            println!(
                "specs:   {} cpus, {} MB memory, {} GB disk",
                machine.specs.cpus, machine.specs.memory_mb, machine.specs.disk_gb
            );
            for iface in &machine.networks {
                println!(
                    "network: {} {} ({})",
                    iface.network_id, iface.ipv4, iface.hw_addr
                );
            }
            for key in &response.ssh_keys {
                println!("ssh-key: {} ({})", key.name, key.id);
            }
            Ok(())
        }

        MachinesCommand::Delete { id } => {
            api.delete(&format!("/api/v1/machines/{id}")).await?;
            Ok(())
        }

        MachinesCommand::Trigger { id, event } => {
            let request = TriggerMachineRequest {
                event: event.into(),
            };
            let response: TriggerMachineResponse = api
                .post(&format!("/api/v1/machines/{id}/trigger"), &request)
                .await?;
            println!("{}", response.status);
            Ok(())
        }
    }
}
