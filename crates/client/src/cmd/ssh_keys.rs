use anyhow::{Context, Result};
use clap::Subcommand;
use tabled::{Table, Tabled};

use shared::data::{CreateSshKeyRequest, ListSshKeysResponse, SshKeyView};

use crate::http::Api;

#[derive(Subcommand)]
pub enum SshKeysCommand {
    /// List ssh keys
    List {
        /// Print ids only
        #[arg(long)]
        ids: bool,
    },

    /// Register a public key
    Create {
        /// Key name
        name: String,

        /// Public key material; reads the file at --pubkey-file when unset
        #[arg(long, conflicts_with = "pubkey_file")]
        pubkey: Option<String>,

        /// Path to a public key file
        #[arg(long)]
        pubkey_file: Option<String>,
    },

    /// Delete an ssh key
    Delete {
        /// Key id
        id: String,
    },
}

#[derive(Tabled)]
struct SshKeyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PUBKEY")]
    pubkey: String,
}

pub async fn run(api: &Api, command: SshKeysCommand) -> Result<()> {
    match command {
        SshKeysCommand::List { ids } => {
            let response: ListSshKeysResponse = api.get("/api/v1/ssh-keys").await?;
            if ids {
                for key in &response.ssh_keys {
                    println!("{}", key.id);
                }
                return Ok(());
            }

            let rows: Vec<SshKeyRow> = response
                .ssh_keys
                .iter()
                .map(|key| SshKeyRow {
                    id: key.id.clone(),
                    name: key.name.clone(),
                    pubkey: truncate(&key.pubkey, 48),
                })
                .collect();
            println!("{}", Table::new(rows));
            Ok(())
        }

        SshKeysCommand::Create {
            name,
            pubkey,
            pubkey_file,
        } => {
            let pubkey = match (pubkey, pubkey_file) {
                (Some(pubkey), _) => pubkey,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read public key file: {path}"))?
                    .trim()
                    .to_string(),
                (None, None) => anyhow::bail!("either --pubkey or --pubkey-file is required"),
            };

            let request = CreateSshKeyRequest { name, pubkey };
            let response: SshKeyView = api.post("/api/v1/ssh-keys", &request).await?;
            println!("{}", response.id);
            Ok(())
        }

        SshKeysCommand::Delete { id } => {
            api.delete(&format!("/api/v1/ssh-keys/{id}")).await?;
            Ok(())
        }
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        text.to_string()
    } else {
        format!("{}…", &text[..limit])
    }
}
