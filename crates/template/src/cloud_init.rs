use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use shared::util::user::is_valid_user;

/// First-boot account provisioned by cloud-init. `ssh_authorized_keys`
/// carries the newline-joined public keys of the machine's key set.
#[derive(Serialize, Deserialize, Debug)]
pub struct CloudInitUser {
    pub name: String,
    pub sudo: String,
    pub home: String,
    pub shell: String,
    pub lock_passwd: bool,
    pub ssh_authorized_keys: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Chpasswd {
    pub list: Vec<String>,
    pub expire: bool,
}

/// The per-machine cloud-init user-data payload. Optional modules stay off
/// the document entirely when unset.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CloudInitConfig {
    pub hostname: String,
    pub fqdn: String,
    pub manage_etc_hosts: bool,
    pub users: Vec<CloudInitUser>,
    pub chpasswd: Chpasswd,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_upgrade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_root: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_resolv_conf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolv_conf: Option<serde_yaml::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_files: Option<serde_yaml::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_pwauth: Option<bool>,
}

impl CloudInitConfig {
    /// Assemble the user-data for one machine. The hostname is the first
    /// eight characters of the machine uuid; the login user gets
    /// passwordless sudo and the machine's authorized keys.
    pub fn for_machine(machine_id: &str, user: &str, pubkeys: &[String]) -> Result<Self> {
        if !is_valid_user(user) {
            bail!("invalid user name: {user}");
        }

        let hostname: String = machine_id.chars().take(8).collect();

        Ok(Self {
            hostname: hostname.clone(),
            fqdn: hostname,
            manage_etc_hosts: true,
            users: vec![CloudInitUser {
                name: user.to_string(),
                sudo: "ALL=(ALL:ALL) NOPASSWD:ALL".to_string(),
                home: format!("/home/{user}"),
                shell: "/bin/bash".to_string(),
                lock_passwd: false,
                ssh_authorized_keys: pubkeys.join("\n"),
            }],
            chpasswd: Chpasswd {
                list: vec![shared::konst::GUEST_FALLBACK_PASSWORD.to_string()],
                expire: false,
            },
            ..Default::default()
        })
    }

    /// Render as the `user-data` file: YAML behind the `#cloud-config`
    /// marker line.
    pub fn to_string(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(&self)?;

        let mut output = String::from("#cloud-config\n");
        output.push_str(&yaml);

        Ok(output)
    }
}

/// The `network-config` stub folded into the config disk. Guest networking
/// comes from the static interfaces file injected into the image, so
/// cloud-init's own network pass is turned off.
#[derive(Serialize, Deserialize, Debug)]
pub struct CloudInitNetworkStub {
    network: NetworkSection,
}

#[derive(Serialize, Deserialize, Debug)]
struct NetworkSection {
    config: String,
}

impl CloudInitNetworkStub {
    pub fn disabled() -> Self {
        Self {
            network: NetworkSection {
                config: "disabled".to_string(),
            },
        }
    }

    pub fn to_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_data_starts_with_the_cloud_config_marker() {
        let config = CloudInitConfig::for_machine("6274bb3f-97a4", "ken", &[]).unwrap();
        let rendered = config.to_string().unwrap();
        assert!(rendered.starts_with("#cloud-config\n"));
        assert!(rendered.contains("hostname: 6274bb3f"));
        assert!(rendered.contains("fqdn: 6274bb3f"));
        assert!(rendered.contains("manage_etc_hosts: true"));
    }

    #[test]
    fn user_block_carries_sudo_home_and_keys() {
        let keys = vec![
            "ssh-ed25519 AAAA one".to_string(),
            "ssh-ed25519 BBBB two".to_string(),
        ];
        let config = CloudInitConfig::for_machine("aaaa-bbbb-cccc", "deploy", &keys).unwrap();
        let rendered = config.to_string().unwrap();

        assert!(rendered.contains("name: deploy"));
        assert!(rendered.contains("home: /home/deploy"));
        assert!(rendered.contains("sudo: ALL=(ALL:ALL) NOPASSWD:ALL"));
        assert!(rendered.contains("lock_passwd: false"));
        assert!(rendered.contains("ssh-ed25519 AAAA one"));
        assert!(rendered.contains("ssh-ed25519 BBBB two"));
    }

    #[test]
    fn unset_modules_stay_off_the_document() {
        let config = CloudInitConfig::for_machine("aaaa-bbbb-cccc", "ken", &[]).unwrap();
        let rendered = config.to_string().unwrap();

        assert!(!rendered.contains("packages"));
        assert!(!rendered.contains("disable_root"));
        assert!(!rendered.contains("ssh_pwauth"));
        assert!(rendered.contains("chpasswd"));
        assert!(rendered.contains("debian:debian"));
    }

    #[test]
    fn invalid_user_is_rejected() {
        assert!(CloudInitConfig::for_machine("aaaa-bbbb", "Root", &[]).is_err());
        assert!(CloudInitConfig::for_machine("aaaa-bbbb", "9lives", &[]).is_err());
    }

    #[test]
    fn rendering_is_deterministic() {
        let keys = vec!["ssh-ed25519 AAAA one".to_string()];
        let a = CloudInitConfig::for_machine("aaaa-bbbb-cccc", "ken", &keys)
            .unwrap()
            .to_string()
            .unwrap();
        let b = CloudInitConfig::for_machine("aaaa-bbbb-cccc", "ken", &keys)
            .unwrap()
            .to_string()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn network_stub_disables_cloud_init_networking() {
        let rendered = CloudInitNetworkStub::disabled().to_string().unwrap();
        assert_eq!(rendered, "network:\n  config: disabled\n");
    }
}
