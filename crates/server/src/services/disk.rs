//! Host-side disk materialization through the external image tools:
//! qemu-img for the copy-on-write overlay, virt-customize for in-image
//! file placement, cloud-localds for the cloud-init config disk.

use std::ffi::OsStr;

use anyhow::{Context, Result, bail};
use tokio::process::Command;

use shared::konst::{
    CLOUD_INIT_NETWORK_CONFIG, CLOUD_INIT_USER_DATA, NETWORK_SNIPPET_FILE,
    NETWORK_SNIPPET_GUEST_DIR,
};

/// Runs the specified command and returns error on failure. Output is
/// discarded; stderr is inherited and lands in the daemon log.
pub async fn run_cmd<I, S>(cmd: &str, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(cmd);
    cmd.args(args);
    tracing::info!("Running command: `{:?}`", cmd);
    match cmd
        .status()
        .await
        .with_context(|| format!("Failed to run command `{cmd:?}`"))?
        .code()
    {
        Some(code) if code != 0 => bail!("Command `{cmd:?}` failed with exit code {code}"),
        Some(_) => Ok(()),
        None => bail!("Command `{cmd:?}` failed with no exit code"),
    }
}

/// Per-machine qcow2 overlay path.
pub fn overlay_path(pool_dir: &str, machine_id: &str) -> String {
    format!("{pool_dir}/{machine_id}.qcow2")
}

/// Per-machine config disk path.
pub fn config_disk_path(pool_dir: &str, machine_id: &str) -> String {
    format!("{pool_dir}/{machine_id}-config.img")
}

/// Create the copy-on-write overlay for a machine on top of its base
/// image, sized `disk_gb` GiB.
pub async fn create_overlay(
    pool_dir: &str,
    machine_id: &str,
    base_image: &str,
    disk_gb: i64,
) -> Result<String> {
    let overlay = overlay_path(pool_dir, machine_id);
    run_cmd(
        "qemu-img",
        [
            "create",
            "-b",
            base_image,
            "-f",
            "qcow2",
            "-F",
            "qcow2",
            &overlay,
            &format!("{disk_gb}G"),
        ],
    )
    .await
    .context("Failed to create image overlay")?;

    Ok(overlay)
}

/// Copy the static network file into the overlay at
/// `/etc/network/interfaces.d/10-netcfg`.
pub async fn inject_network_config(overlay: &str, snippets: &str) -> Result<()> {
    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
    let snippet_dir = scratch.path().join("interfaces.d");
    tokio::fs::create_dir(&snippet_dir)
        .await
        .context("Failed to create interfaces.d")?;
    tokio::fs::write(snippet_dir.join(NETWORK_SNIPPET_FILE), snippets)
        .await
        .context("Failed to write network snippet")?;

    let copy_in = format!("{}:{NETWORK_SNIPPET_GUEST_DIR}", snippet_dir.display());
    run_cmd("virt-customize", ["-a", overlay, "--copy-in", &copy_in])
        .await
        .context("Failed to inject network configuration into overlay")?;

    Ok(())
}

/// Fold the user-data and the disabled-network stub into the machine's
/// cloud-init config disk.
pub async fn build_config_disk(
    pool_dir: &str,
    machine_id: &str,
    user_data: &str,
    network_stub: &str,
) -> Result<String> {
    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
    let user_data_path = scratch.path().join(CLOUD_INIT_USER_DATA);
    let network_config_path = scratch.path().join(CLOUD_INIT_NETWORK_CONFIG);

    tokio::fs::write(&user_data_path, user_data)
        .await
        .context("Failed to write user-data")?;
    tokio::fs::write(&network_config_path, network_stub)
        .await
        .context("Failed to write network-config stub")?;

    let config_disk = config_disk_path(pool_dir, machine_id);
    run_cmd(
        "cloud-localds",
        [
            "-v",
            &format!("--network-config={}", network_config_path.display()),
            &config_disk,
            &user_data_path.display().to_string(),
        ],
    )
    .await
    .context("Failed to build config disk")?;

    Ok(config_disk)
}

/// Best-effort removal of a machine's on-disk artifacts. Failures are
/// logged, never fatal: the files may already be gone.
pub async fn remove_disks(pool_dir: &str, machine_id: &str) {
    for path in [
        config_disk_path(pool_dir, machine_id),
        overlay_path(pool_dir, machine_id),
    ] {
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path, error = %e, "Failed to remove machine disk");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_paths_are_keyed_by_machine_id() {
        assert_eq!(
            overlay_path("/var/lib/machina/images", "aaaa-bbbb"),
            "/var/lib/machina/images/aaaa-bbbb.qcow2"
        );
        assert_eq!(
            config_disk_path("/var/lib/machina/images", "aaaa-bbbb"),
            "/var/lib/machina/images/aaaa-bbbb-config.img"
        );
    }

    #[tokio::test]
    async fn run_cmd_surfaces_exit_codes() {
        assert!(run_cmd("true", Vec::<&str>::new()).await.is_ok());
        assert!(run_cmd("false", Vec::<&str>::new()).await.is_err());
        assert!(run_cmd("machina-no-such-binary", ["x"]).await.is_err());
    }
}
