use anyhow::Result;
use shared::data::{ActivityKind, DbInterface, DbMachine, DbNetwork, IpNetwork, OsVariant, Specs};
use shared::konst::{SEED_IMAGE_ID, SEED_NETWORK_ID, SEED_SSH_KEY_ID};

/// Fresh in-memory catalog with schema applied.
async fn setup_db() -> Result<db::Catalog> {
    let catalog = db::connect("mem://", "machina", "test").await?;
    db::apply_schema(&catalog).await?;
    Ok(catalog)
}

fn test_machine(machine_id: &str, name: &str) -> DbMachine {
    DbMachine {
        id: None,
        machine_id: machine_id.to_string(),
        name: name.to_string(),
        user: "ken".to_string(),
        image_id: SEED_IMAGE_ID.to_string(),
        ssh_key_ids: vec![SEED_SSH_KEY_ID.to_string()],
        specs: Specs {
            cpus: 2,
            memory_mb: 2000,
            disk_gb: 10,
        },
    }
}

fn test_interface(machine_id: &str, ipv4: &str) -> DbInterface {
    DbInterface {
        id: None,
        machine_id: machine_id.to_string(),
        network_id: SEED_NETWORK_ID.to_string(),
        ipv4: ipv4.to_string(),
        ipv6: String::new(),
        hw_addr: "52:54:00:aa:bb:cc".to_string(),
    }
}

#[tokio::test]
async fn seeds_are_idempotent() -> Result<()> {
    let catalog = setup_db().await?;

    let first = db::seed_defaults(&catalog).await?;
    assert_eq!(first, 3, "fresh catalog seeds image, key and network");

    let second = db::seed_defaults(&catalog).await?;
    assert_eq!(second, 0, "second run creates nothing");

    let image = db::get_image(&catalog, SEED_IMAGE_ID).await?.unwrap();
    assert_eq!(image.name, "debian-bullseye");
    assert_eq!(image.os, OsVariant::DebianBullseye);

    let by_name = db::get_image_by_name(&catalog, "debian-bullseye").await?.unwrap();
    assert_eq!(by_name.image_id, SEED_IMAGE_ID);

    let network = db::get_network(&catalog, SEED_NETWORK_ID).await?.unwrap();
    assert_eq!(network.ipv4.subnet.to_string(), "192.168.100.0/24");
    assert_eq!(network.ipv4.gateway.to_string(), "192.168.100.1");
    assert!(network.is_nat());

    Ok(())
}

#[tokio::test]
async fn lookup_distinguishes_missing_from_present() -> Result<()> {
    let catalog = setup_db().await?;
    db::seed_defaults(&catalog).await?;

    assert!(db::get_ssh_key(&catalog, SEED_SSH_KEY_ID).await?.is_some());
    assert!(db::get_ssh_key(&catalog, "no-such-key").await?.is_none());
    assert!(db::get_image(&catalog, "no-such-image").await?.is_none());
    assert!(db::get_network(&catalog, "no-such-network").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn duplicate_names_are_rejected() -> Result<()> {
    let catalog = setup_db().await?;

    db::create_ssh_key(&catalog, "id-1", "ops", "ssh-ed25519 AAAA first").await?;
    let dup = db::create_ssh_key(&catalog, "id-2", "ops", "ssh-ed25519 AAAA second").await;
    assert!(dup.is_err(), "second key with the same name must fail");

    let keys = db::list_ssh_keys(&catalog).await?;
    assert_eq!(keys.len(), 1);

    Ok(())
}

#[tokio::test]
async fn machine_create_persists_machine_and_interfaces() -> Result<()> {
    let catalog = setup_db().await?;
    db::seed_defaults(&catalog).await?;

    let machine = test_machine("aaaa-bbbb", "m1");
    let interfaces = vec![test_interface("aaaa-bbbb", "192.168.100.2/24")];
    db::create_machine(&catalog, machine, interfaces).await?;

    let stored = db::get_machine(&catalog, "aaaa-bbbb").await?.unwrap();
    assert_eq!(stored.name, "m1");
    assert_eq!(stored.ssh_key_ids, vec![SEED_SSH_KEY_ID.to_string()]);

    let ifaces = db::list_interfaces_by_machine(&catalog, "aaaa-bbbb").await?;
    assert_eq!(ifaces.len(), 1);
    assert_eq!(ifaces[0].ipv4, "192.168.100.2/24");

    let on_network = db::list_interfaces_by_network(&catalog, SEED_NETWORK_ID).await?;
    assert_eq!(on_network.len(), 1);

    Ok(())
}

#[tokio::test]
async fn address_collision_aborts_the_whole_transaction() -> Result<()> {
    let catalog = setup_db().await?;
    db::seed_defaults(&catalog).await?;

    db::create_machine(
        &catalog,
        test_machine("aaaa-1111", "m1"),
        vec![test_interface("aaaa-1111", "192.168.100.2/24")],
    )
    .await?;

    // Same (network, ipv4) pair: unique index must abort machine + interface.
    let err = db::create_machine(
        &catalog,
        test_machine("aaaa-2222", "m2"),
        vec![test_interface("aaaa-2222", "192.168.100.2/24")],
    )
    .await
    .unwrap_err();

    assert!(
        db::is_interface_collision(&err),
        "collision should be recognizable: {err:#}"
    );
    assert!(
        db::get_machine(&catalog, "aaaa-2222").await?.is_none(),
        "machine row must not survive the aborted transaction"
    );
    assert_eq!(
        db::count_interfaces_by_network(&catalog, SEED_NETWORK_ID).await?,
        1
    );

    Ok(())
}

#[tokio::test]
async fn delete_cascades_interfaces() -> Result<()> {
    let catalog = setup_db().await?;
    db::seed_defaults(&catalog).await?;

    db::create_machine(
        &catalog,
        test_machine("aaaa-3333", "m3"),
        vec![
            test_interface("aaaa-3333", "192.168.100.2/24"),
            test_interface("aaaa-3333", "192.168.100.3/24"),
        ],
    )
    .await?;

    db::delete_machine(&catalog, "aaaa-3333").await?;

    assert!(db::get_machine(&catalog, "aaaa-3333").await?.is_none());
    assert_eq!(
        db::count_interfaces_by_network(&catalog, SEED_NETWORK_ID).await?,
        0
    );

    Ok(())
}

#[tokio::test]
async fn machines_resolve_by_uuid_or_name() -> Result<()> {
    let catalog = setup_db().await?;
    db::seed_defaults(&catalog).await?;

    db::create_machine(
        &catalog,
        test_machine("aaaa-4444", "worker"),
        vec![test_interface("aaaa-4444", "192.168.100.2/24")],
    )
    .await?;

    let by_id = db::resolve_machine(&catalog, "aaaa-4444").await?.unwrap();
    assert_eq!(by_id.name, "worker");

    let by_name = db::resolve_machine(&catalog, "worker").await?.unwrap();
    assert_eq!(by_name.machine_id, "aaaa-4444");

    assert!(db::resolve_machine(&catalog, "missing").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn activities_list_oldest_first() -> Result<()> {
    let catalog = setup_db().await?;

    db::create_activity(&catalog, ActivityKind::MachineCreated, "aaaa-5555").await?;
    db::create_activity(&catalog, ActivityKind::MachinePoweroff, "aaaa-5555").await?;
    db::create_activity(&catalog, ActivityKind::MachineDeleted, "aaaa-5555").await?;

    let activities = db::list_activities(&catalog).await?;
    let kinds: Vec<ActivityKind> = activities.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ActivityKind::MachineCreated,
            ActivityKind::MachinePoweroff,
            ActivityKind::MachineDeleted,
        ]
    );
    assert!(activities.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    Ok(())
}

#[tokio::test]
async fn ssh_key_and_image_delete_report_whether_a_row_went() -> Result<()> {
    let catalog = setup_db().await?;
    db::seed_defaults(&catalog).await?;

    assert!(db::delete_ssh_key(&catalog, SEED_SSH_KEY_ID).await?);
    assert!(!db::delete_ssh_key(&catalog, SEED_SSH_KEY_ID).await?);
    assert!(db::get_ssh_key(&catalog, SEED_SSH_KEY_ID).await?.is_none());

    assert!(db::delete_image(&catalog, SEED_IMAGE_ID).await?);
    assert!(!db::delete_image(&catalog, "never-existed").await?);

    Ok(())
}

#[tokio::test]
async fn network_delete_by_uuid() -> Result<()> {
    let catalog = setup_db().await?;

    let network = DbNetwork {
        id: None,
        network_id: "net-1".to_string(),
        name: "lan0".to_string(),
        ipv4: IpNetwork {
            subnet: "10.10.0.0/24".parse()?,
            gateway: "10.10.0.1".parse()?,
        },
        ipv6: None,
        nameservers: "1.1.1.1".to_string(),
        search_domains: String::new(),
        bridge_id: 7,
    };
    db::create_network(&catalog, network).await?;

    assert!(db::get_network_by_name(&catalog, "lan0").await?.is_some());
    assert!(db::delete_network(&catalog, "net-1").await?);
    assert!(!db::delete_network(&catalog, "net-1").await?);
    assert!(db::get_network(&catalog, "net-1").await?.is_none());

    Ok(())
}
