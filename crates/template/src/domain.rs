use askama::Template;

/// One guest NIC in the domain descriptor. `source` is a libvirt network
/// uuid in NAT mode and a host bridge name in bridged mode.
#[derive(Debug, Clone)]
pub struct DomainInterface {
    pub hw_addr: String,
    pub bridged: bool,
    pub source: String,
}

/// The libvirt domain XML for one machine: q35/KVM guest with a config
/// CDROM on sata, the qcow2 overlay on virtio, one virtio NIC per catalog
/// interface, serial console, VNC with autoport and a virtio RNG.
#[derive(Debug, Template)]
#[template(path = "domain.jinja", ext = "xml")]
pub struct DomainTemplate {
    pub name: String,
    pub uuid: String,
    pub cpus: i64,
    pub memory_mb: i64,
    pub config_disk: String,
    pub overlay_disk: String,
    pub interfaces: Vec<DomainInterface>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> DomainTemplate {
        DomainTemplate {
            name: "6274bb3f-aaaa".to_string(),
            uuid: "6274bb3f-aaaa".to_string(),
            cpus: 2,
            memory_mb: 2000,
            config_disk: "/var/lib/machina/images/6274bb3f-aaaa-config.img".to_string(),
            overlay_disk: "/var/lib/machina/images/6274bb3f-aaaa.qcow2".to_string(),
            interfaces: vec![
                DomainInterface {
                    hw_addr: "52:54:00:11:22:33".to_string(),
                    bridged: false,
                    source: "eb7a6e41-net".to_string(),
                },
                DomainInterface {
                    hw_addr: "52:54:00:44:55:66".to_string(),
                    bridged: true,
                    source: "vxbr-42".to_string(),
                },
            ],
        }
    }

    #[test]
    fn domain_header_names_the_machine() {
        let xml = template().render().unwrap();
        assert!(xml.contains("<domain type='kvm'>"));
        assert!(xml.contains("<name>6274bb3f-aaaa</name>"));
        assert!(xml.contains("<uuid>6274bb3f-aaaa</uuid>"));
        assert!(xml.contains("<vcpu placement='static'>2</vcpu>"));
        assert!(xml.contains("<memory unit='MiB'>2000</memory>"));
    }

    #[test]
    fn os_and_platform_blocks_match_the_q35_profile() {
        let xml = template().render().unwrap();
        assert!(xml.contains("<type arch='x86_64' machine='q35'>hvm</type>"));
        assert!(xml.contains("<boot dev='hd'/>"));
        assert!(xml.contains("<bootmenu enable='no'/>"));
        assert!(xml.contains("<acpi/>"));
        assert!(xml.contains("<apic/>"));
        assert!(xml.contains("<cpu mode='host-model'/>"));
        assert!(xml.contains("<timer name='rtc' tickpolicy='catchup'/>"));
        assert!(xml.contains("<timer name='pit' tickpolicy='delay'/>"));
        assert!(xml.contains("<timer name='hpet' present='no'/>"));
    }

    #[test]
    fn disks_map_config_to_sata_and_overlay_to_virtio() {
        let xml = template().render().unwrap();
        assert!(xml.contains("<driver name='qemu' type='raw'/>"));
        assert!(xml.contains("<target dev='sda' bus='sata'/>"));
        assert!(xml.contains("<driver name='qemu' type='qcow2'/>"));
        assert!(xml.contains("<target dev='vda' bus='virtio'/>"));
        assert!(xml.contains("6274bb3f-aaaa-config.img"));
        assert!(xml.contains("6274bb3f-aaaa.qcow2"));
    }

    #[test]
    fn interfaces_switch_between_network_and_bridge_sources() {
        let xml = template().render().unwrap();
        assert!(xml.contains("<interface type='network'>"));
        assert!(xml.contains("<source network='eb7a6e41-net'/>"));
        assert!(xml.contains("<interface type='bridge'>"));
        assert!(xml.contains("<source bridge='vxbr-42'/>"));
        assert_eq!(xml.matches("<model type='virtio'/>").count(), 2);
    }

    #[test]
    fn console_graphics_and_rng_are_present() {
        let xml = template().render().unwrap();
        assert!(xml.contains("<serial type='pty'>"));
        assert!(xml.contains("<graphics type='vnc' port='-1' autoport='yes'/>"));
        assert!(xml.contains("<backend model='random'>/dev/urandom</backend>"));
        assert!(xml.contains("<model type='vga'/>"));
    }
}
