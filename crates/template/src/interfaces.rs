use askama::Template;

/// One stanza of the Debian-style static network file. The device name is
/// positional: the i-th catalog interface is `enp(i+1)s0` in the guest.
#[derive(Debug, Clone)]
pub struct InterfaceSnippet {
    pub device: String,
    pub address: String,
    pub gateway: Option<String>,
    pub dns_nameservers: Option<String>,
}

/// The `/etc/network/interfaces.d/10-netcfg` file copied into the guest
/// image, one stanza per interface.
#[derive(Debug, Template)]
#[template(path = "interfaces.jinja", ext = "txt")]
pub struct InterfacesTemplate {
    pub interfaces: Vec<InterfaceSnippet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_interface_with_gateway_and_dns() {
        let rendered = InterfacesTemplate {
            interfaces: vec![InterfaceSnippet {
                device: "enp1s0".to_string(),
                address: "192.168.100.2/24".to_string(),
                gateway: Some("192.168.100.1".to_string()),
                dns_nameservers: Some("192.168.100.1 1.1.1.1".to_string()),
            }],
        }
        .render()
        .unwrap();

        assert!(rendered.contains("auto enp1s0\n"));
        assert!(rendered.contains("iface enp1s0 inet static\n"));
        assert!(rendered.contains("    address 192.168.100.2/24\n"));
        assert!(rendered.contains("    gateway 192.168.100.1\n"));
        assert!(rendered.contains("    dns-nameservers 192.168.100.1 1.1.1.1\n"));
    }

    #[test]
    fn optional_lines_are_omitted() {
        let rendered = InterfacesTemplate {
            interfaces: vec![InterfaceSnippet {
                device: "enp2s0".to_string(),
                address: "10.0.0.5/16".to_string(),
                gateway: None,
                dns_nameservers: None,
            }],
        }
        .render()
        .unwrap();

        assert!(rendered.contains("auto enp2s0"));
        assert!(!rendered.contains("gateway"));
        assert!(!rendered.contains("dns-nameservers"));
    }

    #[test]
    fn stanzas_follow_interface_order() {
        let rendered = InterfacesTemplate {
            interfaces: vec![
                InterfaceSnippet {
                    device: "enp1s0".to_string(),
                    address: "192.168.100.2/24".to_string(),
                    gateway: Some("192.168.100.1".to_string()),
                    dns_nameservers: None,
                },
                InterfaceSnippet {
                    device: "enp2s0".to_string(),
                    address: "10.0.0.5/16".to_string(),
                    gateway: None,
                    dns_nameservers: None,
                },
            ],
        }
        .render()
        .unwrap();

        let first = rendered.find("auto enp1s0").unwrap();
        let second = rendered.find("auto enp2s0").unwrap();
        assert!(first < second);
    }
}
