use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::str::FromStr;

use anyhow::{Context, Result};
use ipnet::Ipv4Net;

/// Parse a CIDR notation string into an `Ipv4Net`.
pub fn parse_subnet(cidr: &str) -> Result<Ipv4Net> {
    Ipv4Net::from_str(cidr).with_context(|| format!("Failed to parse subnet: {cidr}"))
}

/// Parse the address part of interface CIDR text (`a.b.c.d/prefix`).
pub fn host_of(cidr: &str) -> Result<Ipv4Addr> {
    let net = parse_subnet(cidr)?;
    Ok(net.addr())
}

/// Pick the first free host address in `subnet`.
///
/// The subnet base, the gateway and every address in `taken` are blocked.
/// Candidates walk upwards from the base address; the broadcast address
/// ends the walk. Returns `None` when the pool is exhausted.
pub fn next_free_host(
    subnet: &Ipv4Net,
    gateway: Ipv4Addr,
    taken: &HashSet<Ipv4Addr>,
) -> Option<Ipv4Addr> {
    let base = subnet.network();
    let broadcast = subnet.broadcast();

    let mut candidate = Ipv4Addr::from_bits(base.to_bits().checked_add(1)?);
    while candidate < broadcast {
        if candidate != gateway && !taken.contains(&candidate) {
            return Some(candidate);
        }
        candidate = Ipv4Addr::from_bits(candidate.to_bits().checked_add(1)?);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subnet(cidr: &str) -> Ipv4Net {
        cidr.parse().unwrap()
    }

    #[test]
    fn first_allocation_skips_base_and_gateway() {
        let net = subnet("192.168.100.0/24");
        let gateway = Ipv4Addr::new(192, 168, 100, 1);
        let free = next_free_host(&net, gateway, &HashSet::new());
        assert_eq!(free, Some(Ipv4Addr::new(192, 168, 100, 2)));
    }

    #[test]
    fn allocation_skips_taken_addresses() {
        let net = subnet("192.168.100.0/24");
        let gateway = Ipv4Addr::new(192, 168, 100, 1);
        let taken: HashSet<Ipv4Addr> = [Ipv4Addr::new(192, 168, 100, 2)].into_iter().collect();
        let free = next_free_host(&net, gateway, &taken);
        assert_eq!(free, Some(Ipv4Addr::new(192, 168, 100, 3)));
    }

    #[test]
    fn gateway_deep_in_subnet_is_skipped() {
        let net = subnet("10.0.0.0/24");
        let gateway = Ipv4Addr::new(10, 0, 0, 1);
        let taken: HashSet<Ipv4Addr> = (1..=9).map(|octet| Ipv4Addr::new(10, 0, 0, octet)).collect();
        assert_eq!(
            next_free_host(&net, gateway, &taken),
            Some(Ipv4Addr::new(10, 0, 0, 10))
        );
    }

    #[test]
    fn full_slash_30_is_exhausted() {
        // Base .0, gateway .1, one interface on .2; .3 is the broadcast.
        let net = subnet("10.1.2.0/30");
        let gateway = Ipv4Addr::new(10, 1, 2, 1);
        let taken: HashSet<Ipv4Addr> = [Ipv4Addr::new(10, 1, 2, 2)].into_iter().collect();
        assert_eq!(next_free_host(&net, gateway, &taken), None);
    }

    #[test]
    fn broadcast_is_never_allocated() {
        let net = subnet("10.1.2.0/30");
        let gateway = Ipv4Addr::new(10, 1, 2, 1);
        assert_eq!(
            next_free_host(&net, gateway, &HashSet::new()),
            Some(Ipv4Addr::new(10, 1, 2, 2))
        );
    }

    #[test]
    fn host_of_strips_the_prefix() {
        assert_eq!(
            host_of("192.168.100.2/24").unwrap(),
            Ipv4Addr::new(192, 168, 100, 2)
        );
        assert!(host_of("not-an-address").is_err());
    }
}
