/// Predictable guest device name for the i-th interface (0-based). With a
/// q35 machine each NIC lands on its own PCIe root port, so the first NIC
/// enumerates as enp1s0, the second as enp2s0, and so on.
pub fn guest_ifname(index: usize) -> String {
    format!("enp{}s0", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_names_are_one_based() {
        assert_eq!(guest_ifname(0), "enp1s0");
        assert_eq!(guest_ifname(1), "enp2s0");
        assert_eq!(guest_ifname(7), "enp8s0");
    }
}
