use rand::Rng;

/// Creates a random colon delimited hexadecimal string for use as MAC
/// address. The caller picks the vendor OUI; the low three bytes come from
/// the OS-seeded thread RNG.
pub fn random_mac(vendor_oui: &str) -> String {
    // 24-bit random suffix (between 0 and 0xFFFFFF)
    let random_number: u32 = rand::thread_rng().gen_range(0..=0xFFFFFF);

    let hex = format!("{random_number:06x}");

    format!(
        "{}:{}:{}:{}",
        vendor_oui,
        &hex[0..2],
        &hex[2..4],
        &hex[4..6]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::konst::KVM_OUI;

    #[test]
    fn mac_carries_the_kvm_oui() {
        let mac = random_mac(KVM_OUI);
        assert!(mac.starts_with("52:54:00:"), "unexpected MAC: {mac}");
        assert_eq!(mac.len(), 17);
        assert_eq!(mac.chars().filter(|&c| c == ':').count(), 5);
    }

    #[test]
    fn suffix_is_lowercase_hex() {
        let mac = random_mac(KVM_OUI);
        let suffix = &mac[9..];
        assert!(
            suffix
                .chars()
                .all(|c| c == ':' || c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "unexpected suffix: {suffix}"
        );
    }

    #[test]
    fn consecutive_macs_differ() {
        let macs: std::collections::HashSet<String> =
            (0..64).map(|_| random_mac(KVM_OUI)).collect();
        assert!(macs.len() > 1);
    }
}
