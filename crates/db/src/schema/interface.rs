//! Network interface table schema definition.
//!
//! Interfaces are written only inside the machine-create transaction and
//! removed by the machine-delete cascade. The `(network_id, ipv4)` unique
//! index is what makes concurrent address allocation safe: two requests
//! racing for the same address abort one transaction, and the loser
//! re-allocates.

/// Index name checked by `machine::is_interface_collision` to recognize an
/// allocation race in the database error text.
pub(crate) const INTERFACE_UNIQUE_INDEX: &str = "unique_interface_network_ipv4";

pub(crate) fn generate_interface_schema() -> String {
    format!(
        r#"
DEFINE TABLE interface SCHEMAFULL;
DEFINE FIELD machine_id ON TABLE interface TYPE string;
DEFINE FIELD network_id ON TABLE interface TYPE string;
DEFINE FIELD ipv4 ON TABLE interface TYPE string;
DEFINE FIELD ipv6 ON TABLE interface TYPE string;
DEFINE FIELD hw_addr ON TABLE interface TYPE string;

DEFINE INDEX {INTERFACE_UNIQUE_INDEX}
  ON TABLE interface FIELDS network_id, ipv4 UNIQUE;
"#
    )
}
