//! Network table schema definition.
//!
//! ## Fields
//! - `network_id`: business uuid (unique)
//! - `name`: network name (unique)
//! - `ipv4`: `{subnet, gateway}` object; subnet is CIDR text
//! - `ipv6`: optional `{subnet, gateway}` object
//! - `nameservers`: whitespace-separated resolver list
//! - `bridge_id`: 0 selects NAT mode, non-zero a VXLAN-bridged segment

pub(crate) fn generate_network_schema() -> String {
    r#"
DEFINE TABLE network SCHEMAFULL;
DEFINE FIELD network_id ON TABLE network TYPE string;
DEFINE FIELD name ON TABLE network TYPE string;
DEFINE FIELD ipv4 ON TABLE network FLEXIBLE TYPE object;
DEFINE FIELD ipv6 ON TABLE network FLEXIBLE TYPE option<object>;
DEFINE FIELD nameservers ON TABLE network TYPE string;
DEFINE FIELD search_domains ON TABLE network TYPE string;
DEFINE FIELD bridge_id ON TABLE network TYPE number
    ASSERT $value >= 0 AND $value == math::floor($value);

DEFINE INDEX unique_network_id
  ON TABLE network FIELDS network_id UNIQUE;

DEFINE INDEX unique_network_name
  ON TABLE network FIELDS name UNIQUE;
"#
    .to_string()
}
