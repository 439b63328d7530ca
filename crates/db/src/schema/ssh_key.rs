//! SSH key table schema definition.

pub(crate) fn generate_ssh_key_schema() -> String {
    r#"
DEFINE TABLE ssh_key SCHEMAFULL;
DEFINE FIELD key_id ON TABLE ssh_key TYPE string;
DEFINE FIELD name ON TABLE ssh_key TYPE string;
DEFINE FIELD pubkey ON TABLE ssh_key TYPE string;

DEFINE INDEX unique_ssh_key_id
  ON TABLE ssh_key FIELDS key_id UNIQUE;

DEFINE INDEX unique_ssh_key_name
  ON TABLE ssh_key FIELDS name UNIQUE;
"#
    .to_string()
}
