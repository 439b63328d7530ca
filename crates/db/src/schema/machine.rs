//! Machine table schema definition.
//!
//! References to images and ssh keys are held as business uuids; the
//! orchestrator resolves them before insert, and cascade deletion of the
//! machine's interfaces is handled by the application (see
//! `machine::delete`).

pub(crate) fn generate_machine_schema() -> String {
    r#"
DEFINE TABLE machine SCHEMAFULL;
DEFINE FIELD machine_id ON TABLE machine TYPE string;
DEFINE FIELD name ON TABLE machine TYPE string;
DEFINE FIELD user ON TABLE machine TYPE string;
DEFINE FIELD image_id ON TABLE machine TYPE string;
DEFINE FIELD ssh_key_ids ON TABLE machine TYPE array<string>
    ASSERT array::len($value) > 0;
DEFINE FIELD specs ON TABLE machine FLEXIBLE TYPE object;

DEFINE INDEX unique_machine_id
  ON TABLE machine FIELDS machine_id UNIQUE;

DEFINE INDEX unique_machine_name
  ON TABLE machine FIELDS name UNIQUE;
"#
    .to_string()
}
