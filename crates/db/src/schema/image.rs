//! Base image table schema definition.

pub(crate) fn generate_image_schema() -> String {
    r#"
DEFINE TABLE image SCHEMAFULL;
DEFINE FIELD image_id ON TABLE image TYPE string;
DEFINE FIELD name ON TABLE image TYPE string;
DEFINE FIELD os ON TABLE image TYPE string;
DEFINE FIELD path ON TABLE image TYPE string;

DEFINE INDEX unique_image_id
  ON TABLE image FIELDS image_id UNIQUE;

DEFINE INDEX unique_image_name
  ON TABLE image FIELDS name UNIQUE;
"#
    .to_string()
}
