//! Activity log table schema definition. Append-only; rows are never
//! updated or deleted.

pub(crate) fn generate_activity_schema() -> String {
    r#"
DEFINE TABLE activity SCHEMAFULL;
DEFINE FIELD timestamp ON TABLE activity TYPE string;
DEFINE FIELD kind ON TABLE activity TYPE string;
DEFINE FIELD subject ON TABLE activity TYPE string;
"#
    .to_string()
}
