use anyhow::Result;
use tabled::{Table, Tabled};

use shared::data::ListActivitiesResponse;

use crate::http::Api;

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "TIMESTAMP")]
    timestamp: String,
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "SUBJECT")]
    subject: String,
}

pub async fn run(api: &Api) -> Result<()> {
    let response: ListActivitiesResponse = api.get("/api/v1/activities").await?;

    let rows: Vec<ActivityRow> = response
        .activities
        .iter()
        .map(|activity| ActivityRow {
            timestamp: activity.timestamp.to_string(),
            kind: activity.kind.to_string(),
            subject: activity.subject.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}
