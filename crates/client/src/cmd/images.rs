use anyhow::Result;
use tabled::{Table, Tabled};

use shared::data::ListImagesResponse;

use crate::http::Api;

#[derive(Tabled)]
struct ImageRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "OPERATING SYSTEM")]
    os: String,
    #[tabled(rename = "PATH")]
    path: String,
}

pub async fn run(api: &Api, ids: bool) -> Result<()> {
    let response: ListImagesResponse = api.get("/api/v1/images").await?;
    if ids {
        for image in &response.images {
            println!("{}", image.id);
        }
        return Ok(());
    }

    let rows: Vec<ImageRow> = response
        .images
        .iter()
        .map(|image| ImageRow {
            id: image.id.clone(),
            name: image.name.clone(),
            os: image.os.to_string(),
            path: image.path.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}
