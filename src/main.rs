use chrono::Local;
use genscrape::{info_time, process::run_census, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    run_census().await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
