use anyhow::{Context, Result};
use chrono::Utc;
use weatherdash::dashboard::build_dashboard;
use weatherdash::initialization::init;

fn main() -> Result<()> {
    let (config, owm) = init().context("failed to initialize weatherdash")?;

    let dashboard = build_dashboard(
        &owm,
        &config.open_weather_map.city,
        config.open_weather_map.unit,
        Utc::now());

    let json = serde_json::to_string_pretty(&dashboard)
        .context("failed to serialize dashboard")?;
    println!("{}", json);

    Ok(())
}
