//! Example: Sending an email alert to everyone inside a polygon
//!
//! Run: `cargo run -p konexus-infra --example send_alert_with_polygon`

use konexus_common::observability::{init_tracing, DEFAULT_DIRECTIVE};
use konexus_domain::FeaturesSource;
use konexus_infra::{config, KonexusClients};

// West, south, east, north
const BBOX: [f64; 4] = [-116.31916974347632, 43.646603675700405, -116.31670211118283, 43.64840478081464];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(DEFAULT_DIRECTIVE);

    let [west, south, east, north] = BBOX;
    let ring = vec![
        vec![west, south],
        vec![west, north],
        vec![east, north],
        vec![east, south],
        vec![west, south],
    ];

    let clients = KonexusClients::connect(config::load()?).await?;
    let outcome = clients
        .send_alert_with_polygon()
        .run(FeaturesSource::PublicUsers, BBOX.to_vec(), vec![ring])
        .await?;

    println!("Alert {} sent", outcome.alert_id);
    println!("  status: {}", outcome.status.as_deref().unwrap_or("-"));
    Ok(())
}
