//! Example: Sending an alert with a file attachment
//!
//! Uploads `ExampleDoc.pdf` and `ExampleContacts.csv`, builds an ad-hoc
//! distribution list from the CSV and sends a text message alert linking
//! the PDF.
//!
//! Run: `cargo run -p konexus-infra --example send_alert_with_attachment
//! [document] [contacts.csv]`

use std::path::PathBuf;

use konexus_common::observability::{init_tracing, DEFAULT_DIRECTIVE};
use konexus_infra::{config, KonexusClients};

fn data_file(arg: Option<String>, default_name: &str) -> PathBuf {
    arg.map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/data").join(default_name)
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(DEFAULT_DIRECTIVE);

    let mut args = std::env::args().skip(1);
    let document = data_file(args.next(), "ExampleDoc.pdf");
    let contacts = data_file(args.next(), "ExampleContacts.csv");

    let clients = KonexusClients::connect(config::load()?).await?;
    let outcome = clients.send_alert_with_attachment().run(&document, &contacts).await?;

    println!("Alert {} sent", outcome.alert_id);
    println!("  message: {}", outcome.message.as_deref().unwrap_or("-"));
    println!("  status:  {}", outcome.status.as_deref().unwrap_or("-"));
    Ok(())
}
