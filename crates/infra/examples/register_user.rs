//! Example: Registering a Directory user end to end
//!
//! Creates a user with a throwaway address, verifies every email and phone
//! through the test API, then updates the user and verifies a secondary
//! email.
//!
//! # Setup
//!
//! Export the client credentials and service URLs (or put them in `.env`):
//! `CLIENT_ID`, `CLIENT_SECRET`, `KONEXUS_AUTHORITY_URL`,
//! `KONEXUS_DIRECTORY_URL`, `KONEXUS_ALERTING_URL`, `KONEXUS_FILES_URL`.
//!
//! Run: `cargo run -p konexus-infra --example register_user [email]`

use konexus_common::observability::{init_tracing, DEFAULT_DIRECTIVE};
use konexus_core::generate_test_email;
use konexus_infra::{config, KonexusClients};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(DEFAULT_DIRECTIVE);

    let email = std::env::args().nth(1).unwrap_or_else(generate_test_email);
    let clients = KonexusClients::connect(config::load()?).await?;

    let outcome = clients.register_user().run(&email).await?;

    println!("Registered user {} for {email}", outcome.user.id);
    println!("Secondary email {} verified", outcome.secondary_email.value);
    Ok(())
}
