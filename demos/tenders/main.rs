//! Tender reports page over the embedded fixtures.
//!
//! Logs go to `tenders.log`; set `RUST_LOG=tenderboard=debug` for state changes.

use bubbletea_rs::Program;
use std::fs::File;
use std::sync::Mutex;
use tenderboard::dashboard::TendersPage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = File::create("tenders.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tenderboard=info")),
        )
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let program = Program::<TendersPage>::builder().alt_screen(true).build()?;
    program.run().await?;
    tracing::info!("tenders demo exited");
    Ok(())
}
