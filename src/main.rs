use anyhow::{Context, Result};
use sales_ingest::{IngestConfig, Ingestor, SystemClock};

fn main() -> Result<()> {
    // ─── 1) log + output dirs, run logger ────────────────────────────
    let ingestor = Ingestor::for_run(IngestConfig::default(), Box::new(SystemClock))
        .context("setting up ingestion run")?;

    // ─── 2) one pass; any error exits non-zero ───────────────────────
    ingestor.run().context("ingestion failed")?;
    Ok(())
}
