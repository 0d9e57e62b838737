mod config;
mod error;
mod render;

use anyhow::Result;
use config::ChartConfig;
use rand::{rngs::StdRng, SeedableRng};
use spendviz_data::{cap_upper_tail, synthesize};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let config = ChartConfig::default();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = synthesize(&config.segments, &mut rng)?;
    info!(
        "generated {} purchases across {} segments (seed {})",
        records.len(),
        config.segments.len(),
        config.seed
    );

    let capped = cap_upper_tail(&mut records, config.cap_quantile)?;
    info!("capped {capped} purchases above the {} quantile", config.cap_quantile);

    let png = render::render_png(&records, &config)?;
    std::fs::write(&config.output, &png)?;
    info!("wrote {} ({} bytes)", config.output.display(), png.len());
    Ok(())
}
