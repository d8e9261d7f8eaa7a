use anyhow::{Context, Result};
use campaign_cleaner::{run, PipelineConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) fixed dirs ───────────────────────────────────────────────
    let config = PipelineConfig::default();

    // ─── 3) enumerate → read → clean → merge → write ─────────────────
    let report = run(&config).with_context(|| {
        format!(
            "cleaning {} into {}",
            config.input_dir.display(),
            config.output_dir.display()
        )
    })?;

    for path in report.outputs.iter() {
        println!("{}", path.display());
    }
    info!("all done");
    Ok(())
}
