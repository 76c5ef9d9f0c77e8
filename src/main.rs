use anyhow::Result;
use clap::Parser;
use shiftaudit::{
    artifacts,
    audit::{run_audit, AuditResult, LayoutShiftElements},
    cli::{Cli, OutputFormat},
    config::AuditConfig,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_result(result: &AuditResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", result.to_report_string()),
        OutputFormat::Json => println!("{}", result.to_json()?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let mut config = match &args.config {
        Some(path) => AuditConfig::from_file(path)?,
        None => AuditConfig::default(),
    };
    if let Some(pass) = args.pass {
        config.default_pass = pass;
        config.validate()?;
    }

    let bag = artifacts::read_bag(&args.artifacts)?;
    let audit = LayoutShiftElements::with_trace_metric(config.strings.clone());
    let result = run_audit(&audit, &bag, &config.context()).await;

    print_result(&result, args.format)?;

    if let Some(message) = &result.error_message {
        anyhow::bail!("Audit {} failed: {}", result.id, message);
    }

    Ok(())
}
