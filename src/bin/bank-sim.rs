use std::fs::File;

use anyhow::{Context, Result};
use bank_sim::{
    bank::in_memory_bank::InMemoryBank,
    bin_utils::{OperationError, Service},
    config::BankConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected a file name as the first argument")?;
    let statement_of = args
        .next()
        .map(|number| {
            number
                .parse::<u32>()
                .with_context(|| format!("Invalid account number `{number}`"))
        })
        .transpose()?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;
    let config = BankConfig::from_env().context("Invalid bank configuration")?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        bank: InMemoryBank::new(config),
        statement_of,
        error_printer: Box::new(|line: u64, err: OperationError| {
            eprintln!("Error at line {line}: {err}")
        }),
    };
    service.run()
}
