mod cli;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("relshape: error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = cli::Args::parse();

    let structure_text = std::fs::read_to_string(&args.structure)
        .with_context(|| format!("reading structure file {}", args.structure.display()))?;
    let structure: relshape_core::DatabaseStructure =
        serde_json::from_str(&structure_text).context("parsing database structure JSON")?;

    let sql = match args.query {
        Some(sql) => sql,
        None => {
            let mut sql = String::new();
            std::io::stdin()
                .read_to_string(&mut sql)
                .context("reading SQL from standard input")?;
            sql
        }
    };

    let analysis = relshape_core::analyze_sql(&structure, &sql).context("analyzing SQL")?;

    let output = serde_json::to_string_pretty(&analysis).context("serializing analysis result")?;
    println!("{output}");

    Ok(())
}
