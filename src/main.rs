use pjl::{EnvironmentSnapshot, JobError, JobSummary, ParserConfig, ParserState, run_job};
use serde::Serialize;
use std::env;
use std::fs::File;
use std::io::BufReader;

#[derive(Serialize)]
struct Report {
    job: JobSummary,
    environment: EnvironmentSnapshot,
}

/// Runs a print job through the PJL parser and prints the resulting
/// environment as JSON.
fn main() -> Result<(), JobError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!("Runs a print job through the PJL parser and dumps the PJL environment.");
        eprintln!();
        eprintln!("Usage: {} <path/to/job> [volume0-dir] [volume1-dir]", args[0]);
        eprintln!();
        eprintln!("Environment:");
        eprintln!("  PCLFONTSOURCE   font search path overriding the PJL font sources");
        eprintln!("  PJL_VOLUME_0    host directory for volume 0: (default /tmp/pjl0)");
        eprintln!("  PJL_VOLUME_1    host directory for volume 1: (default /tmp/pjl1)");
        eprintln!("  RUST_LOG        log filter, e.g. RUST_LOG=pjl_core=debug");
        std::process::exit(1);
    }

    let mut config = ParserConfig::from_env();
    if let Some(volume_0) = args.get(2) {
        config.volumes.volume_0 = volume_0.clone();
    }
    if let Some(volume_1) = args.get(3) {
        config.volumes.volume_1 = volume_1.clone();
    }

    let mut pjl = ParserState::new(config);
    let job = File::open(&args[1])?;
    let summary = run_job(&mut pjl, BufReader::new(job))?;

    let report = Report {
        job: summary,
        environment: pjl.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
