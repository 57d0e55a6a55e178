use std::process::ExitCode;

use w2vgrad::config::Config;
use w2vgrad::logging::{format_check, format_mismatch};
use w2vgrad::{rng, selfcheck};

mod common;

fn main() -> ExitCode {
    env_logger::init();
    let args = match common::parse_env() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n{}", common::USAGE);
            return ExitCode::FAILURE;
        }
    };

    let mut cfg = match args.config.as_deref() {
        Some(path) => match Config::from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("Failed to load config {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    match rng::seed_from_env() {
        Ok(Some(seed)) => {
            log::info!("SEED overrides config seed {} with {seed}", cfg.seed);
            cfg.seed = seed;
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    }

    println!("Testing normalize_rows...");
    if let Err(e) = selfcheck::check_normalize_rows() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    println!("normalize_rows passed");

    let outcomes = match selfcheck::run(&cfg) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let failed = outcomes.iter().filter(|o| !o.report.passed()).count();

    if args.json {
        match selfcheck::to_json(&outcomes) {
            Ok(txt) => println!("{txt}"),
            Err(e) => {
                log::error!("Failed to serialize report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for o in &outcomes {
            println!("{}", format_check(&o.label(), &o.report));
            for m in &o.report.mismatches {
                println!("  {}", format_mismatch(m));
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} gradient checks failed", outcomes.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
