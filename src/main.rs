//! binder CLI entry point.

mod cli;
mod diagnostics;

use std::path::Path;
use std::process::ExitCode;

use binder::config::GeneratorConfig;
use binder::error::BinderResult;
use binder::pipeline::{describe, generate_to_path, load_unit};
use binder_core::BinderDatabase;
use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let db = BinderDatabase::default();
    let (input, result) = match cli.command {
        Command::Generate {
            input,
            type_name,
            out,
            generator,
        } => {
            let config = GeneratorConfig::from(generator);
            let result = run_generate(&db, &input, &type_name, &out, &config);
            (input, result)
        }
        Command::List { input, marker } => {
            let config = GeneratorConfig {
                marker_type: marker,
                ..GeneratorConfig::default()
            };
            let result = run_list(&db, &input, &config);
            (input, result)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let source = std::fs::read_to_string(&input).ok();
            diagnostics::print_error(&err, source.as_deref(), &input.display().to_string());
            ExitCode::FAILURE
        }
    }
}

fn run_generate(
    db: &BinderDatabase,
    input: &Path,
    type_name: &str,
    out: &Path,
    config: &GeneratorConfig,
) -> BinderResult<()> {
    let unit = load_unit(db, input)?;
    generate_to_path(db, unit, type_name, out, config)?;
    Ok(())
}

fn run_list(db: &BinderDatabase, input: &Path, config: &GeneratorConfig) -> BinderResult<()> {
    let unit = load_unit(db, input)?;
    for summary in describe(db, unit, config)? {
        print!("{summary}");
    }
    Ok(())
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "binder=warn",
        1 => "binder=debug,binder_ast=debug",
        _ => "binder=trace,binder_ast=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_for_verbosity() {
        assert_eq!(directive_for_verbosity(0), "binder=warn");
        assert_eq!(directive_for_verbosity(1), "binder=debug,binder_ast=debug");
        assert_eq!(directive_for_verbosity(5), "binder=trace,binder_ast=trace");
    }
}
