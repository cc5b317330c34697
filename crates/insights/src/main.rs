mod cli;
mod commands;
mod error;
mod output;

use clap::{Parser, ValueEnum};
use insights_config::Defaults;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, OutputFormat};
use crate::error::CliError;

fn main() {
    // Parse CLI arguments
    let mut cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Flag / env wins; otherwise fall back to the config file's default
    cli.global.output = match cli.global.output_flag.take() {
        Some(format) => format,
        None => output_format(&insights_config::load_config_or_default().defaults),
    };

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse `defaults.output`, falling back to a table on unknown names.
fn output_format(defaults: &Defaults) -> OutputFormat {
    OutputFormat::from_str(&defaults.output, true).unwrap_or_else(|_| {
        tracing::warn!(output = %defaults.output, "unknown defaults.output, using table");
        OutputFormat::Table
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a service connection
        Command::Config(args) => commands::config_cmd::handle(&args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "insights", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let session = commands::connect(&cli.global)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &session, &cli.global)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(output: &str) -> Defaults {
        Defaults {
            output: output.into(),
            ..Defaults::default()
        }
    }

    #[test]
    fn config_default_output_is_honoured() {
        assert_eq!(output_format(&defaults("json")), OutputFormat::Json);
        assert_eq!(output_format(&defaults("json-compact")), OutputFormat::JsonCompact);
        assert_eq!(output_format(&defaults("YAML")), OutputFormat::Yaml);
    }

    #[test]
    fn unknown_default_output_falls_back_to_table() {
        assert_eq!(output_format(&defaults("xml")), OutputFormat::Table);
        assert_eq!(output_format(&Defaults::default()), OutputFormat::Table);
    }
}
