//! # granimar-quote
//!
//! Prices a countertop job by area and checks cédulas and email addresses,
//! using the same rules as the invoicing app.
//!
//! ## Usage
//! ```bash
//! # 12.5 m² at ₡45 000 per m²
//! granimar-quote 12.5 45000
//!
//! # English labels and grouping
//! GRANIMAR_LOCALE=en-US granimar-quote 12.5 45000
//!
//! # Checks (exit code 1 when rejected)
//! granimar-quote cedula 4-0156-0651
//! granimar-quote email ventas@granimar.cr
//!
//! # Explicit config file
//! granimar-quote --config ./granimar.toml 3.3 61000
//! ```
//!
//! ## Logging
//! `RUST_LOG` overrides the default filter `info,granimar=debug`. Logs are
//! written to stderr so stdout only carries results.

mod config;
mod error;

use granimar_core::validation::{validate_price_per_metre, validate_square_metres};
use granimar_core::{
    format_cedula, validate_cedula, validate_email, InvoiceBreakdown, Locale, Money, TaxRate,
    ValidationError,
};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::QuoteConfig;
use crate::error::{CliError, CliResult};

const USAGE: &str = "\
Usage:
  granimar-quote [--config PATH] <square_metres> <price_per_metre>
  granimar-quote [--config PATH] cedula <value>
  granimar-quote [--config PATH] email <value>

Options:
  -c, --config <PATH>  TOML config file (default: $GRANIMAR_CONFIG)
  -h, --help           Show this help message

Environment:
  GRANIMAR_LOCALE      es-CR | en-US
  GRANIMAR_CURRENCY    CRC | USD";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    Quote {
        square_metres: Decimal,
        price_per_metre: Decimal,
    },
    Cedula(String),
    Email(String),
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    config_path: Option<PathBuf>,
    command: Command,
}

/// Text for stdout plus whether the input was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Report {
    output: String,
    accepted: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args).and_then(run) {
        Ok(report) => {
            println!("{}", report.output);
            if report.accepted {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            debug!(?err, "Command failed");
            eprintln!("error: {err}");
            if matches!(err, CliError::Usage(_)) {
                eprintln!();
                eprintln!("{USAGE}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=trace` - Also show computed breakdowns
/// - Default: INFO, DEBUG for granimar crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,granimar=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> CliResult<Invocation> {
    let mut config_path = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| CliError::Usage("--config needs a path".to_string()))?;
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "-h" | "--help" => {
                return Ok(Invocation {
                    config_path,
                    command: Command::Help,
                });
            }
            other => positional.push(other),
        }
        i += 1;
    }

    let command = match positional.as_slice() {
        ["cedula", value] => Command::Cedula(value.to_string()),
        ["email", value] => Command::Email(value.to_string()),
        [square_metres, price_per_metre] => Command::Quote {
            square_metres: parse_decimal("square_metres", square_metres)?,
            price_per_metre: parse_decimal("price_per_metre", price_per_metre)?,
        },
        [] => return Err(CliError::Usage("missing arguments".to_string())),
        _ => {
            return Err(CliError::Usage(format!(
                "unexpected arguments: {}",
                positional.join(" ")
            )))
        }
    };

    Ok(Invocation {
        config_path,
        command,
    })
}

fn parse_decimal(name: &str, value: &str) -> CliResult<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| CliError::Usage(format!("{name} must be a number, got {value:?}")))
}

fn run(invocation: Invocation) -> CliResult<Report> {
    if invocation.command == Command::Help {
        return Ok(Report {
            output: USAGE.to_string(),
            accepted: true,
        });
    }

    let config = QuoteConfig::load(invocation.config_path)?;
    execute(&invocation.command, &config)
}

fn execute(command: &Command, config: &QuoteConfig) -> CliResult<Report> {
    let locale = config.format.locale;

    match command {
        Command::Help => Ok(Report {
            output: USAGE.to_string(),
            accepted: true,
        }),

        Command::Quote {
            square_metres,
            price_per_metre,
        } => {
            validate_square_metres(*square_metres)?;
            validate_price_per_metre(*price_per_metre)?;
            let price = Money::checked_from_decimal(*price_per_metre).ok_or_else(|| {
                ValidationError::OutOfRange {
                    field: "precio_por_metro".to_string(),
                    min: 0,
                    max: i64::MAX / 100,
                }
            })?;

            let breakdown = InvoiceBreakdown::for_area(*square_metres, price);
            info!(
                square_metres = %square_metres,
                total = %breakdown.total,
                "Quote computed"
            );

            Ok(Report {
                output: render_quote(config, *square_metres, price, &breakdown),
                accepted: true,
            })
        }

        Command::Cedula(value) => {
            let valid = validate_cedula(value);
            let verdict = match (locale, valid) {
                (Locale::EsCr, true) => "válida",
                (Locale::EsCr, false) => "inválida",
                (Locale::EnUs, true) => "valid",
                (Locale::EnUs, false) => "invalid",
            };
            Ok(Report {
                output: format!("{}: {}", format_cedula(value), verdict),
                accepted: valid,
            })
        }

        Command::Email(value) => {
            let valid = validate_email(value);
            let verdict = match (locale, valid) {
                (Locale::EsCr, true) => "válido",
                (Locale::EsCr, false) => "inválido",
                (Locale::EnUs, true) => "valid",
                (Locale::EnUs, false) => "invalid",
            };
            Ok(Report {
                output: format!("{value}: {verdict}"),
                accepted: valid,
            })
        }
    }
}

fn render_quote(
    config: &QuoteConfig,
    square_metres: Decimal,
    price_per_metre: Money,
    breakdown: &InvoiceBreakdown,
) -> String {
    let format = &config.format;
    let iva = TaxRate::IVA.percentage().normalize();

    let area = square_metres.normalize().to_string();
    let (area, labels) = match format.locale {
        Locale::EsCr => (
            area.replace('.', ","),
            ["Metros cuadrados", "Precio por m²", "Subtotal", "IVA", "Total"],
        ),
        Locale::EnUs => (
            area,
            ["Square metres", "Price per m²", "Subtotal", "VAT", "Total"],
        ),
    };

    let rows = [
        (labels[0].to_string(), format!("{area} m²")),
        (labels[1].to_string(), format.format_money(price_per_metre)),
        (labels[2].to_string(), format.format_money(breakdown.subtotal)),
        (format!("{} ({iva}%)", labels[3]), format.format_money(breakdown.tax)),
        (labels[4].to_string(), format.format_money(breakdown.total)),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<18}{}", format!("{label}:"), value))
        .collect::<Vec<_>>()
        .join("\n")
}
