//! # Command-Line Arguments
//!
//! ```text
//! essence [--config PATH] [--verbose] [--json] <COMMAND>
//!
//!   summary    [--date D]
//!   session    status | open --amount N [--notes S] | close --amount N [--notes S]
//!   close-day  --counted N [--date D] [--opening N] [--notes S] [--dry-run]
//!   history    --from D --to D
//!   report     [--date D] [--output PATH]
//!   health
//!   config     show | init [--force]
//! ```
//!
//! Amounts are whole currency units; `215000`, `215,000` and `$215,000` are
//! all accepted. A shortage may be written `-5,000`, `-$5,000` or `$-5,000`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use essence_core::validation::parse_date;
use essence_core::{Money, MAX_AMOUNT_UNITS};

#[derive(Debug, Parser)]
#[command(name = "essence", version, about = "Essence POS cash closing client")]
pub struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log requests and responses.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the day's sales and movements.
    Summary {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Inspect, open or close the register.
    #[command(subcommand)]
    Session(SessionCommand),

    /// Count the drawer and close the day.
    CloseDay(CloseDayArgs),

    /// List past closings.
    History {
        #[arg(long, value_parser = parse_date_arg)]
        from: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        to: NaiveDate,
    },

    /// Download a day's closing report (PDF).
    Report {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        /// Target file (defaults to cash-closing-<date>.pdf).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the store API is reachable.
    Health,

    /// Show or create the config file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Show the open session, if any.
    Status,
    /// Open the register with a starting float.
    Open(SessionArgs),
    /// Close the register with the counted amount.
    Close(SessionArgs),
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[arg(long, value_parser = parse_money_arg)]
    pub amount: Money,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct CloseDayArgs {
    /// Business day to close (defaults to today).
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Cash counted in the drawer.
    #[arg(long, value_parser = parse_money_arg)]
    pub counted: Money,

    /// Opening float; defaults to the open session's.
    #[arg(long, value_parser = parse_money_arg)]
    pub opening: Option<Money>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Show the reconciliation without submitting.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date("date", raw).map_err(|e| e.to_string())
}

/// Parses a whole-unit amount.
///
/// Accepts an optional sign, an optional `$` on either side of the sign and
/// `,`/`_` thousands separators. Anything else is rejected, as is a magnitude
/// above [`MAX_AMOUNT_UNITS`].
pub fn parse_money_arg(raw: &str) -> Result<Money, String> {
    let invalid = || format!("'{raw}' is not a whole amount");

    let mut rest = raw.trim();
    rest = rest.strip_prefix('$').map_or(rest, str::trim_start);
    let negative = match rest.strip_prefix('-') {
        Some(after) => {
            rest = after.trim_start();
            true
        }
        None => false,
    };
    if let Some(after) = rest.strip_prefix('$') {
        if raw.trim().starts_with('$') {
            return Err(invalid());
        }
        rest = after.trim_start();
    }

    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if !rest.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '_') {
        return Err(invalid());
    }

    let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
    let units = digits
        .parse::<i64>()
        .ok()
        .filter(|units| *units <= MAX_AMOUNT_UNITS)
        .ok_or_else(|| format!("'{raw}' is above the largest amount ({MAX_AMOUNT_UNITS})"))?;

    Ok(Money::from_units(if negative { -units } else { units }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_money_arg() {
        assert_eq!(parse_money_arg("215000").unwrap().units(), 215_000);
        assert_eq!(parse_money_arg("215,000").unwrap().units(), 215_000);
        assert_eq!(parse_money_arg("$215,000").unwrap().units(), 215_000);
        assert_eq!(parse_money_arg("-5,001").unwrap().units(), -5_001);
        assert!(parse_money_arg("12.50").is_err());
        assert!(parse_money_arg("abc").is_err());
        assert!(parse_money_arg("").is_err());
    }

    #[test]
    fn test_parse_money_arg_keeps_sign_after_symbol() {
        assert_eq!(parse_money_arg("$-5,000").unwrap().units(), -5_000);
        assert_eq!(parse_money_arg("-$5,000").unwrap().units(), -5_000);
        assert_eq!(parse_money_arg(" $ 1_000 ").unwrap().units(), 1_000);
    }

    #[test]
    fn test_parse_money_arg_rejects_stray_characters() {
        for raw in ["abc123", "€100", "$$100", "$-$100", "--5", "-", "$", "1,000abc", ",100"] {
            assert!(parse_money_arg(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_parse_money_arg_upper_bound() {
        let max = MAX_AMOUNT_UNITS.to_string();
        assert_eq!(parse_money_arg(&max).unwrap().units(), MAX_AMOUNT_UNITS);
        assert_eq!(parse_money_arg(&format!("-{max}")).unwrap().units(), -MAX_AMOUNT_UNITS);
        assert!(parse_money_arg("9007199254740993").is_err());
        assert!(parse_money_arg("9223372036854775807").is_err());
        assert!(parse_money_arg("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_close_day() {
        let cli = Cli::try_parse_from([
            "essence",
            "close-day",
            "--date",
            "2024-03-01",
            "--counted",
            "215000",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Command::CloseDay(args) => {
                assert_eq!(args.counted.units(), 215_000);
                assert!(args.dry_run);
                assert!(args.opening.is_none());
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 1));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["essence", "summary", "--date", "03/01/2024"]).is_err());
    }
}
