//! Non-interactive command front end over the ledger core.
//!
//! Parsing arguments, defaulting empty categories, and rendering text all live
//! here so the core never prompts or formats.

pub mod output;

use std::{ffi::OsString, io::IsTerminal};

use crate::{
    config::{Config, ConfigManager},
    core::{services::SummaryService, LedgerStore, LoadReport, Outcome},
    errors::{ConfigError, LedgerError},
    ledger::{Transaction, TransactionKind},
};

/// Category recorded when the caller leaves it blank.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

const USAGE: &str = "Usage: budget_tracker_cli <command>\n\
Commands:\n  \
income <amount> [category] [description...]\n  \
expense <amount> [category] [description...]\n  \
delete <id>\n  \
summary\n  \
list\n  \
config\n  \
config set <key> <value>\n  \
help";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        kind: TransactionKind,
        amount: f64,
        category: String,
        description: String,
    },
    Delete(u64),
    Summary,
    List,
    Config,
    ConfigSet {
        key: String,
        value: String,
    },
    Help,
}

impl Command {
    pub fn parse<I>(args: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(command) = args.next() else {
            return Ok(Command::Help);
        };

        match command.as_str() {
            "income" | "expense" => {
                let kind = TransactionKind::parse(&command)?;
                let raw_amount = args
                    .next()
                    .ok_or_else(|| LedgerError::InvalidInput(format!("`{command}` needs an amount")))?;
                let amount = parse_amount(&raw_amount)?;
                let category = args
                    .next()
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
                let description = args.collect::<Vec<_>>().join(" ");
                Ok(Command::Add {
                    kind,
                    amount,
                    category,
                    description,
                })
            }
            "delete" => {
                let raw = args
                    .next()
                    .ok_or_else(|| LedgerError::InvalidInput("`delete` needs a transaction id".into()))?;
                let id = raw.trim().parse::<u64>().map_err(|_| {
                    LedgerError::InvalidInput(format!("`{raw}` is not a valid transaction id"))
                })?;
                Ok(Command::Delete(id))
            }
            "summary" => Ok(Command::Summary),
            "list" => Ok(Command::List),
            "config" => match args.next().as_deref() {
                None => Ok(Command::Config),
                Some("set") => {
                    let key = args.next().ok_or_else(|| {
                        LedgerError::InvalidInput("`config set` needs a setting name".into())
                    })?;
                    let value = args.collect::<Vec<_>>().join(" ");
                    Ok(Command::ConfigSet { key, value })
                }
                Some(other) => Err(LedgerError::InvalidInput(format!(
                    "unknown config action `{other}` (expected `set`)"
                ))),
            },
            "help" | "--help" | "-h" => Ok(Command::Help),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown command `{other}` (run `budget_tracker_cli help`)"
            ))),
        }
    }
}

fn parse_amount(raw: &str) -> Result<f64, LedgerError> {
    let cleaned = raw.trim().trim_start_matches('$');
    cleaned
        .parse::<f64>()
        .map_err(|_| LedgerError::InvalidInput(format!("`{raw}` is not a valid amount")))
}

/// Converts raw process arguments, rejecting any that are not valid UTF-8.
pub fn utf8_args<I>(args: I) -> Result<Vec<String>, LedgerError>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                LedgerError::InvalidInput(format!(
                    "argument `{}` is not valid UTF-8",
                    raw.to_string_lossy()
                ))
            })
        })
        .collect()
}

/// Entry point used by the binary. Arguments exclude the program name.
pub fn run<I>(args: I) -> Result<(), LedgerError>
where
    I: IntoIterator<Item = String>,
{
    if !std::io::stdout().is_terminal() || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let command = Command::parse(args)?;
    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let manager = ConfigManager::new();
    let mut config = manager.load()?;

    if let Command::ConfigSet { key, value } = &command {
        config.set(key, value)?;
        manager.save(&config)?;
        output::success(format!("{key} updated in {}", manager.path().display()));
        return Ok(());
    }

    let data_file = config.resolve_data_file(manager.base_dir());

    if command == Command::Config {
        let mut effective = config.clone();
        effective.data_file = Some(data_file);
        println!(
            "{}",
            serde_json::to_string_pretty(&effective).map_err(ConfigError::from)?
        );
        return Ok(());
    }

    let (mut store, report) = LedgerStore::open(&data_file, config.store_options());
    report_load(&report);
    execute(&mut store, &config, command)
}

fn execute(store: &mut LedgerStore, config: &Config, command: Command) -> Result<(), LedgerError> {
    let symbol = config.currency_symbol.as_str();
    match command {
        Command::Add {
            kind,
            amount,
            category,
            description,
        } => {
            let outcome = store.add(amount, &category, kind, &description)?;
            report_persist(&outcome);
            let txn = &outcome.value;
            output::success(format!(
                "{} of {} added to {} (#{})",
                txn.kind,
                output::money(txn.amount, symbol),
                txn.category,
                txn.id
            ));
        }
        Command::Delete(id) => {
            let outcome = store.delete(id)?;
            report_persist(&outcome);
            let txn = &outcome.value;
            println!(
                "Transaction #{} deleted ({} of {})",
                txn.id,
                txn.kind,
                output::money(txn.amount, symbol)
            );
        }
        Command::Summary => {
            let summary = SummaryService::summarize(store.ledger());
            print!("{}", output::render_summary(&summary, symbol));
        }
        Command::List => {
            print!("{}", output::render_transactions(store.transactions(), symbol));
        }
        Command::Config | Command::ConfigSet { .. } | Command::Help => {}
    }
    Ok(())
}

fn report_load(report: &LoadReport) {
    if let Some(notice) = &report.notice {
        output::note(format!("Starting with empty transaction history ({notice})"));
        if let Some(preserved) = &notice.preserved_at {
            output::note(format!("Unreadable data preserved at {}", preserved.display()));
        }
    }
    for warning in &report.warnings {
        output::warning(warning);
    }
}

fn report_persist(outcome: &Outcome<Transaction>) {
    if let Some(err) = outcome.warning() {
        output::warning(format!("Could not save data - {err}"));
    }
}
