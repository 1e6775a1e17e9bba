use colored::Colorize;
use std::fmt::{self, Write};

use crate::core::services::{BalanceStatus, Summary};
use crate::ledger::{Transaction, TransactionKind};

const SUMMARY_RULE: usize = 50;
const LIST_RULE: usize = 70;
const ENTRY_RULE: usize = 50;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKind {
    Success,
    Note,
    Warning,
    Error,
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Success => "Success",
        MessageKind::Note => "Note",
        MessageKind::Warning => "Warning",
        MessageKind::Error => "Error",
    }
}

/// Prefixes a message with its label and colours it for the terminal.
pub fn styled(kind: MessageKind, message: impl fmt::Display) -> String {
    let formatted = format!("{}: {}", label(kind), message);
    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Note => formatted.bright_cyan().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
    }
}

/// Success lines go to stdout; everything else is diagnostic and goes to stderr.
pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = styled(kind, message);
    match kind {
        MessageKind::Success => println!("{}", formatted),
        _ => eprintln!("{}", formatted),
    }
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn note(message: impl fmt::Display) {
    print(MessageKind::Note, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

/// Formats an amount with two decimals, placing a minus sign before the symbol.
pub fn money(amount: f64, symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", symbol, amount.abs())
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

fn status_text(status: BalanceStatus) -> &'static str {
    match status {
        BalanceStatus::Positive => "Positive balance",
        BalanceStatus::Negative => "Negative balance",
        BalanceStatus::BreakEven => "Break-even",
    }
}

/// Renders the overview block: totals, balance, status, expenses by category.
pub fn render_summary(summary: &Summary, symbol: &str) -> String {
    if summary.transaction_count == 0 {
        return "No transactions recorded yet.\n".into();
    }

    let rule = "=".repeat(SUMMARY_RULE);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "BUDGET SUMMARY");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Total Income:    {}", money(summary.totals.income, symbol));
    let _ = writeln!(out, "Total Expenses:  {}", money(summary.totals.expense, symbol));
    let _ = writeln!(out, "Current Balance: {}", money(summary.balance, symbol));
    let _ = writeln!(out, "Status: {}", status_text(summary.status));
    let _ = writeln!(out, "{rule}");

    if !summary.categories.is_empty() {
        let _ = writeln!(out, "\nExpenses by Category:");
        for share in summary.categories.iter() {
            let _ = writeln!(
                out,
                "  {}: {} ({:.1}%)",
                share.category,
                money(share.amount, symbol),
                share.percentage
            );
        }
    }
    out
}

/// Renders every transaction with its id, timestamp, signed amount, and note.
pub fn render_transactions(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions to display.\n".into();
    }

    let rule = "=".repeat(LIST_RULE);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "ALL TRANSACTIONS");
    let _ = writeln!(out, "{rule}");
    for txn in transactions {
        let (tag, sign) = match txn.kind {
            TransactionKind::Income => ("[INCOME] ", '+'),
            TransactionKind::Expense => ("[EXPENSE]", '-'),
        };
        let _ = writeln!(out, "#{} | {}", txn.id, txn.recorded_at.format(crate::ledger::DATE_FORMAT));
        let _ = writeln!(
            out,
            "  {} {}{} - {}",
            tag,
            sign,
            money(txn.amount, symbol),
            txn.category
        );
        if !txn.description.is_empty() {
            let _ = writeln!(out, "  Note: {}", txn.description);
        }
        let _ = writeln!(out, "{}", "-".repeat(ENTRY_RULE));
    }
    out
}
