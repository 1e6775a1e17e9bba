use std::{collections::HashMap, fmt};

use serde::Serialize;

use crate::ledger::{Ledger, TransactionKind};

/// Income and expense sums for a ledger snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl From<Totals> for (f64, f64) {
    fn from(totals: Totals) -> Self {
        (totals.income, totals.expense)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Expense totals per category, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<&CategoryShare> {
        self.entries.iter().find(|entry| entry.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryShare> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_percentage(&self) -> f64 {
        self.entries.iter().map(|entry| entry.percentage).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceStatus {
    Positive,
    Negative,
    BreakEven,
}

impl BalanceStatus {
    pub fn from_balance(balance: f64) -> Self {
        if balance > 0.0 {
            BalanceStatus::Positive
        } else if balance < 0.0 {
            BalanceStatus::Negative
        } else {
            BalanceStatus::BreakEven
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BalanceStatus::Positive => "positive",
            BalanceStatus::Negative => "negative",
            BalanceStatus::BreakEven => "break-even",
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a presentation layer needs for an overview screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub transaction_count: usize,
    pub totals: Totals,
    pub balance: f64,
    pub status: BalanceStatus,
    pub categories: CategoryBreakdown,
}

/// Read-only reports over a ledger snapshot. Nothing here is cached.
pub struct SummaryService;

impl SummaryService {
    pub fn balance(ledger: &Ledger) -> f64 {
        ledger.iter().map(|txn| txn.signed_amount()).sum()
    }

    pub fn totals(ledger: &Ledger) -> Totals {
        ledger.iter().fold(Totals::default(), |mut totals, txn| {
            match txn.kind {
                TransactionKind::Income => totals.income += txn.amount,
                TransactionKind::Expense => totals.expense += txn.amount,
            }
            totals
        })
    }

    pub fn category_breakdown(ledger: &Ledger) -> CategoryBreakdown {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<CategoryShare> = Vec::new();
        for txn in ledger.iter().filter(|txn| txn.is_expense()) {
            match index.get(txn.category.as_str()) {
                Some(&slot) => entries[slot].amount += txn.amount,
                None => {
                    index.insert(txn.category.as_str(), entries.len());
                    entries.push(CategoryShare {
                        category: txn.category.clone(),
                        amount: txn.amount,
                        percentage: 0.0,
                    });
                }
            }
        }

        let expense_total: f64 = entries.iter().map(|entry| entry.amount).sum();
        if expense_total > 0.0 {
            for entry in &mut entries {
                entry.percentage = entry.amount / expense_total * 100.0;
            }
        }
        CategoryBreakdown { entries }
    }

    pub fn status_label(balance: f64) -> &'static str {
        BalanceStatus::from_balance(balance).label()
    }

    pub fn summarize(ledger: &Ledger) -> Summary {
        let balance = Self::balance(ledger);
        Summary {
            transaction_count: ledger.len(),
            totals: Self::totals(ledger),
            balance,
            status: BalanceStatus::from_balance(balance),
            categories: Self::category_breakdown(ledger),
        }
    }
}
