#![allow(dead_code)]

use std::path::Path;

use chrono::NaiveDate;
use ledger_core::{
    ledger::{BaseTransaction, Category, CategoryKind, LedgerData, Recurrence, RecurrenceKind},
    storage::{JsonFileStore, LedgerStore},
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn recurring(
    id: &str,
    start: NaiveDate,
    amount: f64,
    kind: RecurrenceKind,
    end: Option<NaiveDate>,
) -> BaseTransaction {
    let rule = match end {
        Some(end) => Recurrence::new(kind).until(end),
        None => Recurrence::new(kind),
    };
    BaseTransaction::new(start, amount, "bills")
        .with_id(id)
        .with_recurrence(rule)
}

fn category(id: &str, name: &str, color: &str) -> Category {
    Category {
        id: id.into(),
        ..Category::new(name, color, CategoryKind::Transaction)
    }
}

/// Small household ledger shared by the integration suites.
pub fn household_ledger() -> LedgerData {
    let mut data = LedgerData::new();
    data.add_category(category("groceries", "Groceries", "#4caf50"));
    data.add_category(category("bills", "Bills", "#f44336"));
    data.add_category(category("salary", "Salary", "#2196f3"));

    data.add_transaction(
        recurring(
            "phone",
            date(2024, 1, 5),
            -50.0,
            RecurrenceKind::Monthly,
            Some(date(2024, 4, 5)),
        )
        .with_description("Phone plan"),
    );
    data.add_transaction(
        BaseTransaction::new(date(2024, 3, 1), 2000.0, "salary")
            .with_id("march-salary")
            .with_description("Salary"),
    );
    data.add_transaction(
        BaseTransaction::new(date(2024, 3, 9), -120.0, "groceries")
            .with_id("big-shop")
            .with_description("Weekly shop"),
    );
    data.add_transaction(
        BaseTransaction::new(date(2024, 2, 20), -80.0, "groceries")
            .with_id("feb-shop")
            .with_description("Market"),
    );
    data
}

pub fn write_ledger(path: &Path, data: &LedgerData) {
    JsonFileStore::new(path).save(data).unwrap();
}
