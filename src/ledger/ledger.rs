use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    category::Category,
    recurring::expand_transactions,
    transaction::{BaseTransaction, LedgerEntry},
};

/// Everything the ledger store persists. Goals and savings allocations are
/// owned by other screens and carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<BaseTransaction>,
    #[serde(default)]
    pub goals: Map<String, Value>,
    #[serde(default)]
    pub savings_allocations: Map<String, Value>,
}

impl LedgerData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&mut self, category: Category) -> String {
        let id = category.id.clone();
        self.categories.push(category);
        id
    }

    pub fn add_transaction(&mut self, transaction: BaseTransaction) -> String {
        let id = transaction.id.clone();
        self.transactions.push(transaction);
        id
    }

    pub fn transaction(&self, id: &str) -> Option<&BaseTransaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Category for `id`, or a placeholder when it has been deleted.
    pub fn category_or_placeholder(&self, id: &str) -> Category {
        self.category(id)
            .cloned()
            .unwrap_or_else(|| Category::placeholder(id))
    }

    /// Stored transactions plus every generated occurrence, recomputed on each call.
    pub fn expand(&self, today: NaiveDate) -> Vec<LedgerEntry> {
        expand_transactions(&self.transactions, today)
    }
}
