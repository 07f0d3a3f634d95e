use chrono::NaiveDate;

use crate::{
    errors::LedgerError,
    ledger::{BaseTransaction, LedgerData, LedgerEntry},
    storage::LedgerStore,
};

/// Receives the freshly expanded ledger after every successful mutation.
pub trait LedgerObserver {
    fn ledger_changed(&mut self, entries: &[LedgerEntry]);
}

/// Facade that owns the store and current snapshot, persists each change, and
/// then tells every subscribed view to refresh.
pub struct LedgerSession<S: LedgerStore> {
    store: S,
    data: LedgerData,
    today: NaiveDate,
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl<S: LedgerStore> LedgerSession<S> {
    pub fn open(store: S, today: NaiveDate) -> Result<Self, LedgerError> {
        let data = store.load()?;
        Ok(Self {
            store,
            data,
            today,
            observers: Vec::new(),
        })
    }

    pub fn data(&self) -> &LedgerData {
        &self.data
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    /// Stored transactions plus generated occurrences for the current day.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.data.expand(self.today)
    }

    /// Re-reads the store, dropping any unsaved state.
    pub fn reload(&mut self) -> Result<(), LedgerError> {
        self.data = self.store.load()?;
        self.notify();
        Ok(())
    }

    pub fn add_transaction(&mut self, transaction: BaseTransaction) -> Result<String, LedgerError> {
        if self.data.transaction(&transaction.id).is_some() {
            return Err(LedgerError::InvalidInput(format!(
                "transaction `{}` already exists",
                transaction.id
            )));
        }
        let id = self.data.add_transaction(transaction);
        self.commit()?;
        tracing::info!(transaction = %id, "transaction added");
        Ok(id)
    }

    pub fn update_transaction(&mut self, transaction: BaseTransaction) -> Result<(), LedgerError> {
        let slot = self
            .data
            .transactions
            .iter_mut()
            .find(|existing| existing.id == transaction.id)
            .ok_or_else(|| LedgerError::NotFound(format!("transaction `{}`", transaction.id)))?;
        *slot = transaction;
        self.commit()
    }

    pub fn remove_transaction(&mut self, id: &str) -> Result<BaseTransaction, LedgerError> {
        let index = self
            .data
            .transactions
            .iter()
            .position(|existing| existing.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("transaction `{id}`")))?;
        let removed = self.data.transactions.remove(index);
        self.commit()?;
        tracing::info!(transaction = %id, "transaction removed");
        Ok(removed)
    }

    fn commit(&mut self) -> Result<(), LedgerError> {
        self.store.save(&self.data)?;
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let entries = self.entries();
        for observer in &mut self.observers {
            observer.ledger_changed(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Recurrence, RecurrenceKind};
    use crate::storage::MemoryStore;
    use std::sync::{Arc, Mutex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Recorder(Arc<Mutex<Vec<usize>>>);

    impl LedgerObserver for Recorder {
        fn ledger_changed(&mut self, entries: &[LedgerEntry]) {
            self.0.lock().unwrap().push(entries.len());
        }
    }

    #[test]
    fn mutations_save_then_notify_observers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut session = LedgerSession::open(MemoryStore::default(), date(2024, 1, 1)).unwrap();
        session.subscribe(Box::new(Recorder(seen.clone())));

        let rent = BaseTransaction::new(date(2024, 1, 1), -900.0, "rent")
            .with_id("rent")
            .with_recurrence(Recurrence::new(RecurrenceKind::Monthly).until(date(2024, 3, 1)));
        session.add_transaction(rent.clone()).unwrap();
        let shortened =
            rent.with_recurrence(Recurrence::new(RecurrenceKind::Monthly).until(date(2024, 2, 1)));
        session.update_transaction(shortened).unwrap();
        session.remove_transaction("rent").unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![3, 2, 0]);
        assert_eq!(session.store().save_count(), 3);
        assert!(session.store().load().unwrap().transactions.is_empty());
    }

    #[test]
    fn duplicate_and_missing_ids_are_rejected() {
        let mut session = LedgerSession::open(MemoryStore::default(), date(2024, 1, 1)).unwrap();
        let txn = BaseTransaction::new(date(2024, 1, 1), 10.0, "gift").with_id("gift");
        session.add_transaction(txn.clone()).unwrap();

        assert!(matches!(
            session.add_transaction(txn),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            session.remove_transaction("nope"),
            Err(LedgerError::NotFound(_))
        ));
        assert_eq!(session.store().save_count(), 1);
    }
}
