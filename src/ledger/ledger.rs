use std::io;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    config::Config,
    errors::{LedgerError, Result, ValidationError},
    storage::{codec, KeyValueStore},
};

use super::{
    amount::parse_amount,
    record::ExpenseRecord,
    view::{self, LedgerView},
};

pub const CLEAR_ALL_PROMPT: &str =
    "Are you sure you want to clear all expenses? This cannot be undone.";

const QUARANTINE_SUFFIX: &str = "corrupt";

/// Answers the blocking yes/no question asked before clearing the ledger.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        Ok(self(message))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Number of records removed.
    Cleared(usize),
    Declined,
}

/// Outcome details of `Ledger::load`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub dropped: usize,
    /// Stored records that had no id and were given one.
    pub assigned_ids: usize,
    /// Key the unreadable blob was moved to, if any.
    pub quarantined_as: Option<String>,
    pub warnings: Vec<String>,
}

/// Ordered expense records mirrored to a key-value store.
///
/// Every successful mutation is persisted before returning; if the write
/// fails the in-memory change is undone.
pub struct Ledger {
    records: Vec<ExpenseRecord>,
    store: Box<dyn KeyValueStore>,
    config: Config,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("records", &self.records.len())
            .field("storage_key", &self.config.storage_key)
            .finish()
    }
}

impl Ledger {
    /// Reads the stored blob under the configured key.
    ///
    /// A missing value yields an empty ledger. An unreadable one is copied to
    /// `<key>.corrupt` and the ledger starts empty; stored records that fail
    /// validation are dropped. Both cases are listed in the report.
    pub fn load(store: Box<dyn KeyValueStore>, config: Config) -> Result<(Self, LoadReport)> {
        config.validate()?;
        let key = config.storage_key.clone();
        let mut report = LoadReport::default();

        let records = match store.get(&key)? {
            None => Vec::new(),
            Some(blob) => match codec::decode(&blob) {
                Ok(decoded) => {
                    let mut kept = Vec::with_capacity(decoded.len());
                    for (index, mut record) in decoded.into_iter().enumerate() {
                        match record.check() {
                            Ok(()) => {
                                if record.id.is_nil() {
                                    record.id = Uuid::new_v4();
                                    report.assigned_ids += 1;
                                }
                                kept.push(record);
                            }
                            Err(reason) => {
                                tracing::warn!(index, %reason, "dropping invalid stored expense");
                                report.dropped += 1;
                                report.warnings.push(format!(
                                    "Stored expense #{} was dropped: {}",
                                    index + 1,
                                    reason
                                ));
                            }
                        }
                    }
                    kept
                }
                Err(err) => {
                    let quarantine = format!("{key}.{QUARANTINE_SUFFIX}");
                    store.set(&quarantine, &blob)?;
                    tracing::warn!(
                        error = %err,
                        quarantine = %quarantine,
                        "stored expenses unreadable; starting with an empty ledger"
                    );
                    report.warnings.push(format!(
                        "Stored expenses could not be read ({err}); a copy was kept under `{quarantine}`."
                    ));
                    report.quarantined_as = Some(quarantine);
                    Vec::new()
                }
            },
        };

        report.loaded = records.len();
        tracing::info!(records = report.loaded, key = %key, "ledger loaded");
        let ledger = Self {
            records,
            store,
            config,
        };

        // Write fresh ids back so they stay stable across restarts.
        if report.assigned_ids > 0 {
            if let Err(err) = ledger.persist() {
                tracing::warn!(error = %err, "could not store newly assigned ids");
                report.warnings.push(format!(
                    "Ids given to {} older expense(s) could not be saved ({err}); they last until the next change.",
                    report.assigned_ids
                ));
            }
        }
        Ok((ledger, report))
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Swaps in new display/validation settings. The storage key stays fixed
    /// for the lifetime of the ledger.
    pub fn set_config(&mut self, mut config: Config) -> Result<()> {
        config.validate()?;
        config.storage_key = self.config.storage_key.clone();
        self.config = config;
        Ok(())
    }

    /// Validates raw input and appends a record at the end.
    ///
    /// Checks run category, amount, date; the first failure is returned and
    /// the ledger is left untouched.
    pub fn append(&mut self, category: &str, amount: &str, date: &str) -> Result<Uuid> {
        let record = self.validate_entry(category, amount, date)?;
        let id = record.id;
        self.records.push(record);
        if let Err(err) = self.persist() {
            self.records.pop();
            return Err(err);
        }
        tracing::info!(%id, total = self.total(), "expense added");
        Ok(id)
    }

    pub fn remove_at(&mut self, position: usize) -> Result<ExpenseRecord> {
        if position >= self.records.len() {
            return Err(LedgerError::PositionOutOfRange {
                position,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(position);
        if let Err(err) = self.persist() {
            self.records.insert(position, removed);
            return Err(err);
        }
        tracing::info!(position, id = %removed.id, "expense removed");
        Ok(removed)
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Result<ExpenseRecord> {
        let position = self
            .position_of(id)
            .ok_or(LedgerError::RecordNotFound(id))?;
        self.remove_at(position)
    }

    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Empties the ledger once `prompt` agrees. A refusal changes nothing.
    pub fn clear_all(&mut self, prompt: &mut dyn ConfirmPrompt) -> Result<ClearOutcome> {
        if !prompt.confirm(CLEAR_ALL_PROMPT)? {
            tracing::debug!("clear-all declined");
            return Ok(ClearOutcome::Declined);
        }
        let previous = std::mem::take(&mut self.records);
        if let Err(err) = self.persist() {
            self.records = previous;
            return Err(err);
        }
        tracing::info!(removed = previous.len(), "ledger cleared");
        Ok(ClearOutcome::Cleared(previous.len()))
    }

    pub fn render(&self) -> LedgerView {
        view::render(&self.records, &self.config.currency_prefix)
    }

    /// Sum of all amounts, computed on demand.
    pub fn total(&self) -> f64 {
        self.records.iter().map(|record| record.amount).sum()
    }

    /// Overwrites the stored value with the full current sequence.
    pub fn persist(&self) -> Result<()> {
        let blob = codec::encode(&self.records)?;
        self.store.set(&self.config.storage_key, &blob)
    }

    fn validate_entry(
        &self,
        category: &str,
        amount: &str,
        date: &str,
    ) -> std::result::Result<ExpenseRecord, ValidationError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let category = self
            .config
            .resolve_category(category)
            .ok_or_else(|| ValidationError::UnknownCategory(category.to_string()))?
            .to_string();

        let amount = parse_amount(amount)?;
        if !(self.total() + amount).is_finite() {
            return Err(ValidationError::InvalidAmount);
        }

        let date = date.trim();
        if date.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        if NaiveDate::parse_from_str(date, &self.config.date_format).is_err() {
            return Err(ValidationError::InvalidDate {
                format: self.config.date_format.clone(),
            });
        }

        Ok(ExpenseRecord::new(category, amount, date))
    }
}
