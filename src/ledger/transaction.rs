use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::time_interval::{TimeInterval, TimeUnit};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A persisted ledger entry. Positive amounts are income, everything else is expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl BaseTransaction {
    pub fn new(date: NaiveDate, amount: f64, category_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            amount,
            category_id: category_id.into(),
            description: None,
            recurrence: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

/// Cadence of a recurring transaction.
///
/// The fortnightly cadence is stored under the label `bimonthly`; it always
/// means a 14-day interval. Labels that are not recognised are kept verbatim
/// so they survive a load/save cycle, but they never generate occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
    Unknown(String),
}

impl RecurrenceKind {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "bimonthly" | "biweekly" => Self::Biweekly,
            "monthly" => Self::Monthly,
            "quarterly" => Self::Quarterly,
            "yearly" => Self::Yearly,
            _ => Self::Unknown(label.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "bimonthly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn interval(&self) -> Option<TimeInterval> {
        match self {
            Self::Daily => Some(TimeInterval::new(1, TimeUnit::Day)),
            Self::Weekly => Some(TimeInterval::new(1, TimeUnit::Week)),
            Self::Biweekly => Some(TimeInterval::new(2, TimeUnit::Week)),
            Self::Monthly => Some(TimeInterval::new(1, TimeUnit::Month)),
            Self::Quarterly => Some(TimeInterval::new(3, TimeUnit::Month)),
            Self::Yearly => Some(TimeInterval::new(1, TimeUnit::Year)),
            Self::Unknown(_) => None,
        }
    }

    /// Cadences that can land several times inside one month.
    pub fn is_sub_monthly(&self) -> bool {
        matches!(self, Self::Daily | Self::Weekly | Self::Biweekly)
    }

    pub fn label(&self) -> String {
        self.interval()
            .map(|interval| interval.label())
            .unwrap_or_else(|| format!("Unknown ({})", self.as_str()))
    }
}

impl Serialize for RecurrenceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecurrenceKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// How a base transaction repeats. `end_date` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRecurrence")]
pub struct Recurrence {
    #[serde(rename = "type")]
    pub kind: RecurrenceKind,
    pub end_date: Option<NaiveDate>,
}

impl Recurrence {
    pub fn new(kind: RecurrenceKind) -> Self {
        Self {
            kind,
            end_date: None,
        }
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn allows(&self, date: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| date <= end)
    }

    /// Still producing entries on `today`: open-ended or ending today or later.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.allows(today)
    }

    pub fn has_ended_before(&self, today: NaiveDate) -> bool {
        self.end_date.map_or(false, |end| end < today)
    }
}

/// Both shapes found in stored data: the rule object and the older bare label.
/// Anything else lands in `Malformed` so one bad rule cannot fail the whole load.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecurrence {
    Legacy(RecurrenceKind),
    Rule {
        #[serde(rename = "type")]
        kind: RecurrenceKind,
        #[serde(default, rename = "endDate", deserialize_with = "optional_day")]
        end_date: Option<NaiveDate>,
    },
    Malformed(serde_json::Value),
}

impl From<StoredRecurrence> for Recurrence {
    fn from(stored: StoredRecurrence) -> Self {
        match stored {
            StoredRecurrence::Legacy(kind) => Recurrence::new(kind),
            StoredRecurrence::Rule { kind, end_date } => Recurrence { kind, end_date },
            StoredRecurrence::Malformed(raw) => {
                // The raw rule becomes the label: it never parses as a cadence, so the
                // rule stays inert across save and reload.
                let label = raw.to_string();
                tracing::warn!(rule = %label, "unreadable recurrence kept as inert rule");
                Recurrence::new(RecurrenceKind::Unknown(label))
            }
        }
    }
}

fn optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// One row of the expanded ledger: either a stored transaction or an occurrence
/// generated from a recurring one. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub category_id: String,
    pub description: Option<String>,
    pub recurrence: Option<Recurrence>,
    /// Id of the stored transaction this entry was generated from.
    pub original_id: Option<String>,
    /// Position in the series; 0 for stored transactions.
    pub sequence: u32,
}

impl LedgerEntry {
    pub fn from_base(base: &BaseTransaction) -> Self {
        Self {
            id: base.id.clone(),
            date: base.date,
            amount: base.amount,
            category_id: base.category_id.clone(),
            description: base.description.clone(),
            recurrence: base.recurrence.clone(),
            original_id: None,
            sequence: 0,
        }
    }

    pub fn occurrence(base: &BaseTransaction, date: NaiveDate, sequence: u32) -> Self {
        Self {
            id: format!("{}-r{}", base.id, sequence),
            date,
            original_id: Some(base.id.clone()),
            sequence,
            ..Self::from_base(base)
        }
    }

    pub fn is_generated(&self) -> bool {
        self.original_id.is_some()
    }

    /// Carries a rule or was produced by one.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some() || self.is_generated()
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        !self.is_income()
    }

    /// Id of the series this entry belongs to (its own id for stored rows).
    pub fn origin_id(&self) -> &str {
        self.original_id.as_deref().unwrap_or(&self.id)
    }
}
