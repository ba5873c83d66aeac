//! Typed ledger model.
//!
//! `build` turns a loosely-typed [`RawLedger`] into a [`Ledger`], establishing every
//! structural invariant before any arithmetic runs: amounts are exact and
//! non-negative, creditors are unique per expense, and every split group is non-empty.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroUsize;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use iou_core::{Amount, ExpenseRef, LedgerError, LedgerResult, ParticipantId};

use crate::source::{RawCreditor, RawExpense, RawLedger};
use crate::stats::Stats;

/// Reporting window. Informational only; expense dates are not checked against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Non-empty set of participants sharing one expense equally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitGroup {
    members: BTreeSet<ParticipantId>,
    size: NonZeroUsize,
}

impl SplitGroup {
    /// Returns `None` for an empty set.
    pub fn new(members: BTreeSet<ParticipantId>) -> Option<Self> {
        let size = NonZeroUsize::new(members.len())?;
        Some(Self { members, size })
    }

    pub fn size(&self) -> NonZeroUsize {
        self.size
    }

    pub fn contains(&self, participant: &str) -> bool {
        self.members.contains(participant)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantId> {
        self.members.iter()
    }
}

impl Serialize for SplitGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.members)
    }
}

/// Totals derived for one expense by the stats computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTotals {
    /// Sum of all creditor contributions.
    pub total_expenses: Amount,
    /// Equal per-debtor share: `total_expenses / |debtors_split|`.
    pub split_debt: Amount,
}

/// One shared cost event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub(crate) title: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) creditors: BTreeMap<ParticipantId, Amount>,
    pub(crate) debtors_split: SplitGroup,
    #[serde(flatten)]
    pub(crate) totals: Option<ExpenseTotals>,
}

impl Expense {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn creditors(&self) -> &BTreeMap<ParticipantId, Amount> {
        &self.creditors
    }

    /// Amount `participant` paid towards this expense, if they paid anything.
    pub fn contribution(&self, participant: &str) -> Option<&Amount> {
        self.creditors.get(participant)
    }

    pub fn debtors_split(&self) -> &SplitGroup {
        &self.debtors_split
    }

    /// `None` until stats have been computed.
    pub fn total_expenses(&self) -> Option<&Amount> {
        self.totals.as_ref().map(|t| &t.total_expenses)
    }

    /// `None` until stats have been computed.
    pub fn split_debt(&self) -> Option<&Amount> {
        self.totals.as_ref().map(|t| &t.split_debt)
    }
}

/// The whole shared-expense record.
///
/// Immutable after `build`, except for the single attachment of stats (and the
/// per-expense totals) performed by [`crate::compute_stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub(crate) date: DateRange,
    pub(crate) participants: BTreeSet<ParticipantId>,
    pub(crate) participants_all: BTreeSet<ParticipantId>,
    pub(crate) expenses: Vec<Expense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) stats: Option<Stats>,
}

impl Ledger {
    pub fn date(&self) -> &DateRange {
        &self.date
    }

    /// Declared group members.
    pub fn participants(&self) -> &BTreeSet<ParticipantId> {
        &self.participants
    }

    /// Declared members plus everyone referenced by an expense (creditor or debtor).
    pub fn participants_all(&self) -> &BTreeSet<ParticipantId> {
        &self.participants_all
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// `None` until stats have been computed.
    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }
}

/// Build a typed ledger from its raw record. Stats are not computed yet.
pub fn build(raw: RawLedger) -> LedgerResult<Ledger> {
    let date = DateRange {
        from: parse_date("date.from", &raw.date.from)?,
        to: parse_date("date.to", &raw.date.to)?,
    };

    let participants: BTreeSet<ParticipantId> =
        raw.participants.into_iter().map(ParticipantId::from).collect();
    let mut participants_all = participants.clone();

    let mut expenses = Vec::with_capacity(raw.expenses.len());
    for (index, raw_expense) in raw.expenses.into_iter().enumerate() {
        let expense = build_expense(index, raw_expense, &participants)?;
        participants_all.extend(expense.creditors.keys().cloned());
        participants_all.extend(expense.debtors_split.iter().cloned());
        expenses.push(expense);
    }

    tracing::debug!(
        participants = participants.len(),
        participants_all = participants_all.len(),
        expenses = expenses.len(),
        "ledger built"
    );

    Ok(Ledger {
        date,
        participants,
        participants_all,
        expenses,
        stats: None,
    })
}

fn build_expense(
    index: usize,
    raw: RawExpense,
    participants: &BTreeSet<ParticipantId>,
) -> LedgerResult<Expense> {
    let at = ExpenseRef::new(index, raw.title.as_str());
    let date = parse_date(&format!("expenses[{index}].date"), &raw.date)?;

    let mut creditors = BTreeMap::new();
    for creditor in raw.creditors {
        let amount = parse_amount(&at, &creditor)?;
        match creditors.entry(ParticipantId::from(creditor.name)) {
            Entry::Occupied(e) => {
                return Err(LedgerError::DuplicateCreditor {
                    expense: at,
                    creditor: e.key().to_string(),
                });
            }
            Entry::Vacant(e) => {
                e.insert(amount);
            }
        }
    }

    // No explicit list: the expense is shared by the whole declared group.
    let debtors = match raw.debtors_split {
        Some(names) => names.into_iter().map(ParticipantId::from).collect(),
        None => participants.clone(),
    };
    let debtors_split = SplitGroup::new(debtors)
        .ok_or_else(|| LedgerError::EmptySplitGroup { expense: at.clone() })?;

    Ok(Expense {
        title: raw.title,
        date,
        creditors,
        debtors_split,
        totals: None,
    })
}

fn parse_amount(at: &ExpenseRef, creditor: &RawCreditor) -> LedgerResult<Amount> {
    let text = match &creditor.amount {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => {
            return Err(LedgerError::malformed_amount(
                at.clone(),
                &creditor.name,
                other.to_string(),
                "expected a number or a numeric string",
            ));
        }
    };

    let amount: Amount = text.parse().map_err(|e: iou_core::ParseAmountError| {
        LedgerError::malformed_amount(at.clone(), &creditor.name, &text, e.reason)
    })?;
    if amount.is_negative() {
        return Err(LedgerError::malformed_amount(
            at.clone(),
            &creditor.name,
            &text,
            "amount must not be negative",
        ));
    }
    Ok(amount)
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM[:SS]` (taken as UTC) and plain
/// `YYYY-MM-DD` (midnight UTC).
fn parse_date(field: &str, value: &str) -> LedgerResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| LedgerError::malformed_date(field, value))
}
