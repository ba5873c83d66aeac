//! Balance computation.
//!
//! For every participant: what they paid (debit), what they owe (credit) and the
//! difference (balance). All arithmetic is exact, so the balances of a ledger always
//! sum to exactly zero.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use iou_core::{Amount, LedgerError, LedgerResult, ParticipantId};

use crate::model::{ExpenseTotals, Ledger};

/// Per-participant totals of a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Amount each participant contributed as a creditor.
    pub debit: BTreeMap<ParticipantId, Amount>,
    /// Amount each participant owes through equal splits.
    pub credit: BTreeMap<ParticipantId, Amount>,
    /// `debit - credit`. Positive: the group owes the participant.
    pub balance: BTreeMap<ParticipantId, Amount>,
    pub total_expenses: Amount,
}

impl Stats {
    pub fn debit_of(&self, participant: &str) -> Option<&Amount> {
        self.debit.get(participant)
    }

    pub fn credit_of(&self, participant: &str) -> Option<&Amount> {
        self.credit.get(participant)
    }

    pub fn balance_of(&self, participant: &str) -> Option<&Amount> {
        self.balance.get(participant)
    }

    /// Check that debits, credits and total expenses agree and balances close to zero.
    pub fn verify_conservation(&self) -> LedgerResult<()> {
        let debit: Amount = self.debit.values().sum();
        let credit: Amount = self.credit.values().sum();
        let balance: Amount = self.balance.values().sum();

        if debit != self.total_expenses {
            return Err(LedgerError::invariant(format!(
                "sum of debits {debit} differs from total expenses {}",
                self.total_expenses
            )));
        }
        if credit != self.total_expenses {
            return Err(LedgerError::invariant(format!(
                "sum of credits {credit} differs from total expenses {}",
                self.total_expenses
            )));
        }
        if !balance.is_zero() {
            return Err(LedgerError::invariant(format!(
                "balances sum to {balance} instead of zero"
            )));
        }
        Ok(())
    }
}

fn zeroed(participants: &BTreeSet<ParticipantId>) -> BTreeMap<ParticipantId, Amount> {
    participants
        .iter()
        .map(|p| (p.clone(), Amount::zero()))
        .collect()
}

/// Compute stats and per-expense totals and attach them to the ledger.
///
/// Total over any built ledger. A ledger that already carries stats is returned
/// unchanged.
pub fn compute_stats(mut ledger: Ledger) -> Ledger {
    if ledger.stats.is_some() {
        tracing::debug!("stats already attached, skipping computation");
        return ledger;
    }

    let mut debit = zeroed(&ledger.participants_all);
    let mut credit = zeroed(&ledger.participants_all);
    let mut total_expenses = Amount::zero();

    for expense in &mut ledger.expenses {
        let totsum: Amount = expense.creditors.values().sum();
        for (name, amount) in &expense.creditors {
            *debit.entry(name.clone()).or_default() += amount;
        }

        let split_debt = totsum.split(expense.debtors_split.size());
        for debtor in expense.debtors_split.iter() {
            *credit.entry(debtor.clone()).or_default() += &split_debt;
        }

        total_expenses += &totsum;
        expense.totals = Some(ExpenseTotals {
            total_expenses: totsum,
            split_debt,
        });
    }

    let balance = ledger
        .participants_all
        .iter()
        .map(|p| {
            let paid = debit.get(p).cloned().unwrap_or_default();
            let owed = credit.get(p).cloned().unwrap_or_default();
            (p.clone(), paid - owed)
        })
        .collect();

    tracing::debug!(
        participants = ledger.participants_all.len(),
        expenses = ledger.expenses.len(),
        total_expenses = %total_expenses,
        "stats computed"
    );

    ledger.stats = Some(Stats {
        debit,
        credit,
        balance,
        total_expenses,
    });
    ledger
}
