//! Pairwise debt aggregation between trip participants.
//!
//! [`calculate_debts`] folds a list of expenses into net balances seen from
//! one participant's viewpoint. It is recomputed from scratch on every input
//! change; callers that want caching layer it on top (see the `client`
//! crate).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Expense;

/// Net balances inside this band (in base currency units) count as settled
/// and are dropped from the breakdown lists.
///
/// This absorbs floating-point drift from repeated share division; it is not
/// a business rule.
pub const SETTLED_THRESHOLD: f64 = 1.0;

/// Net position against a single counterparty, with the expenses that
/// produced it kept for drill-down display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DebtBreakdown {
    pub counterparty_id: String,
    /// Absolute amount in base currency; direction is carried by which
    /// [`DebtSummary`] list the entry sits in.
    pub amount: f64,
    pub transactions: Vec<Expense>,
}

/// Debt position of one participant against everyone else on the trip.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub who_owes_me: Vec<DebtBreakdown>,
    pub i_owe_who: Vec<DebtBreakdown>,
    /// Sum of the raw balances, taken before threshold filtering so it
    /// reflects the true net position even when single entries round to
    /// near-zero.
    pub net_balance: f64,
    pub total_receivable: f64,
    pub total_payable: f64,
}

/// Derives the debt summary for `viewpoint_user_id` from raw expenses.
///
/// Pure and deterministic: no I/O, no errors on well-formed input. An
/// expense with an empty participant list is a precondition violation and
/// yields meaningless output rather than a handled error.
#[must_use]
pub fn calculate_debts(expenses: &[Expense], viewpoint_user_id: &str) -> DebtSummary {
    // Positive balance: the counterparty owes the viewpoint user.
    let mut balances: HashMap<&str, f64> = HashMap::new();
    let mut evidence: HashMap<&str, Vec<&Expense>> = HashMap::new();

    for expense in expenses {
        // Central-fund outlays have no personal creditor.
        let Some(payer_id) = expense.payer.participant_id() else {
            continue;
        };

        if payer_id == viewpoint_user_id {
            for other in expense.split.involved_user_ids() {
                if other == viewpoint_user_id {
                    continue;
                }
                let share =
                    expense
                        .split
                        .base_share(other, expense.base_amount, expense.exchange_rate);
                *balances.entry(other.as_str()).or_default() += share;
                evidence.entry(other.as_str()).or_default().push(expense);
            }
        } else if expense.split.involves(viewpoint_user_id) {
            let share = expense.split.base_share(
                viewpoint_user_id,
                expense.base_amount,
                expense.exchange_rate,
            );
            *balances.entry(payer_id).or_default() -= share;
            evidence.entry(payer_id).or_default().push(expense);
        }
        // Neither payer nor involved: the expense is invisible from this
        // viewpoint.
    }

    let net_balance = balances.values().sum();

    let mut who_owes_me = Vec::new();
    let mut i_owe_who = Vec::new();
    for (counterparty, balance) in &balances {
        if balance.abs() <= SETTLED_THRESHOLD {
            continue;
        }
        let transactions = evidence
            .get(counterparty)
            .map(|txs| txs.iter().map(|tx| (*tx).clone()).collect())
            .unwrap_or_default();
        let breakdown = DebtBreakdown {
            counterparty_id: (*counterparty).to_string(),
            amount: balance.abs(),
            transactions,
        };
        if *balance > 0.0 {
            who_owes_me.push(breakdown);
        } else {
            i_owe_who.push(breakdown);
        }
    }

    // HashMap iteration order must not leak into the output.
    let by_amount_desc = |a: &DebtBreakdown, b: &DebtBreakdown| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.counterparty_id.cmp(&b.counterparty_id))
    };
    who_owes_me.sort_by(by_amount_desc);
    i_owe_who.sort_by(by_amount_desc);

    let total_receivable = who_owes_me.iter().map(|entry| entry.amount).sum();
    let total_payable = i_owe_who.iter().map(|entry| entry.amount).sum();

    DebtSummary {
        who_owes_me,
        i_owe_who,
        net_balance,
        total_receivable,
        total_payable,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::{Category, Payer, SplitRule};

    use super::*;

    fn equal_expense(id: &str, payer: &str, base_amount: f64, involved: &[&str]) -> Expense {
        Expense {
            id: id.to_string(),
            trip_id: "trip".to_string(),
            payer: Payer::Participant(payer.to_string()),
            amount: base_amount,
            currency: "THB".to_string(),
            exchange_rate: 1.0,
            base_amount,
            split: SplitRule::Equal {
                involved_user_ids: involved.iter().map(|id| (*id).to_string()).collect(),
            },
            category: Category::Food,
            note: None,
            occurred_at: Utc::now(),
            is_settlement: false,
        }
    }

    #[test]
    fn two_expenses_net_into_per_counterparty_balances() {
        let expenses = vec![
            equal_expense("e1", "u1", 3000.0, &["u1", "u2", "u3"]),
            equal_expense("e2", "u2", 900.0, &["u1", "u2", "u3"]),
        ];

        let summary = calculate_debts(&expenses, "u1");

        assert_eq!(summary.who_owes_me.len(), 2);
        assert_eq!(summary.who_owes_me[0].counterparty_id, "u3");
        assert_eq!(summary.who_owes_me[0].amount, 1000.0);
        assert_eq!(summary.who_owes_me[1].counterparty_id, "u2");
        assert_eq!(summary.who_owes_me[1].amount, 700.0);
        assert!(summary.i_owe_who.is_empty());
        assert_eq!(summary.total_receivable, 1700.0);
        assert_eq!(summary.total_payable, 0.0);
        assert_eq!(summary.net_balance, 1700.0);
    }

    #[test]
    fn netted_entry_keeps_all_contributing_transactions() {
        let expenses = vec![
            equal_expense("e1", "u1", 3000.0, &["u1", "u2", "u3"]),
            equal_expense("e2", "u2", 900.0, &["u1", "u2", "u3"]),
        ];

        let summary = calculate_debts(&expenses, "u1");
        let u2 = &summary.who_owes_me[1];
        assert_eq!(u2.transactions.len(), 2);
    }

    #[test]
    fn equal_amounts_order_by_counterparty_id() {
        let expenses = vec![equal_expense("e1", "u1", 300.0, &["u1", "u2", "u3"])];

        let summary = calculate_debts(&expenses, "u1");
        let ids: Vec<&str> = summary
            .who_owes_me
            .iter()
            .map(|entry| entry.counterparty_id.as_str())
            .collect();
        assert_eq!(ids, ["u2", "u3"]);
    }
}
