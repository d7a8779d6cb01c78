//! Debt summaries over the cached expenses.
//!
//! Two sources feed the same `DebtSummary` shape: the local engine
//! recomputation, and the server's pre-aggregated payload resolved against
//! the cache. Server-computed truth wins when it is available.

use api_types::debts::{BackendDebtEntry, BackendDebts};
use engine::{DebtBreakdown, DebtSummary, calculate_debts};

use crate::store::ExpenseStore;

/// Caches the last computed summary.
///
/// The engine is pure, so this is an optimization only: a cold call is
/// always correct, just redundant work on unrelated re-renders.
#[derive(Debug, Default)]
pub struct DebtMemo {
    entry: Option<(MemoKey, DebtSummary)>,
}

#[derive(Debug, PartialEq)]
struct MemoKey {
    revision: u64,
    viewpoint: String,
    backend: Option<BackendDebts>,
}

impl DebtMemo {
    /// Returns the debt summary for `viewpoint_user_id`, recomputing only
    /// when the cache revision, viewpoint, or backend payload changed.
    pub fn summary(
        &mut self,
        store: &ExpenseStore,
        viewpoint_user_id: &str,
        backend: Option<&BackendDebts>,
    ) -> DebtSummary {
        let key = MemoKey {
            revision: store.revision(),
            viewpoint: viewpoint_user_id.to_string(),
            backend: backend.cloned(),
        };

        if let Some((cached_key, cached)) = &self.entry
            && *cached_key == key
        {
            return cached.clone();
        }

        let summary = match backend {
            Some(payload) => hydrate_backend_debts(payload, store),
            None => calculate_debts(&store.snapshot(), viewpoint_user_id),
        };
        self.entry = Some((key, summary.clone()));
        summary
    }
}

/// Resolves a server-computed payload against the local expense cache.
///
/// Evidence ids missing from the cache are dropped silently; the aggregate
/// amounts come from the payload untouched.
#[must_use]
pub fn hydrate_backend_debts(payload: &BackendDebts, store: &ExpenseStore) -> DebtSummary {
    let resolve = |entries: &[BackendDebtEntry]| {
        entries
            .iter()
            .map(|entry| DebtBreakdown {
                counterparty_id: entry.counterparty_id.clone(),
                amount: entry.amount,
                transactions: entry
                    .transaction_ids
                    .iter()
                    .filter_map(|id| store.get(id).cloned())
                    .collect(),
            })
            .collect()
    };

    DebtSummary {
        who_owes_me: resolve(&payload.who_owes_me),
        i_owe_who: resolve(&payload.i_owe_who),
        net_balance: payload.net_balance,
        total_receivable: payload.total_receivable,
        total_payable: payload.total_payable,
    }
}
