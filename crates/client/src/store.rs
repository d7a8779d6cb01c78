//! Trip-scoped expense cache with optimistic mutations.
//!
//! The cache is the client-side source of truth between syncs. Every
//! mutation is an explicit request/response cycle: the change is applied
//! locally first, and rolled back when the backend rejects it. The
//! `revision` counter feeds the debt memoization key, so every local change
//! invalidates cached summaries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use engine::{Category, Expense, Payer, SplitRule};

use crate::error::{AppError, Result};
use crate::http::ExpenseApi;
use crate::mapping;

#[derive(Debug, Clone)]
pub struct ExpenseStore {
    trip_id: String,
    base_currency: String,
    expenses: HashMap<String, Expense>,
    revision: u64,
}

impl ExpenseStore {
    #[must_use]
    pub fn new(trip_id: String, base_currency: String) -> Self {
        Self {
            trip_id,
            base_currency,
            expenses: HashMap::new(),
            revision: 0,
        }
    }

    #[must_use]
    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    #[must_use]
    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Monotonic cache version; bumped on every local change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    #[must_use]
    pub fn get(&self, expense_id: &str) -> Option<&Expense> {
        self.expenses.get(expense_id)
    }

    /// Cached expenses, newest first (id as tie-break so equal timestamps
    /// keep a stable order).
    #[must_use]
    pub fn snapshot(&self) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self.expenses.values().cloned().collect();
        expenses.sort_by(|a, b| {
            b.occurred_at
                .cmp(&a.occurred_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        expenses
    }

    /// Replaces the cache contents from a full server listing.
    pub fn replace_all(&mut self, expenses: impl IntoIterator<Item = Expense>) {
        self.expenses = expenses
            .into_iter()
            .map(|expense| (expense.id.clone(), expense))
            .collect();
        self.revision += 1;
    }

    fn insert(&mut self, expense: Expense) {
        self.expenses.insert(expense.id.clone(), expense);
        self.revision += 1;
    }

    fn remove(&mut self, expense_id: &str) -> Option<Expense> {
        let removed = self.expenses.remove(expense_id);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// Refetches the trip's expenses and replaces the cache.
    pub async fn sync<A: ExpenseApi>(&mut self, api: &A) -> Result<usize> {
        let views = api.expenses_list(&self.trip_id).await?;
        let count = views.len();
        self.replace_all(views.into_iter().map(mapping::expense_from_view));
        tracing::info!(trip = %self.trip_id, expenses = count, "expense cache synchronized");
        Ok(count)
    }

    /// Creates an expense optimistically.
    ///
    /// The record is visible under a temporary client id while the request
    /// is in flight; on success it is re-keyed to the backend's id, on
    /// failure it is removed and the error returned to the caller.
    pub async fn create_expense<A: ExpenseApi>(
        &mut self,
        api: &A,
        mut expense: Expense,
    ) -> Result<String> {
        expense.validate()?;
        expense.trip_id = self.trip_id.clone();

        let temp_id = Uuid::new_v4().to_string();
        expense.id = temp_id.clone();
        let payload = mapping::new_from_expense(&expense);
        self.insert(expense);

        match api.expense_create(payload).await {
            Ok(created) => {
                if let Some(mut acknowledged) = self.remove(&temp_id) {
                    acknowledged.id = created.id.clone();
                    self.insert(acknowledged);
                }
                tracing::debug!(expense = %created.id, "expense create acknowledged");
                Ok(created.id)
            }
            Err(err) => {
                self.remove(&temp_id);
                tracing::warn!(error = %err, "expense create rejected, reverting");
                Err(err.into())
            }
        }
    }

    /// Replaces an expense optimistically, restoring the previous record
    /// when the backend rejects the update.
    pub async fn update_expense<A: ExpenseApi>(
        &mut self,
        api: &A,
        expense_id: &str,
        mut updated: Expense,
    ) -> Result<()> {
        updated.validate()?;
        let previous = self
            .remove(expense_id)
            .ok_or_else(|| AppError::UnknownExpense(expense_id.to_string()))?;

        updated.id = previous.id.clone();
        updated.trip_id = previous.trip_id.clone();
        let payload = mapping::update_from_expense(&updated);
        self.insert(updated);

        match api.expense_update(expense_id, payload).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.remove(expense_id);
                self.insert(previous);
                tracing::warn!(expense = %expense_id, error = %err, "expense update rejected, reverting");
                Err(err.into())
            }
        }
    }

    /// Deletes an expense optimistically, reinserting it when the backend
    /// rejects the delete.
    pub async fn delete_expense<A: ExpenseApi>(&mut self, api: &A, expense_id: &str) -> Result<()> {
        let removed = self
            .remove(expense_id)
            .ok_or_else(|| AppError::UnknownExpense(expense_id.to_string()))?;

        match api.expense_delete(expense_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.insert(removed);
                tracing::warn!(expense = %expense_id, error = %err, "expense delete rejected, reverting");
                Err(err.into())
            }
        }
    }

    /// Records a settlement between two participants.
    ///
    /// A settlement is a synthetic expense paid by the debtor whose whole
    /// amount is assigned to the creditor via an exact split, so the next
    /// recomputation nets the displayed balance to zero. The engine treats
    /// it like any other expense.
    pub async fn record_settlement<A: ExpenseApi>(
        &mut self,
        api: &A,
        debtor_id: &str,
        creditor_id: &str,
        base_amount: f64,
        occurred_at: DateTime<Utc>,
    ) -> Result<String> {
        let expense = Expense {
            id: String::new(),
            trip_id: self.trip_id.clone(),
            payer: Payer::Participant(debtor_id.to_string()),
            amount: base_amount,
            currency: self.base_currency.clone(),
            exchange_rate: 1.0,
            base_amount,
            split: SplitRule::Exact {
                involved_user_ids: vec![creditor_id.to_string()],
                amounts: HashMap::from([(creditor_id.to_string(), base_amount)]),
            },
            category: Category::Settlement,
            note: None,
            occurred_at,
            is_settlement: true,
        };
        self.create_expense(api, expense).await
    }
}
