//! Conversions between wire DTOs and domain expenses.

use api_types::expense::{ExpenseNew, ExpenseUpdate, ExpenseView, SplitDetails, SplitType};
use engine::{Category, Expense, Payer, SplitRule};

pub(crate) fn expense_from_view(view: ExpenseView) -> Expense {
    Expense {
        id: view.id,
        trip_id: view.trip_id,
        payer: Payer::from(view.payer_id),
        amount: view.amount,
        currency: view.currency,
        exchange_rate: view.exchange_rate,
        base_amount: view.base_amount,
        split: split_from_details(view.split_details),
        category: Category::from(view.category),
        note: view.note,
        occurred_at: view.occurred_at,
        is_settlement: view.is_settlement,
    }
}

pub(crate) fn new_from_expense(expense: &Expense) -> ExpenseNew {
    ExpenseNew {
        trip_id: expense.trip_id.clone(),
        payer_id: expense.payer.as_str().to_string(),
        amount: expense.amount,
        currency: expense.currency.clone(),
        exchange_rate: expense.exchange_rate,
        base_amount: expense.base_amount,
        split_details: details_from_split(&expense.split),
        category: expense.category.as_str().to_string(),
        note: expense.note.clone(),
        occurred_at: expense.occurred_at,
        is_settlement: expense.is_settlement,
    }
}

pub(crate) fn update_from_expense(expense: &Expense) -> ExpenseUpdate {
    ExpenseUpdate {
        payer_id: expense.payer.as_str().to_string(),
        amount: expense.amount,
        currency: expense.currency.clone(),
        exchange_rate: expense.exchange_rate,
        base_amount: expense.base_amount,
        split_details: details_from_split(&expense.split),
        category: expense.category.as_str().to_string(),
        note: expense.note.clone(),
        occurred_at: expense.occurred_at,
        is_settlement: expense.is_settlement,
    }
}

fn split_from_details(details: SplitDetails) -> SplitRule {
    match details.split_type {
        SplitType::Equal => SplitRule::Equal {
            involved_user_ids: details.involved_user_ids,
        },
        SplitType::Exact => SplitRule::Exact {
            involved_user_ids: details.involved_user_ids,
            amounts: details.amounts.unwrap_or_default(),
        },
    }
}

fn details_from_split(split: &SplitRule) -> SplitDetails {
    match split {
        SplitRule::Equal { involved_user_ids } => SplitDetails {
            split_type: SplitType::Equal,
            involved_user_ids: involved_user_ids.clone(),
            amounts: None,
        },
        SplitRule::Exact {
            involved_user_ids,
            amounts,
        } => SplitDetails {
            split_type: SplitType::Exact,
            involved_user_ids: involved_user_ids.clone(),
            amounts: Some(amounts.clone()),
        },
    }
}
