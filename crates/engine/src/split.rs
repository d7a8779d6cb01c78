//! Share computation helpers used by the expense form layer.
//!
//! Both helpers are total functions: the only failure mode is an
//! [`ExactSplitCheck`] with `is_valid == false`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Largest acceptable gap between an exact split's assigned shares and the
/// expense total, in the expense's original currency.
pub const EXACT_SPLIT_TOLERANCE: f64 = 0.01;

/// Result of dividing an amount evenly across participants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EqualSplit {
    pub per_person_amount: f64,
    pub involved_user_ids: Vec<String>,
    pub total_amount: f64,
}

/// Divides `total_amount` evenly across `participant_ids`.
///
/// An empty participant list yields a zero per-person amount instead of an
/// error; the form layer treats that as "nothing selected yet".
#[must_use]
pub fn equal_split(total_amount: f64, participant_ids: &[String]) -> EqualSplit {
    let per_person_amount = if participant_ids.is_empty() {
        0.0
    } else {
        total_amount / participant_ids.len() as f64
    };
    EqualSplit {
        per_person_amount,
        involved_user_ids: participant_ids.to_vec(),
        total_amount,
    }
}

/// Outcome of checking an exact split against the expense total.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExactSplitCheck {
    pub is_valid: bool,
    pub total_assigned: f64,
    pub expected_total: f64,
    /// Signed gap `total_assigned - expected_total`, for form display.
    pub discrepancy: f64,
}

/// Checks that per-participant exact shares sum to the expense total within
/// `tolerance` (canonically [`EXACT_SPLIT_TOLERANCE`]).
#[must_use]
pub fn validate_exact_split(
    total_amount: f64,
    amounts: &HashMap<String, f64>,
    tolerance: f64,
) -> ExactSplitCheck {
    let total_assigned: f64 = amounts.values().sum();
    let discrepancy = total_assigned - total_amount;
    ExactSplitCheck {
        is_valid: discrepancy.abs() <= tolerance,
        total_assigned,
        expected_total: total_amount,
        discrepancy,
    }
}
