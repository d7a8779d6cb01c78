//! Expense primitives.
//!
//! An [`Expense`] is the immutable record the debt engine aggregates: who
//! paid, how much, and how the cost is divided among the trip participants.
//! All debt arithmetic runs on `base_amount`, the amount pre-converted into
//! the trip's base currency.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Category, EngineError, ResultEngine, split};

/// Wire identifier of the shared trip pot.
///
/// Expenses paid out of the central fund create no personal debt.
pub const CENTRAL_FUND_ID: &str = "central_fund";

/// Who paid for an expense.
///
/// Serialized as a plain participant id string; the central fund uses the
/// [`CENTRAL_FUND_ID`] sentinel on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Payer {
    CentralFund,
    Participant(String),
}

impl Payer {
    /// Returns the participant id, or `None` for the central fund.
    #[must_use]
    pub fn participant_id(&self) -> Option<&str> {
        match self {
            Payer::CentralFund => None,
            Payer::Participant(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is_central_fund(&self) -> bool {
        matches!(self, Payer::CentralFund)
    }

    /// Wire representation of the payer.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Payer::CentralFund => CENTRAL_FUND_ID,
            Payer::Participant(id) => id,
        }
    }
}

impl From<String> for Payer {
    fn from(value: String) -> Self {
        if value == CENTRAL_FUND_ID {
            Payer::CentralFund
        } else {
            Payer::Participant(value)
        }
    }
}

impl From<Payer> for String {
    fn from(value: Payer) -> Self {
        match value {
            Payer::CentralFund => CENTRAL_FUND_ID.to_string(),
            Payer::Participant(id) => id,
        }
    }
}

/// How an expense is divided among its participants.
///
/// `Exact` shares are expressed in the expense's **original** currency and
/// convert to base currency with the expense's own stored `exchange_rate`,
/// never a later one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SplitRule {
    Equal {
        involved_user_ids: Vec<String>,
    },
    Exact {
        involved_user_ids: Vec<String>,
        amounts: HashMap<String, f64>,
    },
}

impl SplitRule {
    /// Participants the expense is divided among.
    #[must_use]
    pub fn involved_user_ids(&self) -> &[String] {
        match self {
            SplitRule::Equal { involved_user_ids } => involved_user_ids,
            SplitRule::Exact {
                involved_user_ids, ..
            } => involved_user_ids,
        }
    }

    #[must_use]
    pub fn involves(&self, user_id: &str) -> bool {
        self.involved_user_ids().iter().any(|id| id == user_id)
    }

    /// Base-currency share of one participant.
    ///
    /// Equal splits divide `base_amount` by the participant count; exact
    /// splits convert the participant's original-currency share with the
    /// expense's stored rate. A participant missing from an exact split's
    /// amount map has a zero share.
    #[must_use]
    pub fn base_share(&self, user_id: &str, base_amount: f64, exchange_rate: f64) -> f64 {
        match self {
            SplitRule::Equal { involved_user_ids } => {
                base_amount / involved_user_ids.len() as f64
            }
            SplitRule::Exact { amounts, .. } => {
                amounts.get(user_id).copied().unwrap_or_default() * exchange_rate
            }
        }
    }
}

/// One recorded trip expense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub trip_id: String,
    pub payer: Payer,
    /// Amount in the original transaction currency.
    pub amount: f64,
    /// ISO-style code of the original transaction currency.
    pub currency: String,
    /// Multiplier from `currency` into the trip's base currency.
    pub exchange_rate: f64,
    /// `amount` pre-converted into the trip's base currency.
    pub base_amount: f64,
    pub split: SplitRule,
    pub category: Category,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
    /// Marks a debt-clearing transaction. It participates in the math like
    /// any other expense; the flag only drives presentation.
    pub is_settlement: bool,
}

impl Expense {
    /// Validates the record the way the expense form does before submission.
    ///
    /// The debt engine assumes these invariants and does not re-check them.
    pub fn validate(&self) -> ResultEngine<()> {
        if self.amount <= 0.0 {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        if self.split.involved_user_ids().is_empty() {
            return Err(EngineError::InvalidSplit(
                "at least one participant is required".to_string(),
            ));
        }
        if let SplitRule::Exact { amounts, .. } = &self.split {
            let check =
                split::validate_exact_split(self.amount, amounts, split::EXACT_SPLIT_TOLERANCE);
            if !check.is_valid {
                return Err(EngineError::InvalidSplit(format!(
                    "exact shares sum to {}, expected {}",
                    check.total_assigned, check.expected_total
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;

    use super::*;

    fn expense(payer: Payer, split: SplitRule) -> Expense {
        Expense {
            id: "e1".to_string(),
            trip_id: "t1".to_string(),
            payer,
            amount: 100.0,
            currency: "THB".to_string(),
            exchange_rate: 1.0,
            base_amount: 100.0,
            split,
            category: Category::Food,
            note: None,
            occurred_at: Utc::now(),
            is_settlement: false,
        }
    }

    #[test]
    fn payer_round_trips_through_wire_sentinel() {
        let fund: Payer = CENTRAL_FUND_ID.to_string().into();
        assert_eq!(fund, Payer::CentralFund);
        assert_eq!(String::from(fund), CENTRAL_FUND_ID);

        let user: Payer = "u1".to_string().into();
        assert_eq!(user.participant_id(), Some("u1"));
    }

    #[test]
    fn split_serde_uses_type_tag() {
        let split = SplitRule::Equal {
            involved_user_ids: vec!["u1".to_string(), "u2".to_string()],
        };
        let json = serde_json::to_value(&split).unwrap();
        assert_eq!(json["type"], "equal");

        let exact: SplitRule = serde_json::from_str(
            r#"{"type":"exact","involved_user_ids":["u1"],"amounts":{"u1":100.0}}"#,
        )
        .unwrap();
        assert!(exact.involves("u1"));
    }

    #[test]
    fn exact_share_uses_stored_rate() {
        let split = SplitRule::Exact {
            involved_user_ids: vec!["u1".to_string()],
            amounts: HashMap::from([("u1".to_string(), 40.0)]),
        };
        assert_eq!(split.base_share("u1", 100.0, 2.5), 100.0);
        assert_eq!(split.base_share("missing", 100.0, 2.5), 0.0);
    }

    #[test]
    fn validate_rejects_bad_records() {
        let empty = expense(
            Payer::Participant("u1".to_string()),
            SplitRule::Equal {
                involved_user_ids: vec![],
            },
        );
        assert!(matches!(
            empty.validate(),
            Err(EngineError::InvalidSplit(_))
        ));

        let short = expense(
            Payer::Participant("u1".to_string()),
            SplitRule::Exact {
                involved_user_ids: vec!["u1".to_string(), "u2".to_string()],
                amounts: HashMap::from([
                    ("u1".to_string(), 40.0),
                    ("u2".to_string(), 40.0),
                ]),
            },
        );
        assert!(matches!(
            short.validate(),
            Err(EngineError::InvalidSplit(_))
        ));
    }
}
