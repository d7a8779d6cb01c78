use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod trip {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ParticipantView {
        pub id: String,
        pub name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TripView {
        pub id: String,
        pub name: String,
        /// ISO-style code all debt math is normalized into.
        pub base_currency: String,
        pub participants: Vec<ParticipantView>,
        /// Units of base currency per 1 unit of the keyed currency.
        pub exchange_rates: HashMap<String, f64>,
        /// Remaining balance of the shared pot, in base currency.
        pub central_fund_balance: f64,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitType {
        Equal,
        Exact,
    }

    /// Wire shape of a split: `amounts` is only present for exact splits.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SplitDetails {
        #[serde(rename = "type")]
        pub split_type: SplitType,
        pub involved_user_ids: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amounts: Option<HashMap<String, f64>>,
    }

    /// One expense as the backend returns it.
    ///
    /// `payer_id` is a raw participant id; the shared pot uses the
    /// `central_fund` sentinel.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: String,
        pub trip_id: String,
        pub payer_id: String,
        pub amount: f64,
        pub currency: String,
        pub exchange_rate: f64,
        pub base_amount: f64,
        pub split_details: SplitDetails,
        pub category: String,
        pub note: Option<String>,
        /// RFC3339 timestamp (UTC).
        pub occurred_at: DateTime<Utc>,
        pub is_settlement: bool,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub trip_id: String,
        pub payer_id: String,
        pub amount: f64,
        pub currency: String,
        pub exchange_rate: f64,
        pub base_amount: f64,
        pub split_details: SplitDetails,
        pub category: String,
        pub note: Option<String>,
        pub occurred_at: DateTime<Utc>,
        pub is_settlement: bool,
    }

    /// Full-record replacement; the id stays in the URL.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub payer_id: String,
        pub amount: f64,
        pub currency: String,
        pub exchange_rate: f64,
        pub base_amount: f64,
        pub split_details: SplitDetails,
        pub category: String,
        pub note: Option<String>,
        pub occurred_at: DateTime<Utc>,
        pub is_settlement: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod debts {
    use super::*;

    /// One pre-aggregated counterparty entry.
    ///
    /// Evidence arrives as transaction ids; the client resolves them against
    /// its own expense cache.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BackendDebtEntry {
        pub counterparty_id: String,
        /// Absolute amount in base currency.
        pub amount: f64,
        pub transaction_ids: Vec<String>,
    }

    /// Server-computed debt summary for one viewpoint user.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BackendDebts {
        pub who_owes_me: Vec<BackendDebtEntry>,
        pub i_owe_who: Vec<BackendDebtEntry>,
        pub net_balance: f64,
        pub total_receivable: f64,
        pub total_payable: f64,
    }
}
