//! Cross-currency conversion against a trip's rate table.
//!
//! Rates are stored as "units of base currency per 1 unit of the keyed
//! currency", so converting between two non-base currencies crosses through
//! the base: `source_rate / target_rate`. This helper produces the
//! `base_amount`/`exchange_rate` pair the debt engine consumes; the engine
//! itself never recomputes rates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{EngineError, ResultEngine};

/// Units of base currency bought by 1 unit of the keyed currency code.
pub type RateTable = HashMap<String, f64>;

/// Result of one currency conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub source_currency: String,
    pub target_currency: String,
    pub original_amount: f64,
    pub converted_amount: f64,
    pub exchange_rate: f64,
}

/// Converts `amount` from `source` into `target` using `rates`.
///
/// Same-currency conversion short-circuits to the identity rate without
/// consulting the table; a code absent from the table is an
/// [`EngineError::UnknownCurrency`].
pub fn convert(
    amount: f64,
    source: &str,
    target: &str,
    rates: &RateTable,
) -> ResultEngine<Conversion> {
    if source == target {
        return Ok(Conversion {
            source_currency: source.to_string(),
            target_currency: target.to_string(),
            original_amount: amount,
            converted_amount: amount,
            exchange_rate: 1.0,
        });
    }

    let source_rate = lookup_rate(rates, source)?;
    let target_rate = lookup_rate(rates, target)?;
    let exchange_rate = source_rate / target_rate;

    Ok(Conversion {
        source_currency: source.to_string(),
        target_currency: target.to_string(),
        original_amount: amount,
        converted_amount: amount * exchange_rate,
        exchange_rate,
    })
}

fn lookup_rate(rates: &RateTable, code: &str) -> ResultEngine<f64> {
    rates
        .get(code)
        .copied()
        .ok_or_else(|| EngineError::UnknownCurrency(code.to_string()))
}
