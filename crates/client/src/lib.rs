//! Query-caching layer between the travel UI and the trip backend.
//!
//! The `engine` crate does the debt math; this crate owns everything around
//! it: the REST client, the trip-scoped expense cache with optimistic
//! mutations, memoized debt summaries, and the application state the
//! composition root threads through the UI.

pub use debts::{DebtMemo, hydrate_backend_debts};
pub use error::{AppError, Result};
pub use http::{Client, ClientError, ExpenseApi};
pub use state::{AppState, Session, Theme};
pub use store::ExpenseStore;

mod debts;
mod error;
mod http;
mod mapping;
mod state;
mod store;
