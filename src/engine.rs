//! Payroll computation engine.
//!
//! Everything in here is pure: a [`PayrollState`] goes in together with an
//! [`Action`], a new state comes out with its [`Totals`] already reconciled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{consts::*, utils::round2};

pub use components::{derive_components, Component, SalaryComponents};
pub use gratuity::{gratuity_amount, Gratuity};
pub use line_items::{LineItem, LineItemField, LineItemKind, LineItems};
pub use state::{Action, CalculationMode, PayrollState};
pub use totals::{reconcile, Deduction, FixedDeductions, Totals};

mod components;
mod gratuity;
mod line_items;
mod state;
mod totals;
