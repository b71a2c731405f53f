use super::*;

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct Calculate {
    /// Starts from a blank form when absent
    #[serde(default)]
    pub(super) state: Option<PayrollState>,
    #[serde(default)]
    pub(super) actions: Vec<Action>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PayrollView {
    #[serde(flatten)]
    pub(super) state: PayrollState,
    pub(super) annual_ctc: Decimal,
}

impl From<PayrollState> for PayrollView {
    fn from(state: PayrollState) -> Self {
        Self {
            annual_ctc: state.annual_ctc(),
            state,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct Payslip {
    pub(super) payment: payment_records::Model,
    pub(super) payroll: PayrollView,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct SavedPayslip {
    pub(super) payment: payment_records::Model,
    pub(super) payroll: PayrollView,
    pub(super) appraised: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct UpdateStatus {
    pub(super) status: PaymentStatus,
}
