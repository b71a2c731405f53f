use crate::utils::clamp_amount;

use super::*;

/// Entered directly, never derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedDeductions {
    pub provident_fund: Decimal,
    pub professional_tax: Decimal,
    pub income_tax: Decimal,
    pub loan_deduction: Decimal,
}

impl FixedDeductions {
    pub fn sum(&self) -> Decimal {
        self.provident_fund + self.professional_tax + self.income_tax + self.loan_deduction
    }

    pub fn clamped(self) -> Self {
        Self {
            provident_fund: clamp_amount(self.provident_fund),
            professional_tax: clamp_amount(self.professional_tax),
            income_tax: clamp_amount(self.income_tax),
            loan_deduction: clamp_amount(self.loan_deduction),
        }
    }

    pub fn with(mut self, deduction: Deduction, value: Decimal) -> Self {
        let value = round2(clamp_amount(value));

        match deduction {
            Deduction::ProvidentFund => self.provident_fund = value,
            Deduction::ProfessionalTax => self.professional_tax = value,
            Deduction::IncomeTax => self.income_tax = value,
            Deduction::LoanDeduction => self.loan_deduction = value,
        }

        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deduction {
    ProvidentFund,
    ProfessionalTax,
    IncomeTax,
    LoanDeduction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub gross_earnings: Decimal,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,
    /// Monthly gross plus gratuity, what storage calls `total_earnings`
    pub reconciled_ctc: Decimal,
}

/// Gross, deductions, net pay and reconciled CTC of the current inputs.
///
/// Identical in both calculation modes, the mode only decides which inputs
/// were typed and which were derived.
pub fn reconcile(state: &PayrollState) -> Totals {
    let gross_earnings = round2(state.components.sum() + state.custom_earnings.sum());
    let total_deductions = round2(state.deductions.sum() + state.custom_deductions.sum());
    let net_pay = gross_earnings - total_deductions;
    let reconciled_ctc = gross_earnings + state.gratuity.amount;

    Totals {
        gross_earnings,
        total_deductions,
        net_pay,
        reconciled_ctc,
    }
}
