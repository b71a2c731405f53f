//! Storage rows <-> engine state.
//!
//! Storage keeps a few historical names: `conveyance_allowance` holds LTA,
//! `total_earnings` holds the reconciled CTC, `payslipEnabled` is the
//! statutory benefit flag and `is_ctc_mode` is the calculation mode. None of
//! them leak past this module.

use sea_orm::{prelude::DateTimeWithTimeZone, sea_query::OnConflict, ActiveValue::Set};

use super::*;

pub(super) fn mode_from_ctc_flag(is_ctc_mode: bool) -> CalculationMode {
    if is_ctc_mode {
        CalculationMode::Auto
    } else {
        CalculationMode::Manual
    }
}

pub(super) fn ctc_flag_from_mode(mode: CalculationMode) -> bool {
    mode == CalculationMode::Auto
}

pub(super) fn earnings_model(payment_id: Uuid, state: &PayrollState, now: DateTimeWithTimeZone) -> payment_earnings::ActiveModel {
    payment_earnings::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        payment_id: Set(payment_id),
        ctc: Set(state.annual_ctc()),
        basic_percentage: Set(state.basic_percentage),
        basic_salary: Set(state.components.basic),
        house_rent_allowance: Set(state.components.hra),
        conveyance_allowance: Set(state.components.lta),
        fixed_allowance: Set(state.components.fixed_allowance),
        is_ctc_mode: Set(ctc_flag_from_mode(state.mode)),
        total_earnings: Set(state.totals.reconciled_ctc),
        gross_earnings: Set(state.totals.gross_earnings),
        payslip_enabled: Set(state.statutory_benefit),
        gratuity_enabled: Set(state.gratuity.enabled),
        gratuity_percentage: Set(state.gratuity.percentage),
        gratuity_amount: Set(state.gratuity.amount),
    }
}

/// One earnings row per payment, everything but identity is overwritten
pub(super) fn earnings_on_conflict() -> OnConflict {
    use payment_earnings::Column;

    OnConflict::column(Column::PaymentId)
        .update_columns([
            Column::UpdatedAt,
            Column::Ctc,
            Column::BasicPercentage,
            Column::BasicSalary,
            Column::HouseRentAllowance,
            Column::ConveyanceAllowance,
            Column::FixedAllowance,
            Column::IsCtcMode,
            Column::TotalEarnings,
            Column::GrossEarnings,
            Column::PayslipEnabled,
            Column::GratuityEnabled,
            Column::GratuityPercentage,
            Column::GratuityAmount,
        ])
        .to_owned()
}

pub(super) fn deductions_model(payment_id: Uuid, state: &PayrollState, now: DateTimeWithTimeZone) -> payment_deductions::ActiveModel {
    payment_deductions::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        payment_id: Set(payment_id),
        provident_fund: Set(state.deductions.provident_fund),
        professional_tax: Set(state.deductions.professional_tax),
        income_tax: Set(state.deductions.income_tax),
        loan_deduction: Set(state.deductions.loan_deduction),
        total_deductions: Set(state.totals.total_deductions),
        paid_days: Set(i16::from(state.paid_days)),
        lop_days: Set(i16::from(state.lop_days)),
    }
}

pub(super) fn deductions_on_conflict() -> OnConflict {
    use payment_deductions::Column;

    OnConflict::column(Column::PaymentId)
        .update_columns([
            Column::UpdatedAt,
            Column::ProvidentFund,
            Column::ProfessionalTax,
            Column::IncomeTax,
            Column::LoanDeduction,
            Column::TotalDeductions,
            Column::PaidDays,
            Column::LopDays,
        ])
        .to_owned()
}

pub(super) fn custom_earning_models(payment_id: Uuid, items: &LineItems, now: DateTimeWithTimeZone) -> Vec<payment_custom_earnings::ActiveModel> {
    items.items().iter().map(|item|
        payment_custom_earnings::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            payment_id: Set(payment_id),
            name: Set(item.name.clone()),
            amount: Set(item.amount.max(Decimal::ZERO)),
        }
    ).collect()
}

pub(super) fn custom_deduction_models(payment_id: Uuid, items: &LineItems, now: DateTimeWithTimeZone) -> Vec<payment_custom_deductions::ActiveModel> {
    items.items().iter().map(|item|
        payment_custom_deductions::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            payment_id: Set(payment_id),
            name: Set(item.name.clone()),
            amount: Set(item.amount.max(Decimal::ZERO)),
        }
    ).collect()
}

pub(super) fn appraisal_model(payment: &payment_records::Model, new_payment_amount: Decimal, now: DateTimeWithTimeZone) -> appraisal_records::ActiveModel {
    appraisal_records::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        payment_id: Set(payment.id),
        employee_id: Set(payment.employee_id),
        organization_id: Set(payment.organization_id),
        previous_payment_amount: Set(payment.payment_amount),
        new_payment_amount: Set(new_payment_amount),
        effective_date: Set(payment.payment_date),
    }
}

/// Missing rows fall back to a fresh form, totals are recomputed from what was stored
pub(super) fn state_from_rows(
    earnings: Option<payment_earnings::Model>,
    deductions: Option<payment_deductions::Model>,
    custom_earnings: Vec<payment_custom_earnings::Model>,
    custom_deductions: Vec<payment_custom_deductions::Model>,
) -> PayrollState {
    let state = PayrollState {
        custom_earnings: custom_earnings
            .into_iter()
            .map(|row| LineItem { name: row.name, amount: row.amount })
            .collect(),
        custom_deductions: custom_deductions
            .into_iter()
            .map(|row| LineItem { name: row.name, amount: row.amount })
            .collect(),
        ..Default::default()
    };

    let state = match earnings {
        Some(row) => PayrollState {
            mode: mode_from_ctc_flag(row.is_ctc_mode),
            ctc: row.ctc,
            basic_percentage: row.basic_percentage,
            statutory_benefit: row.payslip_enabled,
            components: SalaryComponents {
                basic: row.basic_salary,
                hra: row.house_rent_allowance,
                lta: row.conveyance_allowance,
                fixed_allowance: row.fixed_allowance,
            },
            gratuity: Gratuity {
                enabled: row.gratuity_enabled,
                percentage: row.gratuity_percentage,
                amount: row.gratuity_amount,
            },
            ..state
        },
        None => state,
    };

    let state = match deductions {
        Some(row) => PayrollState {
            deductions: FixedDeductions {
                provident_fund: row.provident_fund,
                professional_tax: row.professional_tax,
                income_tax: row.income_tax,
                loan_deduction: row.loan_deduction,
            },
            paid_days: u8::try_from(row.paid_days.clamp(0, i16::from(MAX_PAY_DAYS))).unwrap_or_default(),
            lop_days: u8::try_from(row.lop_days.clamp(0, i16::from(MAX_PAY_DAYS))).unwrap_or_default(),
            ..state
        },
        None => state,
    };

    state.reconciled()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::engine::Action;

    use super::*;

    #[test]
    fn test_ctc_flag() {
        assert_eq!(mode_from_ctc_flag(true), CalculationMode::Auto);
        assert_eq!(mode_from_ctc_flag(false), CalculationMode::Manual);
        assert!(ctc_flag_from_mode(CalculationMode::Auto));
        assert!(!ctc_flag_from_mode(CalculationMode::Manual));
    }

    #[test]
    fn test_earnings_model_names() {
        let state = PayrollState::default().apply_all([
            Action::SetCtc { value: json!(1200000) },
            Action::SetGratuityEnabled { enabled: true },
            Action::SetStatutoryBenefit { enabled: true },
        ]);

        let model = earnings_model(Uuid::new_v4(), &state, Local::now().fixed_offset());

        assert_eq!(model.conveyance_allowance, Set(dec!(4000.00)));
        assert_eq!(model.total_earnings, Set(dec!(80124.00)));
        assert_eq!(model.gross_earnings, Set(dec!(78200.00)));
        assert_eq!(model.ctc, Set(dec!(1200000)));
        assert_eq!(model.payslip_enabled, Set(true));
        assert_eq!(model.is_ctc_mode, Set(true));
    }

    #[test]
    fn test_state_from_missing_rows() {
        let state = state_from_rows(None, None, Vec::new(), Vec::new());

        assert_eq!(state, PayrollState::default());
    }
}
