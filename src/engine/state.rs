use serde_json::Value;
use tracing::debug;

use crate::utils::{clamp_amount, clamp_days, clamp_percentage, coerce_amount, coerce_days, coerce_percentage};

use super::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Components are derived from CTC
    #[default]
    Auto,
    /// Components are typed in, CTC is derived from them
    Manual,
}

/// Everything on the payroll form.
///
/// Never mutated in place: each reducer returns a new state and [`PayrollState::apply`]
/// reconciles it, so `totals` always matches the inputs it sits next to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollState {
    pub mode: CalculationMode,
    /// Annual CTC as last entered, drives the components in auto mode
    pub ctc: Decimal,
    pub basic_percentage: Decimal,
    /// `payslipEnabled` in storage
    pub statutory_benefit: bool,
    pub components: SalaryComponents,
    pub gratuity: Gratuity,
    pub custom_earnings: LineItems,
    pub custom_deductions: LineItems,
    pub deductions: FixedDeductions,
    /// Informational only, net pay is never pro-rated by days
    pub paid_days: u8,
    pub lop_days: u8,
    pub totals: Totals,
}

impl Default for PayrollState {
    fn default() -> Self {
        Self {
            mode: CalculationMode::Auto,
            ctc: Decimal::ZERO,
            basic_percentage: DEFAULT_BASIC_PERCENTAGE,
            statutory_benefit: false,
            components: SalaryComponents::default(),
            gratuity: Gratuity::default(),
            custom_earnings: LineItems::default(),
            custom_deductions: LineItems::default(),
            deductions: FixedDeductions::default(),
            paid_days: 0,
            lop_days: 0,
            totals: Totals::default(),
        }
    }
}

/// One form event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SetCtc { value: Value },
    SetBasicPercentage { value: Value },
    SetStatutoryBenefit { enabled: bool },
    SetComponent { component: Component, value: Value },
    SetGratuityEnabled { enabled: bool },
    SetGratuityPercentage { value: Value },
    AddLineItem { kind: LineItemKind },
    UpdateLineItem { kind: LineItemKind, index: usize, edit: LineItemField },
    RemoveLineItem { kind: LineItemKind, index: usize },
    SetDeduction { deduction: Deduction, value: Value },
    SetPaidDays { value: Value },
    SetLopDays { value: Value },
    SwitchMode { mode: CalculationMode },
}

impl PayrollState {
    pub fn apply(self, action: Action) -> Self {
        let state = match action {
            Action::SetCtc { value } => self.with_ctc(coerce_amount(&value)),
            Action::SetBasicPercentage { value } => self.with_basic_percentage(coerce_percentage(&value)),
            Action::SetStatutoryBenefit { enabled } => self.with_statutory_benefit(enabled),
            Action::SetComponent { component, value } => self.with_component(component, coerce_amount(&value)),
            Action::SetGratuityEnabled { enabled } => self.with_gratuity_enabled(enabled),
            Action::SetGratuityPercentage { value } => self.with_gratuity_percentage(coerce_percentage(&value)),
            Action::AddLineItem { kind } => self.with_line_items(kind, LineItems::push_empty),
            Action::UpdateLineItem { kind, index, edit } => self.with_line_items(kind, |items| items.update(index, edit)),
            Action::RemoveLineItem { kind, index } => self.with_line_items(kind, |items| items.remove(index)),
            Action::SetDeduction { deduction, value } => self.with_deduction(deduction, coerce_amount(&value)),
            Action::SetPaidDays { value } => Self { paid_days: coerce_days(&value), ..self },
            Action::SetLopDays { value } => Self { lop_days: coerce_days(&value), ..self },
            Action::SwitchMode { mode } => self.with_mode(mode),
        };

        state.reconciled()
    }

    pub fn apply_all(self, actions: impl IntoIterator<Item = Action>) -> Self {
        actions.into_iter().fold(self, Self::apply)
    }

    /// Brings a state from outside (request body, storage) back in line:
    /// every number held to the range the form accepts, components re-derived
    /// when in auto mode, gratuity and totals recomputed
    pub fn normalized(self) -> Self {
        self.sanitized().rederived().reconciled()
    }

    pub fn reconciled(self) -> Self {
        let totals = reconcile(&self);

        Self { totals, ..self }
    }

    /// Annual CTC as displayed: the entered value in auto mode,
    /// back-computed from the monthly components in manual mode
    pub fn annual_ctc(&self) -> Decimal {
        match self.mode {
            CalculationMode::Auto => self.ctc,
            CalculationMode::Manual => round2(self.totals.reconciled_ctc * MONTHS_PER_YEAR),
        }
    }

    fn with_ctc(self, ctc: Decimal) -> Self {
        if self.mode == CalculationMode::Manual {
            debug!("ignoring CTC edit, CTC is derived in manual mode");
            return self;
        }

        Self { ctc, ..self }.rederived()
    }

    fn with_basic_percentage(self, basic_percentage: Decimal) -> Self {
        Self { basic_percentage, ..self }.rederived()
    }

    fn with_statutory_benefit(self, statutory_benefit: bool) -> Self {
        Self { statutory_benefit, ..self }.rederived()
    }

    fn with_component(self, component: Component, value: Decimal) -> Self {
        if self.mode == CalculationMode::Auto {
            debug!(?component, "ignoring component edit, components are derived in auto mode");
            return self;
        }

        let components = self.components.with(component, value);
        let gratuity = self.gratuity.recompute(components.basic);

        Self { components, gratuity, ..self }
    }

    fn with_gratuity_enabled(self, enabled: bool) -> Self {
        let gratuity = self.gratuity.toggle(enabled, self.components.basic);

        Self { gratuity, ..self }
    }

    fn with_gratuity_percentage(self, percentage: Decimal) -> Self {
        let gratuity = self.gratuity.with_percentage(percentage, self.components.basic);

        Self { gratuity, ..self }
    }

    fn with_line_items(self, kind: LineItemKind, edit: impl FnOnce(LineItems) -> LineItems) -> Self {
        match kind {
            LineItemKind::Earning => Self { custom_earnings: edit(self.custom_earnings), ..self },
            LineItemKind::Deduction => Self { custom_deductions: edit(self.custom_deductions), ..self },
        }
    }

    fn with_deduction(self, deduction: Deduction, value: Decimal) -> Self {
        let deductions = self.deductions.with(deduction, value);

        Self { deductions, ..self }
    }

    /// Leaving manual mode throws away manual component edits
    fn with_mode(self, mode: CalculationMode) -> Self {
        if self.mode == mode {
            return self;
        }

        Self { mode, ..self }.rederived()
    }

    /// Same bounds the form actions coerce to
    fn sanitized(self) -> Self {
        Self {
            ctc: clamp_amount(self.ctc),
            basic_percentage: clamp_percentage(self.basic_percentage),
            components: self.components.clamped(),
            gratuity: Gratuity {
                percentage: clamp_percentage(self.gratuity.percentage),
                ..self.gratuity
            },
            custom_earnings: self.custom_earnings.clamped(),
            custom_deductions: self.custom_deductions.clamped(),
            deductions: self.deductions.clamped(),
            paid_days: clamp_days(self.paid_days),
            lop_days: clamp_days(self.lop_days),
            ..self
        }
    }

    /// Re-derives components from CTC, only in auto mode where they are not authoritative
    fn rederived(self) -> Self {
        let components = match self.mode {
            CalculationMode::Auto => derive_components(self.ctc, self.basic_percentage, self.statutory_benefit),
            CalculationMode::Manual => self.components,
        };
        let gratuity = self.gratuity.recompute(components.basic);

        Self { components, gratuity, ..self }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn auto_state(ctc: Value) -> PayrollState {
        PayrollState::default().apply_all([
            Action::SetBasicPercentage { value: json!(40) },
            Action::SetCtc { value: ctc },
        ])
    }

    #[test]
    fn test_auto_mode_derivation() {
        let state = auto_state(json!(1200000));

        assert_eq!(state.components.basic, dec!(40000.00));
        assert_eq!(state.components.hra, dec!(20000.00));
        assert_eq!(state.components.lta, dec!(4000.00));
        assert_eq!(state.components.fixed_allowance, dec!(16000.00));
        assert_eq!(state.totals.gross_earnings, dec!(80000.00));
        assert_eq!(state.annual_ctc(), dec!(1200000));
    }

    #[test]
    fn test_statutory_benefit_toggle() {
        let state = auto_state(json!(1200000)).apply(Action::SetStatutoryBenefit { enabled: true });

        assert_eq!(state.components.fixed_allowance, dec!(14200.00));
        assert_eq!(state.components.basic, dec!(40000.00));
        assert_eq!(state.totals.gross_earnings, dec!(78200.00));

        let state = state.apply(Action::SetStatutoryBenefit { enabled: false });
        assert_eq!(state.components.fixed_allowance, dec!(16000.00));
    }

    #[test]
    fn test_non_numeric_ctc() {
        let state = auto_state(json!("lots"));

        assert_eq!(state.ctc, Decimal::ZERO);
        assert_eq!(state.components, SalaryComponents::default());
        assert_eq!(state.totals, Totals::default());
    }

    #[test]
    fn test_gratuity_follows_basic() {
        let state = auto_state(json!(1200000)).apply(Action::SetGratuityEnabled { enabled: true });

        assert_eq!(state.gratuity.amount, dec!(1924.00));
        assert_eq!(state.totals.reconciled_ctc, dec!(81924.00));

        let state = state.apply(Action::SetCtc { value: json!(2400000) });
        assert_eq!(state.gratuity.amount, dec!(3848.00));

        let state = state.apply(Action::SetGratuityEnabled { enabled: false });
        assert_eq!(state.gratuity.amount, Decimal::ZERO);
        assert_eq!(state.gratuity.percentage, DEFAULT_GRATUITY_PERCENTAGE);
        assert_eq!(state.totals.reconciled_ctc, state.totals.gross_earnings);
    }

    #[test]
    fn test_manual_mode_ignores_ctc_and_auto_mode_ignores_components() {
        let state = auto_state(json!(1200000));

        let edited = state.clone().apply(Action::SetComponent { component: Component::Basic, value: json!(1) });
        assert_eq!(edited, state);

        let manual = state.apply(Action::SwitchMode { mode: CalculationMode::Manual });
        let edited = manual.clone().apply(Action::SetCtc { value: json!(999) });
        assert_eq!(edited, manual);
    }

    #[test]
    fn test_manual_mode_ctc_back_computation() {
        let state = auto_state(json!(1200000))
            .apply(Action::SetGratuityEnabled { enabled: true })
            .apply(Action::SwitchMode { mode: CalculationMode::Manual });

        let before = state.totals;

        let state = state.apply(Action::SetComponent { component: Component::Basic, value: json!(50000) });

        assert_eq!(state.components.hra, dec!(20000.00));
        assert_eq!(state.components.lta, dec!(4000.00));
        assert_eq!(state.components.fixed_allowance, dec!(16000.00));
        assert_eq!(state.totals.gross_earnings, before.gross_earnings + dec!(10000));
        assert_eq!(state.totals.net_pay, before.net_pay + dec!(10000));
        assert_eq!(state.gratuity.amount, dec!(2405.00));
        assert_eq!(state.annual_ctc(), (state.totals.gross_earnings + state.gratuity.amount) * dec!(12));
        assert_eq!(state.annual_ctc(), dec!(1108860.00));
    }

    #[test]
    fn test_switching_back_to_auto_discards_manual_edits() {
        let original = auto_state(json!(1200000));

        let state = original
            .clone()
            .apply(Action::SwitchMode { mode: CalculationMode::Manual })
            .apply(Action::SetComponent { component: Component::Hra, value: json!(1) })
            .apply(Action::SwitchMode { mode: CalculationMode::Auto });

        assert_eq!(state, original);
    }

    #[test]
    fn test_statutory_benefit_in_manual_mode_keeps_components() {
        let manual = auto_state(json!(1200000)).apply(Action::SwitchMode { mode: CalculationMode::Manual });

        let state = manual.clone().apply(Action::SetStatutoryBenefit { enabled: true });

        assert!(state.statutory_benefit);
        assert_eq!(state.components, manual.components);

        let state = state.apply(Action::SwitchMode { mode: CalculationMode::Auto });
        assert_eq!(state.components.fixed_allowance, dec!(14200.00));
    }

    #[test]
    fn test_custom_items_and_deductions() {
        let state = auto_state(json!(1200000)).apply_all([
            Action::AddLineItem { kind: LineItemKind::Earning },
            Action::UpdateLineItem { kind: LineItemKind::Earning, index: 0, edit: LineItemField::Name("Bonus".to_string()) },
            Action::UpdateLineItem { kind: LineItemKind::Earning, index: 0, edit: LineItemField::Amount(json!(5000)) },
            Action::AddLineItem { kind: LineItemKind::Deduction },
            Action::UpdateLineItem { kind: LineItemKind::Deduction, index: 0, edit: LineItemField::Amount(json!("-20")) },
            Action::SetDeduction { deduction: Deduction::ProvidentFund, value: json!(1800) },
            Action::SetDeduction { deduction: Deduction::IncomeTax, value: json!("4,200") },
        ]);

        assert_eq!(state.totals.gross_earnings, dec!(85000.00));
        assert_eq!(state.totals.total_deductions, dec!(6000.00));
        assert_eq!(state.totals.net_pay, dec!(79000.00));

        let state = state.apply(Action::RemoveLineItem { kind: LineItemKind::Earning, index: 0 });
        assert_eq!(state.totals.gross_earnings, dec!(80000.00));
        assert!(state.custom_earnings.is_empty());
        assert_eq!(state.custom_deductions.len(), 1);
    }

    #[test]
    fn test_days_are_informational() {
        let state = auto_state(json!(1200000));
        let totals = state.totals;

        let state = state.apply_all([
            Action::SetPaidDays { value: json!(20) },
            Action::SetLopDays { value: json!(40) },
        ]);

        assert_eq!(state.paid_days, 20);
        assert_eq!(state.lop_days, 31);
        assert_eq!(state.totals, totals);
    }

    #[test]
    fn test_normalized_recomputes_stale_state() {
        let mut state = auto_state(json!(1200000));
        state.components.basic = dec!(1);
        state.totals = Totals::default();

        let state = state.normalized();

        assert_eq!(state.components.basic, dec!(40000.00));
        assert_eq!(state.totals.gross_earnings, dec!(80000.00));
    }

    #[test]
    fn test_normalized_clamps_out_of_range_input() {
        let state: PayrollState = serde_json::from_value(json!({
            "ctc": "1200000",
            "deductions": {
                "provident_fund": "-10000",
                "professional_tax": "200",
                "income_tax": "0",
                "loan_deduction": "0",
            },
            "gratuity": { "enabled": true, "percentage": "-50", "amount": "0" },
            "custom_earnings": [{ "name": "Refund", "amount": "-500" }],
            "paid_days": 200,
            "lop_days": 45,
        })).unwrap();

        let state = state.normalized();

        assert_eq!(state.deductions.provident_fund, Decimal::ZERO);
        assert_eq!(state.gratuity.percentage, Decimal::ZERO);
        assert_eq!(state.gratuity.amount, Decimal::ZERO);
        assert_eq!(state.custom_earnings.items()[0].amount, Decimal::ZERO);
        assert_eq!(state.paid_days, 31);
        assert_eq!(state.lop_days, 31);
        assert_eq!(state.totals.gross_earnings, dec!(80000.00));
        assert_eq!(state.totals.total_deductions, dec!(200.00));
        assert_eq!(state.totals.net_pay, dec!(79800.00));
        assert_eq!(state.totals.reconciled_ctc, dec!(80000.00));
    }

    #[test]
    fn test_normalized_clamps_manual_components() {
        let state: PayrollState = serde_json::from_value(json!({
            "mode": "manual",
            "basic_percentage": "250",
            "components": {
                "basic": "30000",
                "hra": "-15000",
                "lta": "2000",
                "fixed_allowance": "1000000000000000",
            },
            "gratuity": { "enabled": true, "percentage": "400", "amount": "0" },
        })).unwrap();

        let state = state.normalized();

        assert_eq!(state.basic_percentage, dec!(100));
        assert_eq!(state.components.hra, Decimal::ZERO);
        assert_eq!(state.components.fixed_allowance, MAX_AMOUNT);
        assert_eq!(state.gratuity.percentage, dec!(100));
        assert_eq!(state.gratuity.amount, dec!(30000.00));
    }

    #[test]
    fn test_huge_custom_earnings_do_not_overflow() {
        let huge = json!("79228162514264337593543950335");

        let state = PayrollState::default().apply_all([
            Action::AddLineItem { kind: LineItemKind::Earning },
            Action::UpdateLineItem { kind: LineItemKind::Earning, index: 0, edit: LineItemField::Amount(huge.clone()) },
            Action::AddLineItem { kind: LineItemKind::Earning },
            Action::UpdateLineItem { kind: LineItemKind::Earning, index: 1, edit: LineItemField::Amount(huge) },
            Action::SwitchMode { mode: CalculationMode::Manual },
        ]);

        assert_eq!(state.totals.gross_earnings, MAX_AMOUNT * dec!(2));
        assert_eq!(state.annual_ctc(), MAX_AMOUNT * dec!(24));
    }

    #[test]
    fn test_action_deserialization() {
        let action: Action = serde_json::from_value(json!({
            "type": "update_line_item",
            "kind": "earning",
            "index": 2,
            "edit": { "field": "amount", "value": "5000" },
        })).unwrap();

        assert_eq!(action, Action::UpdateLineItem {
            kind: LineItemKind::Earning,
            index: 2,
            edit: LineItemField::Amount(json!("5000")),
        });

        let action: Action = serde_json::from_value(json!({ "type": "switch_mode", "mode": "manual" })).unwrap();
        assert_eq!(action, Action::SwitchMode { mode: CalculationMode::Manual });
    }

    proptest! {
        #[test]
        fn test_mode_switch_round_trip(
            ctc in 0i64..100_000_000_00,
            basic_percentage in 0u32..=100,
            statutory_benefit: bool,
            gratuity: bool,
        ) {
            let state = PayrollState::default().apply_all([
                Action::SetBasicPercentage { value: json!(basic_percentage) },
                Action::SetStatutoryBenefit { enabled: statutory_benefit },
                Action::SetGratuityEnabled { enabled: gratuity },
                Action::SetCtc { value: json!(Decimal::new(ctc, 2).to_string()) },
            ]);

            let round_trip = state.clone().apply_all([
                Action::SwitchMode { mode: CalculationMode::Manual },
                Action::SwitchMode { mode: CalculationMode::Auto },
            ]);

            prop_assert_eq!(round_trip.components, state.components);
            prop_assert_eq!(round_trip, state);
        }

        #[test]
        fn test_custom_earning_add_remove_has_no_drift(
            ctc in 0i64..100_000_000_00,
            amount in 0i64..1_000_000_00,
        ) {
            let state = auto_state(json!(Decimal::new(ctc, 2).to_string()));
            let gross = state.totals.gross_earnings;

            let added = state.apply_all([
                Action::AddLineItem { kind: LineItemKind::Earning },
                Action::UpdateLineItem {
                    kind: LineItemKind::Earning,
                    index: 0,
                    edit: LineItemField::Amount(json!(Decimal::new(amount, 2).to_string())),
                },
            ]);
            prop_assert_eq!(added.totals.gross_earnings, gross + Decimal::new(amount, 2));

            let removed = added.apply(Action::RemoveLineItem { kind: LineItemKind::Earning, index: 0 });
            prop_assert_eq!(removed.totals.gross_earnings, gross);
        }
    }
}
