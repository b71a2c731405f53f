use crate::utils::clamp_amount;

use super::*;

/// Monthly salary components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponents {
    pub basic: Decimal,
    pub hra: Decimal,
    pub lta: Decimal,
    pub fixed_allowance: Decimal,
}

impl SalaryComponents {
    pub fn sum(&self) -> Decimal {
        self.basic + self.hra + self.lta + self.fixed_allowance
    }

    pub fn clamped(self) -> Self {
        Self {
            basic: clamp_amount(self.basic),
            hra: clamp_amount(self.hra),
            lta: clamp_amount(self.lta),
            fixed_allowance: clamp_amount(self.fixed_allowance),
        }
    }

    pub fn get(&self, component: Component) -> Decimal {
        match component {
            Component::Basic => self.basic,
            Component::Hra => self.hra,
            Component::Lta => self.lta,
            Component::FixedAllowance => self.fixed_allowance,
        }
    }

    pub fn with(mut self, component: Component, value: Decimal) -> Self {
        let value = round2(clamp_amount(value));

        match component {
            Component::Basic => self.basic = value,
            Component::Hra => self.hra = value,
            Component::Lta => self.lta = value,
            Component::FixedAllowance => self.fixed_allowance = value,
        }

        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Basic,
    Hra,
    Lta,
    FixedAllowance,
}

/// Splits an annual CTC into monthly components.
///
/// `basic_percentage` is the share of monthly CTC paid as Basic, everything
/// else is a fixed fraction of Basic. With `statutory_benefit` the Fixed
/// Allowance gives up [`STATUTORY_BENEFIT_DEDUCTION`] but never goes negative.
pub fn derive_components(ctc: Decimal, basic_percentage: Decimal, statutory_benefit: bool) -> SalaryComponents {
    if ctc <= Decimal::ZERO {
        return SalaryComponents::default();
    }

    let basic_percentage = basic_percentage.clamp(Decimal::ZERO, MAX_PERCENTAGE);

    let monthly = ctc / MONTHS_PER_YEAR;
    let basic = round2(monthly * (basic_percentage / MAX_PERCENTAGE));

    let hra = round2(basic * HRA_RATE);
    let lta = round2(basic * LTA_RATE);

    let mut fixed_allowance = round2(basic * FIXED_ALLOWANCE_RATE);
    if statutory_benefit {
        fixed_allowance = (fixed_allowance - STATUTORY_BENEFIT_DEDUCTION).max(Decimal::ZERO);
    }

    SalaryComponents {
        basic,
        hra,
        lta,
        fixed_allowance,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_derive_components() {
        let components = derive_components(dec!(1200000), dec!(40), false);

        assert_eq!(components.basic, dec!(40000.00));
        assert_eq!(components.hra, dec!(20000.00));
        assert_eq!(components.lta, dec!(4000.00));
        assert_eq!(components.fixed_allowance, dec!(16000.00));
    }

    #[test]
    fn test_derive_components_with_statutory_benefit() {
        let without = derive_components(dec!(1200000), dec!(40), false);
        let with = derive_components(dec!(1200000), dec!(40), true);

        assert_eq!(with.fixed_allowance, dec!(14200.00));
        assert_eq!(with.basic, without.basic);
        assert_eq!(with.hra, without.hra);
        assert_eq!(with.lta, without.lta);
    }

    #[test]
    fn test_fixed_allowance_never_negative() {
        // Basic 2000, Fixed 800, benefit would take it to -1000
        let components = derive_components(dec!(60000), dec!(40), true);

        assert_eq!(components.basic, dec!(2000.00));
        assert_eq!(components.fixed_allowance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_ctc() {
        assert_eq!(derive_components(Decimal::ZERO, dec!(40), true), SalaryComponents::default());
        assert_eq!(derive_components(dec!(-5), dec!(40), false), SalaryComponents::default());
    }

    #[test]
    fn test_rounding_to_cents() {
        let components = derive_components(dec!(1000000), dec!(50), false);

        // 1000000 / 12 * 0.5 = 41666.666...
        assert_eq!(components.basic, dec!(41666.67));
        assert_eq!(components.hra, dec!(20833.34));
        assert_eq!(components.lta, dec!(4166.67));
        assert_eq!(components.fixed_allowance, dec!(16666.67));
    }

    #[test]
    fn test_with_component() {
        let components = derive_components(dec!(1200000), dec!(40), false)
            .with(Component::Basic, dec!(45000.456));

        assert_eq!(components.get(Component::Basic), dec!(45000.46));
        assert_eq!(components.get(Component::Hra), dec!(20000.00));
    }
}
