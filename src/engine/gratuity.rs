use crate::utils::clamp_percentage;

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gratuity {
    pub enabled: bool,
    pub percentage: Decimal,
    pub amount: Decimal,
}

impl Default for Gratuity {
    fn default() -> Self {
        Self {
            enabled: false,
            percentage: DEFAULT_GRATUITY_PERCENTAGE,
            amount: Decimal::ZERO,
        }
    }
}

impl Gratuity {
    pub fn recompute(self, basic: Decimal) -> Self {
        let amount = if self.enabled {
            gratuity_amount(basic, self.percentage)
        } else {
            Decimal::ZERO
        };

        Self { amount, ..self }
    }

    /// Switching off keeps the percentage around for the next time it is switched on
    pub fn toggle(self, enabled: bool, basic: Decimal) -> Self {
        Self { enabled, ..self }.recompute(basic)
    }

    pub fn with_percentage(self, percentage: Decimal, basic: Decimal) -> Self {
        let percentage = clamp_percentage(percentage);

        Self { percentage, ..self }.recompute(basic)
    }
}

pub fn gratuity_amount(basic: Decimal, percentage: Decimal) -> Decimal {
    round2(basic * (percentage / MAX_PERCENTAGE))
}
