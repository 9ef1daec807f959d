use crate::storage_types::{FeeSetting, FeeType, DEFAULT_WITHDRAWAL_FEE, FEE_RATE_SCALE};

/// Smallest fee ever charged: one cent.
pub const MIN_FEE: i128 = 1;
/// Largest fee rate accepted by `set_fee_setting` ($1,000,000 fixed).
pub const MAX_FEE_RATE: i128 = 1_000_000 * FEE_RATE_SCALE;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeeQuote {
    pub fee: i128,
    pub fee_type: FeeType,
    pub fee_rate: i128,
}

impl Default for FeeSetting {
    fn default() -> Self {
        Self {
            withdrawal_fee: DEFAULT_WITHDRAWAL_FEE,
        }
    }
}

impl FeeSetting {
    pub fn is_valid(&self) -> bool {
        self.withdrawal_fee > 0 && self.withdrawal_fee <= MAX_FEE_RATE
    }

    pub fn fee_type(&self) -> FeeType {
        if self.withdrawal_fee < FEE_RATE_SCALE {
            FeeType::Percentage
        } else {
            FeeType::Fixed
        }
    }
}

fn div_round_half_up(numerator: i128, denominator: i128) -> i128 {
    (numerator + denominator / 2) / denominator
}

/// Fee in cents for withdrawing `amount` cents, clamped to `[MIN_FEE, amount]`.
pub fn compute_fee(amount: i128, setting: &FeeSetting) -> FeeQuote {
    let rate = setting.withdrawal_fee;
    let fee_type = setting.fee_type();

    let raw_fee = match fee_type {
        // split the amount so `amount * rate` cannot overflow
        FeeType::Percentage => {
            let whole = amount / FEE_RATE_SCALE;
            let rest = amount % FEE_RATE_SCALE;
            whole * rate + div_round_half_up(rest * rate, FEE_RATE_SCALE)
        }
        FeeType::Fixed => div_round_half_up(rate * 100, FEE_RATE_SCALE),
    };

    FeeQuote {
        fee: raw_fee.min(amount).max(MIN_FEE),
        fee_type,
        fee_rate: rate,
    }
}
