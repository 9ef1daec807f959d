use soroban_sdk::{assert_with_error, Env, Symbol};

use super::{DataKey, FeeSetting};
use crate::error::Error;

impl FeeSetting {
    /// Stored setting, or the default $10 fixed fee when none was configured.
    pub fn load(e: &Env) -> Self {
        e.storage()
            .instance()
            .get::<_, FeeSetting>(&DataKey::FeeSetting)
            .unwrap_or_default()
    }

    pub fn store(&self, e: &Env) {
        assert_with_error!(e, self.is_valid(), Error::ErrInvalidFeeRate);
        e.storage().instance().set(&DataKey::FeeSetting, self);
    }

    pub fn emit_fee_setting(&self, e: &Env) {
        let topics = (Symbol::new(e, "fee_setting"),);
        e.events().publish(topics, (self.withdrawal_fee, self.fee_type()));
    }
}
