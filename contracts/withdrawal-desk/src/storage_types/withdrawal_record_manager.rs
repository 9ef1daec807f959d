use soroban_sdk::{Env, String};

use super::{
    WithdrawalRecord, WithdrawalRecordManager, PERSISTENT_THRESHOLD, USER_DATA_BUMP_AMOUNT,
};

impl WithdrawalRecordManager {
    pub fn new(email: String, index: u32) -> Self {
        Self { email, index }
    }

    pub fn read_record(&self, e: &Env) -> Option<WithdrawalRecord> {
        let record = e.storage().persistent().get::<_, WithdrawalRecord>(self);
        if record.is_some() {
            e.storage()
                .persistent()
                .extend_ttl(self, PERSISTENT_THRESHOLD, USER_DATA_BUMP_AMOUNT);
        }
        record
    }

    pub fn write_record(&self, e: &Env, record: &WithdrawalRecord) {
        e.storage().persistent().set(self, record);
        e.storage()
            .persistent()
            .extend_ttl(self, PERSISTENT_THRESHOLD, USER_DATA_BUMP_AMOUNT);
    }
}
