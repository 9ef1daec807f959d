use soroban_sdk::{panic_with_error, Env, String, Symbol, Vec};

use super::{
    AccountBalances, KycStatus, UserAccount, UserAccountManager, WithdrawalRecord,
    WithdrawalRecordManager, PERSISTENT_THRESHOLD, USER_DATA_BUMP_AMOUNT,
};
use crate::error::Error;

impl UserAccountManager {
    /// `email` must already be normalized.
    pub fn new(email: String) -> Self {
        Self { email }
    }

    pub fn has_user_account(&self, e: &Env) -> bool {
        e.storage().persistent().has(self)
    }

    pub fn read_user_account(&self, e: &Env) -> Option<UserAccount> {
        let account = e.storage().persistent().get::<_, UserAccount>(self);
        if account.is_some() {
            e.storage()
                .persistent()
                .extend_ttl(self, PERSISTENT_THRESHOLD, USER_DATA_BUMP_AMOUNT);
        }
        account
    }

    pub fn load_user_account(&self, e: &Env) -> UserAccount {
        match self.read_user_account(e) {
            Some(account) => account,
            None => panic_with_error!(e, Error::ErrUserNotFound),
        }
    }

    pub fn write_user_account(&self, e: &Env, account: &UserAccount) {
        e.storage().persistent().set(self, account);
        e.storage()
            .persistent()
            .extend_ttl(self, PERSISTENT_THRESHOLD, USER_DATA_BUMP_AMOUNT);
    }

    /// Stores `record` as the next entry of the user's history. The caller
    /// still has to write `account` back.
    pub fn append_withdrawal(
        &self,
        e: &Env,
        account: &mut UserAccount,
        record: &WithdrawalRecord,
    ) {
        WithdrawalRecordManager::new(self.email.clone(), account.withdrawal_count)
            .write_record(e, record);
        account.withdrawal_count += 1;
    }

    pub fn withdrawal_history(&self, e: &Env, account: &UserAccount) -> Vec<WithdrawalRecord> {
        let mut history = Vec::new(e);
        for index in 0..account.withdrawal_count {
            let manager = WithdrawalRecordManager::new(self.email.clone(), index);
            if let Some(record) = manager.read_record(e) {
                history.push_back(record);
            }
        }
        history
    }

    pub fn find_withdrawal(
        &self,
        e: &Env,
        account: &UserAccount,
        id: u64,
    ) -> Option<WithdrawalRecord> {
        (0..account.withdrawal_count)
            .filter_map(|index| {
                WithdrawalRecordManager::new(self.email.clone(), index).read_record(e)
            })
            .find(|record| record.id == id)
    }

    pub fn emit_account_registered(&self, e: &Env) {
        let topics = (Symbol::new(e, "account_registered"), self.email.clone());
        e.events().publish(topics, ());
    }

    pub fn emit_kyc_status(&self, e: &Env, status: KycStatus) {
        let topics = (Symbol::new(e, "kyc_status"), self.email.clone());
        e.events().publish(topics, status);
    }

    pub fn emit_balances(&self, e: &Env, balances: &AccountBalances) {
        let topics = (Symbol::new(e, "balances"), self.email.clone());
        e.events().publish(topics, *balances);
    }

    pub fn emit_withdrawal_requested(&self, e: &Env, record: &WithdrawalRecord) {
        let topics = (Symbol::new(e, "withdrawal_requested"), self.email.clone());
        e.events().publish(
            topics,
            (record.id, record.account, record.amount, record.fee),
        );
    }
}

impl UserAccount {
    pub fn new(email: String, name: String) -> Self {
        Self {
            email,
            name,
            kyc_status: KycStatus::NotSubmitted,
            trading_balance: 0,
            plan_bonus: 0,
            total_won: 0,
            withdrawal_count: 0,
        }
    }

    pub fn balances(&self) -> AccountBalances {
        AccountBalances {
            trading_balance: self.trading_balance,
            plan_bonus: self.plan_bonus,
            total_won: self.total_won,
        }
    }

    pub fn set_balances(&mut self, balances: &AccountBalances) {
        self.trading_balance = balances.trading_balance;
        self.plan_bonus = balances.plan_bonus;
        self.total_won = balances.total_won;
    }
}

impl AccountBalances {
    pub fn is_valid(&self) -> bool {
        self.trading_balance >= 0 && self.plan_bonus >= 0 && self.total_won >= 0
    }
}
