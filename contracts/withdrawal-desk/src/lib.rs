#![no_std]
use crate::{
    events::emit_notifier_changed,
    storage_types::{DataKey, UserAccountManager, INSTANCE_BUMP_AMOUNT, INSTANCE_THRESHOLD},
};
use soroban_sdk::{
    assert_with_error, contract, contractimpl, panic_with_error, Address, Env, String, Vec,
};

mod amount;
mod error;
mod events;
mod fee;
mod notifier;
mod storage_types;
mod text;
mod types;
mod withdrawal;

#[cfg(test)]
extern crate std;
#[cfg(test)]
mod test;
#[cfg(test)]
mod test_utils;

pub use crate::{
    error::Error,
    notifier::{Notifier, NotifierClient},
    storage_types::{
        AccountBalances, AccountType, FeeSetting, FeeType, KycStatus, UserAccount,
        WithdrawalRecord, WithdrawalStatus, DEFAULT_WITHDRAWAL_FEE, FEE_RATE_SCALE,
    },
    types::{
        Notification, Receipt, ResponseMessage, WithdrawalReceipt, WithdrawalRequest,
        WithdrawalResponse,
    },
    withdrawal::MIN_WITHDRAWAL,
};

fn get_owner(e: &Env) -> Address {
    match e.storage().instance().get::<_, Address>(&DataKey::Owner) {
        Some(owner) => owner,
        None => panic_with_error!(e, Error::ErrNotInitialized),
    }
}

pub(crate) fn get_notifier(e: &Env) -> Option<Address> {
    e.storage()
        .instance()
        .get::<_, Address>(&DataKey::Notifier)
}

fn write_notifier(e: &Env, notifier: &Option<Address>) {
    match notifier {
        Some(notifier) => e.storage().instance().set(&DataKey::Notifier, notifier),
        None => e.storage().instance().remove(&DataKey::Notifier),
    }
}

pub(crate) fn next_withdrawal_id(e: &Env) -> u64 {
    let id = e
        .storage()
        .instance()
        .get::<_, u64>(&DataKey::WithdrawalId)
        .unwrap_or(0);
    e.storage().instance().set(&DataKey::WithdrawalId, &(id + 1));
    id
}

fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn account_manager(e: &Env, email: &String) -> UserAccountManager {
    match text::normalize_email(e, email) {
        Some(email) => UserAccountManager::new(email),
        None => panic_with_error!(e, Error::ErrInvalidEmail),
    }
}

#[contract]
pub struct WithdrawalDesk;

#[contractimpl]
#[allow(clippy::needless_pass_by_value)]
impl WithdrawalDesk {
    pub fn initialize(e: Env, owner: Address, notifier: Option<Address>) {
        assert_with_error!(
            &e,
            !e.storage().instance().has(&DataKey::Owner),
            Error::ErrAlreadyInitialized
        );

        e.storage().instance().set(&DataKey::Owner, &owner);
        write_notifier(&e, &notifier);
        bump_instance(&e);
    }

    pub fn owner(e: Env) -> Address {
        get_owner(&e)
    }

    pub fn notifier(e: Env) -> Option<Address> {
        get_notifier(&e)
    }

    pub fn set_notifier(e: Env, notifier: Option<Address>) {
        get_owner(&e).require_auth();

        write_notifier(&e, &notifier);
        bump_instance(&e);

        emit_notifier_changed(&e, &notifier);
    }

    pub fn fee_setting(e: Env) -> FeeSetting {
        FeeSetting::load(&e)
    }

    pub fn set_fee_setting(e: Env, setting: FeeSetting) {
        get_owner(&e).require_auth();

        setting.store(&e);
        bump_instance(&e);

        setting.emit_fee_setting(&e);
    }

    /// Fee in cents that the current setting charges on `amount` cents.
    pub fn quote_fee(e: Env, amount: i128) -> i128 {
        assert_with_error!(&e, amount > 0, Error::ErrInvalidAmount);
        fee::compute_fee(amount, &FeeSetting::load(&e)).fee
    }

    pub fn register_account(e: Env, email: String, name: String) {
        get_owner(&e).require_auth();

        assert_with_error!(&e, text::is_valid_email(&email), Error::ErrInvalidEmail);
        assert_with_error!(
            &e,
            name.len() as usize <= text::MAX_NAME_LEN,
            Error::ErrInvalidName
        );

        let manager = account_manager(&e, &email);
        assert_with_error!(
            &e,
            !manager.has_user_account(&e),
            Error::ErrAccountAlreadyExist
        );

        let account = UserAccount::new(manager.email.clone(), name);
        manager.write_user_account(&e, &account);

        manager.emit_account_registered(&e);
    }

    pub fn set_kyc_status(e: Env, email: String, status: KycStatus) {
        get_owner(&e).require_auth();

        let manager = account_manager(&e, &email);
        let mut account = manager.load_user_account(&e);
        account.kyc_status = status;
        manager.write_user_account(&e, &account);

        manager.emit_kyc_status(&e, status);
    }

    pub fn set_balances(e: Env, email: String, balances: AccountBalances) {
        get_owner(&e).require_auth();
        assert_with_error!(&e, balances.is_valid(), Error::ErrNegativeBalance);

        let manager = account_manager(&e, &email);
        let mut account = manager.load_user_account(&e);
        account.set_balances(&balances);
        manager.write_user_account(&e, &account);

        manager.emit_balances(&e, &balances);
    }

    pub fn account(e: Env, email: String) -> UserAccount {
        account_manager(&e, &email).load_user_account(&e)
    }

    pub fn withdrawal_history(e: Env, email: String) -> Vec<WithdrawalRecord> {
        let manager = account_manager(&e, &email);
        let account = manager.load_user_account(&e);
        manager.withdrawal_history(&e, &account)
    }

    pub fn withdrawal(e: Env, email: String, id: u64) -> WithdrawalRecord {
        let manager = account_manager(&e, &email);
        let account = manager.load_user_account(&e);
        match manager.find_withdrawal(&e, &account, id) {
            Some(record) => record,
            None => panic_with_error!(&e, Error::ErrWithdrawalNotExist),
        }
    }

    /// Business-rule rejections come back in the response body and leave the
    /// user's history untouched.
    pub fn request_withdrawal(e: Env, request: WithdrawalRequest) -> WithdrawalResponse {
        bump_instance(&e);
        let fee_setting = FeeSetting::load(&e);
        withdrawal::process_withdrawal_request(&e, request, &fee_setting)
    }
}
