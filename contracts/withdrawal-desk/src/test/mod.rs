use mailer::{Mailer, MailerClient};
use soroban_sdk::{
    testutils::{Address as AddressTestTrait, Ledger},
    Address, Env, String, Vec,
};

use crate::{
    storage_types::{AccountBalances, FeeSetting, KycStatus, WithdrawalRecord},
    test_utils::{register_test_contract, WithdrawalDesk},
    types::{ResponseMessage, WithdrawalRequest, WithdrawalResponse},
    DEFAULT_WITHDRAWAL_FEE, FEE_RATE_SCALE,
};


const TRADER: &str = "trader@example.com";
/// 2026-10-16T00:00:00Z
const NOW: u64 = 1_792_108_800;

fn create_withdrawal_desk_contract(
    e: &Env,
    owner: &Address,
    notifier: &Option<Address>,
) -> (Address, WithdrawalDesk) {
    let id = register_test_contract(e);
    let desk = WithdrawalDesk::new(e, id.clone());
    desk.client().initialize(owner, notifier);
    (id, desk)
}

fn create_mailer_contract<'a>(e: &Env, owner: &Address) -> (Address, MailerClient<'a>) {
    let id = e.register_contract(None, Mailer);
    let mailer = MailerClient::new(e, &id);
    mailer.initialize(owner, &String::from_str(e, "support@universalfxgroup.com"));
    (id, mailer)
}

fn balances(trading_balance: i128, plan_bonus: i128, total_won: i128) -> AccountBalances {
    AccountBalances {
        trading_balance,
        plan_bonus,
        total_won,
    }
}

fn history(response: &WithdrawalResponse) -> Vec<WithdrawalRecord> {
    match &response.message {
        ResponseMessage::History(history) => history.clone(),
        ResponseMessage::Text(text) => panic!("expected withdrawal history, got {:?}", text),
    }
}

fn text(response: &WithdrawalResponse) -> String {
    match &response.message {
        ResponseMessage::Text(text) => text.clone(),
        ResponseMessage::History(_) => panic!("expected a rejection message"),
    }
}

struct Setup<'a> {
    env: Env,
    owner: Address,
    desk: WithdrawalDesk,
    desk_id: Address,
    mailer: MailerClient<'a>,
    mailer_id: Address,
}

impl Setup<'_> {
    fn new() -> Self {
        let e: Env = Env::default();
        e.mock_all_auths();
        e.budget().reset_unlimited();
        e.ledger().with_mut(|l| {
            l.timestamp = NOW;
        });

        let owner = Address::generate(&e);

        let (mailer_id, mailer) = create_mailer_contract(&e, &owner);
        let (desk_id, desk) =
            create_withdrawal_desk_contract(&e, &owner, &Some(mailer_id.clone()));
        mailer.set_source(&desk_id, &true);

        Self {
            env: e,
            owner,
            desk,
            desk_id,
            mailer,
            mailer_id,
        }
    }

    fn with_fee(&self, withdrawal_fee: i128) -> &Self {
        self.desk
            .client()
            .set_fee_setting(&FeeSetting { withdrawal_fee });
        self
    }

    fn with_account(&self, email: &str, kyc: KycStatus, funds: AccountBalances) -> &Self {
        let email = String::from_str(&self.env, email);
        let client = self.desk.client();
        client.register_account(&email, &String::from_str(&self.env, "Ada Trader"));
        client.set_kyc_status(&email, &kyc);
        client.set_balances(&email, &funds);
        self
    }

    fn with_trader(&self, funds: AccountBalances) -> &Self {
        self.with_account(TRADER, KycStatus::Approved, funds)
    }

    fn form(&self, email: &str, account: &str, amount: &str) -> WithdrawalRequest {
        WithdrawalRequest {
            email: String::from_str(&self.env, email),
            method: String::from_str(&self.env, "USDT (TRC20)"),
            account: String::from_str(&self.env, account),
            amount: String::from_str(&self.env, amount),
            transaction_status: String::from_str(&self.env, "pending"),
        }
    }

    fn request(&self, account: &str, amount: &str) -> WithdrawalResponse {
        self.desk
            .client()
            .request_withdrawal(&self.form(TRADER, account, amount))
    }

    fn trader_history(&self) -> Vec<WithdrawalRecord> {
        self.desk
            .client()
            .withdrawal_history(&String::from_str(&self.env, TRADER))
    }
}

#[test]
fn check_initialized() {
    let setup = Setup::new();
    let client = setup.desk.client();

    assert_eq!(client.owner(), setup.owner);
    assert_eq!(client.notifier(), Some(setup.mailer_id.clone()));
    assert_eq!(
        client.fee_setting(),
        FeeSetting {
            withdrawal_fee: DEFAULT_WITHDRAWAL_FEE
        }
    );
    assert!(setup.mailer.is_source(&setup.desk_id));
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn check_initialize_twice_fails() {
    let setup = Setup::new();
    setup.desk.client().initialize(&setup.owner, &None);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn check_uninitialized_desk_has_no_owner() {
    let e = Env::default();
    let desk = WithdrawalDesk::new(&e, register_test_contract(&e));
    desk.client().owner();
}

#[test]
fn check_set_fee_setting() {
    let setup = Setup::new();
    setup.with_fee(FEE_RATE_SCALE / 10);

    assert_eq!(
        setup.desk.client().fee_setting(),
        FeeSetting {
            withdrawal_fee: 1_000
        }
    );
    assert_eq!(setup.desk.client().quote_fee(&10_000), 1_000);
}

#[test]
fn check_invalid_fee_setting_is_refused() {
    let setup = Setup::new();
    let client = setup.desk.client();

    for withdrawal_fee in [0, -5, i128::MAX] {
        assert!(client
            .try_set_fee_setting(&FeeSetting { withdrawal_fee })
            .is_err());
    }
    assert_eq!(client.fee_setting().withdrawal_fee, DEFAULT_WITHDRAWAL_FEE);
}

#[test]
fn check_quote_fee_uses_default_setting() {
    let setup = Setup::new();
    assert_eq!(setup.desk.client().quote_fee(&5_000), 1_000);
    assert_eq!(setup.desk.client().quote_fee(&500), 500);
    assert!(setup.desk.client().try_quote_fee(&0).is_err());
}

#[test]
fn check_register_account() {
    let setup = Setup::new();
    let client = setup.desk.client();
    let email = String::from_str(&setup.env, "Ada@Example.COM");

    client.register_account(&email, &String::from_str(&setup.env, "Ada"));

    let account = client.account(&String::from_str(&setup.env, "ada@example.com"));
    assert_eq!(account.email, String::from_str(&setup.env, "ada@example.com"));
    assert_eq!(account.name, String::from_str(&setup.env, "Ada"));
    assert_eq!(account.kyc_status, KycStatus::NotSubmitted);
    assert_eq!(account.balances(), balances(0, 0, 0));
    assert_eq!(account.withdrawal_count, 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #11)")]
fn check_register_account_is_case_insensitive() {
    let setup = Setup::new();
    let client = setup.desk.client();
    let name = String::from_str(&setup.env, "Ada");

    client.register_account(&String::from_str(&setup.env, "ada@example.com"), &name);
    client.register_account(&String::from_str(&setup.env, "ADA@example.com"), &name);
}

#[test]
fn check_register_account_validates_input() {
    let setup = Setup::new();
    let client = setup.desk.client();
    let name = String::from_str(&setup.env, "Ada");

    for email in ["", "no-at-sign.example.com"] {
        assert!(client
            .try_register_account(&String::from_str(&setup.env, email), &name)
            .is_err());
    }

    let long_name = "x".repeat(200);
    assert!(client
        .try_register_account(
            &String::from_str(&setup.env, "ada@example.com"),
            &String::from_str(&setup.env, &long_name),
        )
        .is_err());
}

#[test]
fn check_set_kyc_status_and_balances() {
    let setup = Setup::new();
    setup.with_account(TRADER, KycStatus::Pending, balances(100, 200, 300));

    let account = setup
        .desk
        .client()
        .account(&String::from_str(&setup.env, TRADER));
    assert_eq!(account.kyc_status, KycStatus::Pending);
    assert_eq!(account.trading_balance, 100);
    assert_eq!(account.plan_bonus, 200);
    assert_eq!(account.total_won, 300);
}

#[test]
#[should_panic(expected = "Error(Contract, #3)")]
fn check_set_kyc_status_for_unknown_user_fails() {
    let setup = Setup::new();
    setup
        .desk
        .client()
        .set_kyc_status(&String::from_str(&setup.env, TRADER), &KycStatus::Approved);
}

#[test]
#[should_panic(expected = "Error(Contract, #12)")]
fn check_negative_balance_is_refused() {
    let setup = Setup::new();
    setup.with_trader(balances(100, -1, 0));
}

#[test]
fn check_set_notifier() {
    let setup = Setup::new();
    let client = setup.desk.client();

    client.set_notifier(&None);
    assert_eq!(client.notifier(), None);

    client.set_notifier(&Some(setup.mailer_id.clone()));
    assert_eq!(client.notifier(), Some(setup.mailer_id.clone()));
}

#[test]
#[should_panic]
fn check_admin_calls_require_owner_auth() {
    let e = Env::default();
    let owner = Address::generate(&e);
    let (_, desk) = create_withdrawal_desk_contract(&e, &owner, &None);

    desk.client().set_fee_setting(&FeeSetting {
        withdrawal_fee: 1_000,
    });
}
