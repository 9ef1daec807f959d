#![cfg(test)]

use soroban_sdk::{Address, Env};

use crate::WithdrawalDeskClient;

pub fn register_test_contract(e: &Env) -> Address {
    e.register_contract(None, crate::WithdrawalDesk {})
}

pub struct WithdrawalDesk {
    env: Env,
    contract_id: Address,
}

impl WithdrawalDesk {
    #[must_use]
    pub fn client(&self) -> WithdrawalDeskClient {
        WithdrawalDeskClient::new(&self.env, &self.contract_id)
    }

    #[must_use]
    pub fn new(env: &Env, contract_id: Address) -> Self {
        Self {
            env: env.clone(),
            contract_id,
        }
    }
}
