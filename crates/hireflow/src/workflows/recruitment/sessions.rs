use std::collections::HashMap;
use std::sync::Mutex;

use super::domain::HrUserId;
use super::token::mint_access_token;

/// Seeded HR account backing the login flow. Credentials are compared
/// verbatim; hashing is a deployment concern handled outside this crate.
#[derive(Debug, Clone)]
pub struct HrAccount {
    pub id: HrUserId,
    pub username: String,
    pub password: String,
    pub role: String,
}

/// In-process credential directory for HR users.
#[derive(Debug, Default)]
pub struct HrDirectory {
    accounts: Vec<HrAccount>,
}

impl HrDirectory {
    pub fn new(accounts: Vec<HrAccount>) -> Self {
        Self { accounts }
    }

    pub fn verify(&self, username: &str, password: &str) -> Option<HrUserId> {
        self.accounts
            .iter()
            .find(|account| account.username == username && account.password == password)
            .map(|account| account.id)
    }
}

/// Issued bearer sessions for HR users. Sessions live for the process
/// lifetime; logout is the only way to retire one.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, HrUserId>>,
}

impl SessionRegistry {
    pub fn open(&self, user: HrUserId) -> String {
        let token = mint_access_token().0;
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.insert(token.clone(), user);
        token
    }

    pub fn close(&self, token: &str) -> bool {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.remove(token).is_some()
    }

    pub fn resolve(&self, token: &str) -> Option<HrUserId> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        guard.get(token).copied()
    }
}
