//! Session gate: the credential-check boundary in front of scheduling.

use crate::types::Credential;
use std::collections::HashMap;

/// Credential verification seam
///
/// Callers only see pass/fail; an unknown username and a wrong password
/// are indistinguishable. Keeping this behind a trait lets a hashed
/// comparison replace the plaintext one without touching callers.
pub trait SessionGate {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Exact-equality lookup against the loaded credential file
///
/// Credentials are stored and compared in plaintext. Security weakness,
/// not a functional one; out of scope to fix here.
#[derive(Clone, Debug, Default)]
pub struct PlaintextCredentials {
    entries: HashMap<String, String>,
}

impl PlaintextCredentials {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Credential>,
    {
        let entries = records
            .into_iter()
            .map(|c| (c.username, c.password))
            .collect();
        Self { entries }
    }
}

impl SessionGate for PlaintextCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.entries
            .get(username)
            .map(|stored| stored == password)
            .unwrap_or(false)
    }
}
