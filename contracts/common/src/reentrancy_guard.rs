//! Single-call guard for externally visible mutating entry points.
//!
//! The lock lives in instance storage, so a failed invocation rolls it back
//! together with everything else.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::CommonError;

const LOCK: Symbol = symbol_short!("REENTRY");

/// Holds the lock until dropped.
///
/// ```rust,ignore
/// let _guard = ReentrancyGuard::acquire(&env)?;
/// ```
pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, CommonError> {
        if is_locked(env) {
            return Err(CommonError::Reentrant);
        }
        env.storage().instance().set(&LOCK, &true);
        Ok(Self { env })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&LOCK);
    }
}

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCK).unwrap_or(false)
}
