use soroban_sdk::{Address, Env};

use crate::interfaces::PausingClient;
use crate::CommonError;

/// Returns `true` when `controller` reports `vault` as paused. A vault
/// without a pausing controller is never paused.
pub fn is_paused(env: &Env, controller: &Option<Address>, vault: &Address) -> bool {
    match controller {
        Some(controller) => PausingClient::new(env, controller).is_paused(vault),
        None => false,
    }
}

/// Returns `CommonError::Paused` when the vault is paused.
///
/// Place this at the top of every withdrawal path. Deposits and views must
/// **not** call it.
pub fn require_not_paused(
    env: &Env,
    controller: &Option<Address>,
    vault: &Address,
) -> Result<(), CommonError> {
    if is_paused(env, controller, vault) {
        return Err(CommonError::Paused);
    }
    Ok(())
}
