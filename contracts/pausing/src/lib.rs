#![no_std]

//! # Pausing Controller
//!
//! Shared administrative kill switch. An admin and the pausers it appoints
//! can halt withdrawals for any vault that consults this controller; the
//! admin can also halt every vault at once. Deposits are never gated here.
//!
//! A pause can be lifted by whoever set it or by the admin. Every transition
//! is appended to a per-vault history.

pub mod events;


use common::ttl;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, String,
    Symbol, Vec,
};

const ADMIN: Symbol = symbol_short!("ADMIN");
const PAUSER: Symbol = symbol_short!("PAUSER");
const RECORD: Symbol = symbol_short!("P_REC");
const GLOBAL: Symbol = symbol_short!("P_GLOBAL");
const HISTORY: Symbol = symbol_short!("P_HIST");
const HISTORY_LEN: Symbol = symbol_short!("P_HLEN");

/// Upper bound on entries returned by one `history` call.
pub const MAX_HISTORY_PAGE: u32 = 50;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PauseError {
    AlreadyInitialized = 400,
    NotInitialized = 401,
    Unauthorized = 402,
    AlreadyPaused = 403,
    NotPaused = 404,
    PauserExists = 405,
    PauserNotFound = 406,
}

/// Current pause state of one vault, or of the whole network.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseRecord {
    pub paused: bool,
    pub paused_at: Option<u64>,
    pub paused_by: Option<Address>,
    pub reason: Option<String>,
}

/// One entry of the append-only transition history.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseTransition {
    pub paused: bool,
    pub actor: Address,
    pub reason: Option<String>,
    pub timestamp: u64,
}

impl PauseRecord {
    fn unpaused() -> Self {
        PauseRecord {
            paused: false,
            paused_at: None,
            paused_by: None,
            reason: None,
        }
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn get_admin(env: &Env) -> Result<Address, PauseError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(PauseError::NotInitialized)
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), PauseError> {
    caller.require_auth();
    if get_admin(env)? != *caller {
        return Err(PauseError::Unauthorized);
    }
    Ok(())
}

fn is_pauser(env: &Env, who: &Address) -> bool {
    env.storage().persistent().has(&(PAUSER, who.clone()))
}

fn require_pauser_or_admin(env: &Env, caller: &Address) -> Result<Address, PauseError> {
    caller.require_auth();
    let admin = get_admin(env)?;
    if *caller != admin && !is_pauser(env, caller) {
        return Err(PauseError::Unauthorized);
    }
    Ok(admin)
}

fn load_record(env: &Env, vault: &Address) -> PauseRecord {
    env.storage()
        .persistent()
        .get(&(RECORD, vault.clone()))
        .unwrap_or_else(PauseRecord::unpaused)
}

fn store_record(env: &Env, vault: &Address, record: &PauseRecord) {
    let key = (RECORD, vault.clone());
    env.storage().persistent().set(&key, record);
    ttl::extend_persistent(env, &key);
}

fn load_global(env: &Env) -> PauseRecord {
    env.storage()
        .instance()
        .get(&GLOBAL)
        .unwrap_or_else(PauseRecord::unpaused)
}

fn append_history(env: &Env, scope: &Address, entry: &PauseTransition) {
    let len_key = (HISTORY_LEN, scope.clone());
    let len: u32 = env.storage().persistent().get(&len_key).unwrap_or(0);
    let entry_key = (HISTORY, scope.clone(), len);
    env.storage().persistent().set(&entry_key, entry);
    ttl::extend_persistent(env, &entry_key);
    env.storage().persistent().set(&len_key, &(len + 1));
    ttl::extend_persistent(env, &len_key);
}

fn transition(env: &Env, paused: bool, actor: &Address, reason: &Option<String>) -> PauseTransition {
    PauseTransition {
        paused,
        actor: actor.clone(),
        reason: reason.clone(),
        timestamp: env.ledger().timestamp(),
    }
}

#[contract]
pub struct PausingContract;

#[contractimpl]
impl PausingContract {
    pub fn initialize(env: Env, admin: Address) -> Result<(), PauseError> {
        if env.storage().instance().has(&ADMIN) {
            return Err(PauseError::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&ADMIN, &admin);
        ttl::extend_instance(&env);
        Ok(())
    }

    pub fn add_pauser(env: Env, caller: Address, pauser: Address) -> Result<(), PauseError> {
        require_admin(&env, &caller)?;
        if is_pauser(&env, &pauser) {
            return Err(PauseError::PauserExists);
        }
        let key = (PAUSER, pauser.clone());
        env.storage().persistent().set(&key, &true);
        ttl::extend_persistent(&env, &key);
        events::emit_pauser_changed(&env, pauser, true);
        Ok(())
    }

    pub fn remove_pauser(env: Env, caller: Address, pauser: Address) -> Result<(), PauseError> {
        require_admin(&env, &caller)?;
        if !is_pauser(&env, &pauser) {
            return Err(PauseError::PauserNotFound);
        }
        env.storage().persistent().remove(&(PAUSER, pauser.clone()));
        events::emit_pauser_changed(&env, pauser, false);
        Ok(())
    }

    /// Halt withdrawals for `vault`.
    pub fn pause(env: Env, caller: Address, vault: Address, reason: String) -> Result<(), PauseError> {
        require_pauser_or_admin(&env, &caller)?;
        let record = load_record(&env, &vault);
        if record.paused {
            return Err(PauseError::AlreadyPaused);
        }

        let reason = Some(reason);
        store_record(
            &env,
            &vault,
            &PauseRecord {
                paused: true,
                paused_at: Some(env.ledger().timestamp()),
                paused_by: Some(caller.clone()),
                reason: reason.clone(),
            },
        );
        append_history(&env, &vault, &transition(&env, true, &caller, &reason));
        ttl::extend_instance(&env);

        events::emit_paused(&env, vault, caller, reason);
        Ok(())
    }

    /// Lift a vault pause. Only the identity that paused, or the admin.
    pub fn unpause(env: Env, caller: Address, vault: Address) -> Result<(), PauseError> {
        caller.require_auth();
        let admin = get_admin(&env)?;
        let record = load_record(&env, &vault);
        if !record.paused {
            return Err(PauseError::NotPaused);
        }
        if record.paused_by.as_ref() != Some(&caller) && caller != admin {
            return Err(PauseError::Unauthorized);
        }

        store_record(&env, &vault, &PauseRecord::unpaused());
        append_history(&env, &vault, &transition(&env, false, &caller, &None));

        events::emit_unpaused(&env, vault, caller);
        Ok(())
    }

    /// Replace the reason of an active pause.
    pub fn update_reason(
        env: Env,
        caller: Address,
        vault: Address,
        reason: String,
    ) -> Result<(), PauseError> {
        caller.require_auth();
        let admin = get_admin(&env)?;
        let mut record = load_record(&env, &vault);
        if !record.paused {
            return Err(PauseError::NotPaused);
        }
        if record.paused_by.as_ref() != Some(&caller) && caller != admin {
            return Err(PauseError::Unauthorized);
        }

        record.reason = Some(reason.clone());
        store_record(&env, &vault, &record);

        events::emit_reason_updated(&env, vault, caller, reason);
        Ok(())
    }

    /// Halt every vault that consults this controller.
    pub fn pause_all(env: Env, caller: Address, reason: String) -> Result<(), PauseError> {
        require_admin(&env, &caller)?;
        if load_global(&env).paused {
            return Err(PauseError::AlreadyPaused);
        }

        let reason = Some(reason);
        env.storage().instance().set(
            &GLOBAL,
            &PauseRecord {
                paused: true,
                paused_at: Some(env.ledger().timestamp()),
                paused_by: Some(caller.clone()),
                reason: reason.clone(),
            },
        );
        let scope = env.current_contract_address();
        append_history(&env, &scope, &transition(&env, true, &caller, &reason));
        ttl::extend_instance(&env);

        events::emit_paused(&env, scope, caller, reason);
        Ok(())
    }

    pub fn unpause_all(env: Env, caller: Address) -> Result<(), PauseError> {
        require_admin(&env, &caller)?;
        if !load_global(&env).paused {
            return Err(PauseError::NotPaused);
        }

        env.storage().instance().set(&GLOBAL, &PauseRecord::unpaused());
        let scope = env.current_contract_address();
        append_history(&env, &scope, &transition(&env, false, &caller, &None));

        events::emit_unpaused(&env, scope, caller);
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// `true` when `vault` or the whole network is paused.
    pub fn is_paused(env: Env, vault: Address) -> bool {
        load_global(&env).paused || load_record(&env, &vault).paused
    }

    pub fn get_record(env: Env, vault: Address) -> PauseRecord {
        load_record(&env, &vault)
    }

    pub fn global_record(env: Env) -> PauseRecord {
        load_global(&env)
    }

    /// Transitions for `vault` starting at `start`, at most
    /// [`MAX_HISTORY_PAGE`] entries. The network-wide history is kept under
    /// this contract's own address.
    pub fn history(env: Env, vault: Address, start: u32, limit: u32) -> Vec<PauseTransition> {
        let len = Self::history_len(env.clone(), vault.clone());
        let end = start
            .saturating_add(limit.min(MAX_HISTORY_PAGE))
            .min(len);
        let mut out = Vec::new(&env);
        for i in start..end {
            if let Some(entry) = env
                .storage()
                .persistent()
                .get::<_, PauseTransition>(&(HISTORY, vault.clone(), i))
            {
                out.push_back(entry);
            }
        }
        out
    }

    pub fn history_len(env: Env, vault: Address) -> u32 {
        env.storage()
            .persistent()
            .get(&(HISTORY_LEN, vault))
            .unwrap_or(0)
    }

    pub fn is_pauser(env: Env, who: Address) -> bool {
        is_pauser(&env, &who)
    }

    pub fn admin(env: Env) -> Result<Address, PauseError> {
        get_admin(&env)
    }
}
