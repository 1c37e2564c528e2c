#![no_std]

//! # Guardian Credential Registry
//!
//! Issues and revokes non-transferable guardian credentials. One deployment
//! serves any number of vaults; every credential is scoped by the vault that
//! issued it and only that vault may issue or revoke it.
//!
//! Each credential binds the guardian's account to the secp256k1 signer key
//! it uses for withdrawal signatures, and the registry keeps the reverse
//! index (signer → guardian) used during signature verification.

pub mod events;


use common::{ttl, Credential, IndexedSet};
use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, BytesN, Env, Symbol, Vec,
};

const CRED: Symbol = symbol_short!("CRED");
const SIGNER: Symbol = symbol_short!("SIGNER");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RegistryError {
    AlreadyIssued = 100,
    CredentialNotFound = 101,
    SignerInUse = 102,
    NonTransferable = 103,
}

fn holders() -> IndexedSet {
    IndexedSet::new(
        symbol_short!("H_SLOT"),
        symbol_short!("H_IDX"),
        symbol_short!("H_CNT"),
    )
}

fn credential_key(vault: &Address, guardian: &Address) -> (Symbol, Address, Address) {
    (CRED, vault.clone(), guardian.clone())
}

fn signer_key(vault: &Address, signer: &BytesN<20>) -> (Symbol, Address, BytesN<20>) {
    (SIGNER, vault.clone(), signer.clone())
}

#[contract]
pub struct GuardianRegistryContract;

#[contractimpl]
impl GuardianRegistryContract {
    /// Issue a credential binding `guardian` to `signer` within `vault`.
    pub fn issue(
        env: Env,
        vault: Address,
        guardian: Address,
        signer: BytesN<20>,
    ) -> Result<(), RegistryError> {
        vault.require_auth();

        let cred_key = credential_key(&vault, &guardian);
        if env.storage().persistent().has(&cred_key) {
            return Err(RegistryError::AlreadyIssued);
        }
        let sig_key = signer_key(&vault, &signer);
        if env.storage().persistent().has(&sig_key) {
            return Err(RegistryError::SignerInUse);
        }

        let credential = Credential {
            vault: vault.clone(),
            guardian: guardian.clone(),
            signer: signer.clone(),
            issued_at: env.ledger().timestamp(),
        };
        env.storage().persistent().set(&cred_key, &credential);
        ttl::extend_persistent(&env, &cred_key);
        env.storage().persistent().set(&sig_key, &guardian);
        ttl::extend_persistent(&env, &sig_key);
        holders().insert(&env, &vault, &guardian);

        events::emit_credential_issued(&env, vault, guardian, signer);
        Ok(())
    }

    /// Revoke the credential held by `guardian` in `vault`.
    pub fn revoke(env: Env, vault: Address, guardian: Address) -> Result<(), RegistryError> {
        vault.require_auth();

        let cred_key = credential_key(&vault, &guardian);
        let credential: Credential = env
            .storage()
            .persistent()
            .get(&cred_key)
            .ok_or(RegistryError::CredentialNotFound)?;

        env.storage().persistent().remove(&cred_key);
        env.storage()
            .persistent()
            .remove(&signer_key(&vault, &credential.signer));
        holders().remove(&env, &vault, &guardian);

        events::emit_credential_revoked(&env, vault, guardian);
        Ok(())
    }

    /// Credentials are soulbound.
    pub fn transfer(
        _env: Env,
        _vault: Address,
        _from: Address,
        _to: Address,
    ) -> Result<(), RegistryError> {
        Err(RegistryError::NonTransferable)
    }

    pub fn is_guardian(env: Env, vault: Address, guardian: Address) -> bool {
        env.storage()
            .persistent()
            .has(&credential_key(&vault, &guardian))
    }

    pub fn guardian_of(env: Env, vault: Address, signer: BytesN<20>) -> Option<Address> {
        env.storage().persistent().get(&signer_key(&vault, &signer))
    }

    pub fn get_credential(env: Env, vault: Address, guardian: Address) -> Option<Credential> {
        env.storage()
            .persistent()
            .get(&credential_key(&vault, &guardian))
    }

    pub fn guardian_count(env: Env, vault: Address) -> u32 {
        holders().len(&env, &vault)
    }

    pub fn guardians(env: Env, vault: Address) -> Vec<Address> {
        holders().members(&env, &vault)
    }
}
