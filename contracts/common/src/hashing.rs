//! Domain-scoped structured hashing of withdrawal requests.
//!
//! ```text
//! domain    = keccak256(DOMAIN_TYPEHASH ‖ keccak256(name) ‖ keccak256(version)
//!                       ‖ network_id ‖ xdr(vault))
//! struct    = keccak256(WITHDRAWAL_TYPEHASH ‖ asset_tag ‖ amount(i128 BE)
//!                       ‖ keccak256(xdr(recipient)) ‖ nonce(u64 BE)
//!                       ‖ expiration(u64 BE) ‖ reason_hash | 0³²)
//! digest    = keccak256(0x19 ‖ 0x01 ‖ domain ‖ struct)
//! ```
//!
//! The network id and the vault address in the domain make a signature
//! useless on any other network or vault.

use soroban_sdk::{crypto::Hash, xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::vault_types::{Asset, WithdrawalRequest};

pub const DOMAIN_NAME: &[u8] = b"GuardianVault";
pub const DOMAIN_VERSION: &[u8] = b"1";

const DOMAIN_TYPE: &[u8] =
    b"VaultDomain(string name,string version,bytes32 networkId,address vault)";
const WITHDRAWAL_TYPE: &[u8] = b"Withdrawal(bytes32 asset,int128 amount,bytes32 recipient,uint64 nonce,uint64 expiration,bytes32 reasonHash)";
const NATIVE_TAG: &[u8] = b"native";

fn keccak_slice(env: &Env, data: &[u8]) -> BytesN<32> {
    env.crypto().keccak256(&Bytes::from_slice(env, data)).into()
}

fn keccak_address(env: &Env, address: &Address) -> BytesN<32> {
    env.crypto().keccak256(&address.clone().to_xdr(env)).into()
}

pub fn domain_separator(env: &Env, vault: &Address) -> BytesN<32> {
    let mut data = Bytes::new(env);
    data.append(&keccak_slice(env, DOMAIN_TYPE).into());
    data.append(&keccak_slice(env, DOMAIN_NAME).into());
    data.append(&keccak_slice(env, DOMAIN_VERSION).into());
    data.append(&env.ledger().network_id().into());
    data.append(&vault.clone().to_xdr(env));
    env.crypto().keccak256(&data).into()
}

pub fn asset_tag(env: &Env, asset: &Asset) -> BytesN<32> {
    match asset {
        Asset::Native => keccak_slice(env, NATIVE_TAG),
        Asset::Token(token) => keccak_address(env, token),
    }
}

pub fn withdrawal_struct_hash(env: &Env, request: &WithdrawalRequest) -> BytesN<32> {
    let mut data = Bytes::new(env);
    data.append(&keccak_slice(env, WITHDRAWAL_TYPE).into());
    data.append(&asset_tag(env, &request.asset).into());
    data.extend_from_array(&request.amount.to_be_bytes());
    data.append(&keccak_address(env, &request.recipient).into());
    data.extend_from_array(&request.nonce.to_be_bytes());
    data.extend_from_array(&request.expiration.to_be_bytes());
    match &request.reason_hash {
        Some(reason) => data.append(&reason.clone().into()),
        None => data.extend_from_array(&[0u8; 32]),
    }
    env.crypto().keccak256(&data).into()
}

/// The digest guardians sign for `request` against `vault`.
pub fn withdrawal_digest(env: &Env, vault: &Address, request: &WithdrawalRequest) -> Hash<32> {
    let mut data = Bytes::new(env);
    data.extend_from_array(&[0x19u8, 0x01u8]);
    data.append(&domain_separator(env, vault).into());
    data.append(&withdrawal_struct_hash(env, request).into());
    env.crypto().keccak256(&data)
}
