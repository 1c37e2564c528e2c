//! Storage TTL policy shared by every contract.

use soroban_sdk::{Env, IntoVal, Val};

/// ~30 days at 5s/ledger.
pub const TTL_THRESHOLD: u32 = 518_400;
/// ~60 days at 5s/ledger.
pub const TTL_EXTEND_TO: u32 = 1_036_800;

/// Bump a persistent entry after it has been written.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Bump the contract instance (configuration, counters).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
