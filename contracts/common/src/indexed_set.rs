//! Address sets stored as a slot arena plus an index map.
//!
//! Every set is scoped by an owning address (usually the vault), so one
//! controller deployment can keep an isolated set per vault.
//!
//! Layout in persistent storage:
//! - `(slot, scope, i)     -> Address` for `i in 0..len`
//! - `(index, scope, addr) -> u32`     slot of `addr`
//! - `(count, scope)       -> u32`     number of members
//!
//! Membership, insertion and removal touch a constant number of entries.
//! Removal moves the last member into the freed slot, so enumeration order is
//! insertion order only until the first removal.

use soroban_sdk::{Address, Env, Symbol, Vec};

use crate::ttl::extend_persistent;

pub struct IndexedSet {
    slot: Symbol,
    index: Symbol,
    count: Symbol,
}

impl IndexedSet {
    pub fn new(slot: Symbol, index: Symbol, count: Symbol) -> Self {
        Self { slot, index, count }
    }

    fn slot_key(&self, scope: &Address, i: u32) -> (Symbol, Address, u32) {
        (self.slot.clone(), scope.clone(), i)
    }

    fn index_key(&self, scope: &Address, member: &Address) -> (Symbol, Address, Address) {
        (self.index.clone(), scope.clone(), member.clone())
    }

    fn count_key(&self, scope: &Address) -> (Symbol, Address) {
        (self.count.clone(), scope.clone())
    }

    fn set_len(&self, env: &Env, scope: &Address, len: u32) {
        let key = self.count_key(scope);
        env.storage().persistent().set(&key, &len);
        extend_persistent(env, &key);
    }

    pub fn len(&self, env: &Env, scope: &Address) -> u32 {
        env.storage()
            .persistent()
            .get(&self.count_key(scope))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, env: &Env, scope: &Address) -> bool {
        self.len(env, scope) == 0
    }

    pub fn contains(&self, env: &Env, scope: &Address, member: &Address) -> bool {
        env.storage()
            .persistent()
            .has(&self.index_key(scope, member))
    }

    /// Returns `false` when `member` is already present.
    pub fn insert(&self, env: &Env, scope: &Address, member: &Address) -> bool {
        if self.contains(env, scope, member) {
            return false;
        }
        let slot = self.len(env, scope);

        let slot_key = self.slot_key(scope, slot);
        env.storage().persistent().set(&slot_key, member);
        extend_persistent(env, &slot_key);

        let index_key = self.index_key(scope, member);
        env.storage().persistent().set(&index_key, &slot);
        extend_persistent(env, &index_key);

        self.set_len(env, scope, slot.saturating_add(1));
        true
    }

    /// Swap-remove. Returns `false` when `member` is absent.
    pub fn remove(&self, env: &Env, scope: &Address, member: &Address) -> bool {
        let index_key = self.index_key(scope, member);
        let slot: u32 = match env.storage().persistent().get(&index_key) {
            Some(slot) => slot,
            None => return false,
        };
        let last = self.len(env, scope).saturating_sub(1);

        if slot != last {
            let last_key = self.slot_key(scope, last);
            if let Some(moved) = env.storage().persistent().get::<_, Address>(&last_key) {
                let slot_key = self.slot_key(scope, slot);
                env.storage().persistent().set(&slot_key, &moved);
                extend_persistent(env, &slot_key);

                let moved_key = self.index_key(scope, &moved);
                env.storage().persistent().set(&moved_key, &slot);
                extend_persistent(env, &moved_key);
            }
        }

        env.storage().persistent().remove(&self.slot_key(scope, last));
        env.storage().persistent().remove(&index_key);
        self.set_len(env, scope, last);
        true
    }

    pub fn get(&self, env: &Env, scope: &Address, i: u32) -> Option<Address> {
        env.storage().persistent().get(&self.slot_key(scope, i))
    }

    /// All members in slot order.
    pub fn members(&self, env: &Env, scope: &Address) -> Vec<Address> {
        let mut out = Vec::new(env);
        for i in 0..self.len(env, scope) {
            if let Some(member) = self.get(env, scope, i) {
                out.push_back(member);
            }
        }
        out
    }
}
