use soroban_sdk::{Env, IntoVal, Val};

// Ledgers closed per day at a ~5 second close time
pub const DAY_IN_LEDGERS: u32 = 17280;

// Instance entries (config, epoch, terms, debt) are reset to 7 days once they fall under 6 days.
pub const INSTANCE_TARGET_TTL: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_RENEWAL_THRESHOLD: u32 = INSTANCE_TARGET_TTL - DAY_IN_LEDGERS;

// Per-account entries (warmup claims, stake accounts, bond records) live for 30 days after the last touch.
pub const PERSISTENT_TARGET_TTL: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_RENEWAL_THRESHOLD: u32 = PERSISTENT_TARGET_TTL - DAY_IN_LEDGERS;

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

pub fn bump_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    if env.storage().persistent().has(key) {
        env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    }
}
