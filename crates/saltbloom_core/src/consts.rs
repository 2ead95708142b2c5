// crates/saltbloom_core/src/consts.rs

pub const DEFAULT_ALGORITHM: &str = "MD5";
pub const DEFAULT_FUNCTION_COUNT: usize = 10;

/// Salt indices are encoded as 4 big-endian bytes before digesting.
pub const SALT_BYTES: usize = 4;
/// Leading digest bytes folded into a hash value.
pub const HASH_PREFIX_BYTES: usize = 4;

pub const WORD_BITS: usize = 64;
