pub mod consts;
pub mod errors;
pub mod digest;
pub mod serializer;
pub mod hash_family;
pub mod bits;
pub mod filter;
pub mod sizing;

pub use bits::BitArray;
pub use digest::{DigestAlgorithm, SeededDigest};
pub use errors::{FilterError, Result};
pub use filter::MembershipFilter;
pub use hash_family::{
    HashFamily, HashFamilyConfig, HashFamilyOverrides, HashFunction, SaltedHash,
};
pub use serializer::{BytesSerializer, DisplaySerializer, ElementSerializer, FnSerializer};
