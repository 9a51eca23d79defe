use sha3::{Digest, Sha3_512};
use subtle::ConstantTimeEq;

/// Number of times the token is fed into the SHA3-512 state.
pub const V1_ROUNDS: u32 = 100_000;

/// Versioned token hashing scheme. The tag is stored next to each digest so
/// a future scheme can coexist with tokens already issued under this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenHashScheme {
    /// SHA3-512, token bytes absorbed `V1_ROUNDS` times, lower-case hex.
    V1,
}

impl TokenHashScheme {
    pub const CURRENT: TokenHashScheme = TokenHashScheme::V1;

    pub fn tag(self) -> i64 {
        match self {
            TokenHashScheme::V1 => 1,
        }
    }

    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            1 => Some(TokenHashScheme::V1),
            _ => None,
        }
    }

    pub fn hash(self, token: &str) -> String {
        match self {
            TokenHashScheme::V1 => hash_token_v1(token),
        }
    }
}

/// Deliberately slow token digest.
///
/// This is not an iterated chain: the same token bytes are absorbed into one
/// running SHA3-512 state `V1_ROUNDS` times and the state is finalized once.
/// Changing anything here invalidates every issued token.
pub fn hash_token_v1(token: &str) -> String {
    let mut hasher = Sha3_512::new();
    for _ in 0..V1_ROUNDS {
        hasher.update(token.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Compare two byte strings without short-circuiting on the first difference.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_matches_issued_digests() {
        assert_eq!(
            hash_token_v1("x"),
            "39df3346f601264777cd64d09127ea84c834706a9f34767cd48108e74ba7a938\
             ee28cba17d36392b95684156186605f4e012a6bf970a8cca6a684427350df291"
        );
    }

    #[test]
    fn hash_is_deterministic_and_distinct() {
        let x = hash_token_v1("x");
        assert_eq!(x, hash_token_v1("x"));
        assert_ne!(x, hash_token_v1("y"));
        assert_eq!(x.len(), 128);
    }

    #[test]
    fn scheme_tag_round_trips() {
        let scheme = TokenHashScheme::CURRENT;
        assert_eq!(TokenHashScheme::from_tag(scheme.tag()), Some(scheme));
        assert_eq!(TokenHashScheme::from_tag(0), None);
        assert_eq!(scheme.hash("x"), hash_token_v1("x"));
    }

    #[test]
    fn constant_time_comparison() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"hellp"));
        assert!(!constant_time_eq(b"hello", b"hello!"));
    }
}
