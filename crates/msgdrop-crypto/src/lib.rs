//! Msgdrop token primitives
//!
//! Bearer tokens are handed to a user exactly once, at creation. Only a slow
//! one-way digest of the token is ever stored; lookups hash the presented
//! token again and compare digests.

pub mod hash;
pub mod token;

pub use hash::{TokenHashScheme, constant_time_eq, hash_token_v1};
pub use token::{MAX_TOKEN_LEN, generate_token};
