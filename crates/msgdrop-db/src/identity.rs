use anyhow::Result;
use rusqlite::Connection;
use tracing::{debug, warn};

use msgdrop_crypto::{MAX_TOKEN_LEN, TokenHashScheme, constant_time_eq};
use msgdrop_types::{Outcome, Rejection, UserId};

use crate::Database;
use crate::queries::query_user_by_token_hash;

/// A presented token, already run through the current hash scheme.
///
/// Hashing is the expensive step, so it happens once, before the connection
/// lock is taken. Tokens longer than `MAX_TOKEN_LEN` are never hashed and
/// never resolve.
pub(crate) struct PresentedToken {
    scheme: TokenHashScheme,
    digest: Option<String>,
}

impl PresentedToken {
    pub(crate) fn new(token: &str) -> Self {
        let scheme = TokenHashScheme::CURRENT;
        let digest = if token.len() > MAX_TOKEN_LEN {
            debug!("Refusing to hash a {} byte token", token.len());
            None
        } else {
            Some(scheme.hash(token))
        };
        Self { scheme, digest }
    }
}

/// An account the token resolved to.
pub(crate) struct Account {
    pub id: UserId,
    pub activated: bool,
}

impl Database {
    /// Resolve a raw token to the id of the user it was issued to.
    pub fn resolve_token(&self, token: &str) -> Result<Option<UserId>> {
        let presented = PresentedToken::new(token);
        let account = self.with_conn(|conn| lookup(conn, &presented))?;
        Ok(account.map(|a| a.id))
    }
}

pub(crate) fn lookup(conn: &Connection, presented: &PresentedToken) -> Result<Option<Account>> {
    let Some(digest) = presented.digest.as_deref() else {
        return Ok(None);
    };
    let Some(user) = query_user_by_token_hash(conn, digest)? else {
        return Ok(None);
    };

    // The stored tag decides which scheme produced the stored digest.
    let Some(stored_scheme) = TokenHashScheme::from_tag(user.token_scheme) else {
        warn!("User {} has unknown token scheme {}", user.id, user.token_scheme);
        return Ok(None);
    };
    if stored_scheme != presented.scheme
        || !constant_time_eq(user.token_hash.as_bytes(), digest.as_bytes())
    {
        return Ok(None);
    }

    Ok(Some(Account {
        id: user.id,
        activated: user.activated,
    }))
}

/// Resolve the token and enforce the activation gate.
pub(crate) fn authenticate(conn: &Connection, presented: &PresentedToken) -> Result<Outcome<UserId>> {
    match lookup(conn, presented)? {
        None => {
            debug!("Token did not resolve to any user");
            Ok(Err(Rejection::UnknownToken))
        }
        Some(account) if !account.activated => {
            debug!("User {} is not activated", account.id);
            Ok(Err(Rejection::UserNotActivated))
        }
        Some(account) => Ok(Ok(account.id)),
    }
}
