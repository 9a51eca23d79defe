use anyhow::Result;
use tracing::{info, warn};

use msgdrop_crypto::{TokenHashScheme, generate_token};
use msgdrop_types::api::{NewMessage, Reply};
use msgdrop_types::{MessageRecord, Outcome, Rejection};

use crate::identity::{PresentedToken, authenticate};
use crate::models::{IssuedToken, MessageRow};
use crate::queries::{insert_message, insert_user, query_unarchived_messages};
use crate::{Database, now};

pub const NEW_MESSAGE_OK: &str = "new message processed successfully";
pub const MESSAGES_QUERIED: &str = "Messages were queried!";
pub const USER_NOT_ACTIVE: &str = "User not active!";

impl Database {
    /// Create an activated user and issue its token.
    ///
    /// The returned token is the only copy that will ever exist; only its
    /// digest is stored. A taken name yields `Rejection::DuplicateUser`.
    pub fn create_user(&self, name: &str) -> Result<Outcome<IssuedToken>> {
        let token = generate_token();
        let scheme = TokenHashScheme::CURRENT;
        let token_hash = scheme.hash(&token);
        let created = now();

        let inserted = self.with_conn_mut(|conn| {
            insert_user(conn, name, &token_hash, scheme.tag(), &created, true)
        })?;

        match inserted {
            Some(user_id) => {
                info!("Created user '{}' (id {})", name, user_id);
                Ok(Ok(IssuedToken { user_id, token }))
            }
            None => {
                warn!("Refused to create user '{}': name already taken", name);
                Ok(Err(Rejection::DuplicateUser))
            }
        }
    }

    /// Store a message for the user the token belongs to. Nothing is written
    /// unless the token resolves and the user is activated.
    pub fn submit_message(&self, msg: &NewMessage) -> Result<Outcome<i64>> {
        let presented = PresentedToken::new(&msg.token);

        self.with_conn_mut(|conn| {
            let user_id = match authenticate(conn, &presented)? {
                Ok(id) => id,
                Err(rejection) => return Ok(Err(rejection)),
            };

            let row = MessageRow {
                id: 0,
                user_id,
                date: now(),
                topic: msg.topic.clone(),
                priority: msg.priority.clone(),
                details: msg.details.clone(),
                archived: false,
            };
            let id = insert_message(conn, &row)?;
            info!("Stored message {} for user {}", id, user_id);
            Ok(Ok(id))
        })
    }

    /// `submit_message` as a `(success, message, message_id)` reply.
    pub fn new_message(&self, msg: &NewMessage) -> Result<Reply<i64>> {
        Ok(new_message_reply(self.submit_message(msg)?))
    }

    /// Every unarchived message owned by the token's user, in insertion order.
    pub fn list_messages(&self, token: &str) -> Result<Outcome<Vec<MessageRecord>>> {
        let presented = PresentedToken::new(token);

        self.with_conn(|conn| {
            let user_id = match authenticate(conn, &presented)? {
                Ok(id) => id,
                Err(rejection) => return Ok(Err(rejection)),
            };
            let rows = query_unarchived_messages(conn, user_id)?;
            Ok(Ok(rows.into_iter().map(MessageRecord::from).collect()))
        })
    }

    /// `list_messages` as a `(success, message, rows)` reply.
    pub fn messages_by_token(&self, token: &str) -> Result<Reply<Vec<MessageRecord>>> {
        Ok(listing_reply(self.list_messages(token)?))
    }
}

pub fn new_message_reply(outcome: Outcome<i64>) -> Reply<i64> {
    match outcome {
        Ok(id) => Reply::ok(NEW_MESSAGE_OK, id),
        Err(rejection) => Reply::fail(rejection.to_string()),
    }
}

pub fn listing_reply(outcome: Outcome<Vec<MessageRecord>>) -> Reply<Vec<MessageRecord>> {
    match outcome {
        Ok(rows) => Reply::ok(MESSAGES_QUERIED, rows),
        Err(Rejection::UserNotActivated) => Reply::fail(USER_NOT_ACTIVE),
        Err(rejection) => Reply::fail(rejection.to_string()),
    }
}
