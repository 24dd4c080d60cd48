/*
[INPUT]:  Parsed resource records and the transport
[OUTPUT]: Resource wrappers with follow-up calls scoped to each resource
[POS]:    Resource layer - User, Node, Transaction, Subscription and their collections
[UPDATE]: When adding resource kinds or follow-up operations
*/

mod collection;
mod node;
mod subscription;
mod transaction;
mod user;

use serde::de::DeserializeOwned;

use crate::http::HttpClient;

pub use collection::Collection;
pub use node::Node;
pub use subscription::Subscription;
pub(crate) use subscription::update as update_subscription;
pub use transaction::Transaction;
pub use user::User;

pub type Users = Collection<User>;
pub type Nodes = Collection<Node>;
pub type Transactions = Collection<Transaction>;
pub type Subscriptions = Collection<Subscription>;

/// A wrapper built from a parsed record plus the transport for follow-up calls.
///
/// Construction never performs I/O.
pub trait Resource: Sized {
    type Data: DeserializeOwned;

    fn from_data(data: Self::Data, http: HttpClient) -> Self;

    /// Parse a response body and wrap it
    fn from_value(value: serde_json::Value, http: HttpClient) -> crate::http::Result<Self> {
        let data = serde_json::from_value(value)?;
        Ok(Self::from_data(data, http))
    }
}
