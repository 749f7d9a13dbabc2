//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::SharedRequester;

/// Fetch a single entity by ID.
///
/// Implementations translate a transport 404 into
/// [`RedditError::NotFound`](crate::RedditError::NotFound); the tree
/// builders underneath assume a successful fetch.
///
/// # Example
///
/// ```ignore
/// use redtree::{Get, RedditClient, SubmissionNode, ThreadQuery};
///
/// let client = RedditClient::from_env()?.shared();
/// let tree = SubmissionNode::get(&client, ("abc123".to_string(), ThreadQuery::default())).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &SharedRequester, id: Self::Id) -> Result<Self>;
}
