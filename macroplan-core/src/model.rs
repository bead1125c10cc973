//! Model collaborator seam.
//!
//! The core never constructs or owns a model client; callers inject one
//! wherever a generative step is needed.

use crate::error::MacroPlanResult;
use async_trait::async_trait;
use serde_json::Value;

/// A generative-model collaborator: prompt in, parsed JSON out.
///
/// Implementations own transport, authentication, and response decoding.
/// A reply that cannot be decoded as JSON must surface as
/// [`crate::MacroPlanError::Model`], never as a partial value; retry
/// policy belongs to the caller, not the implementation.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn query(&self, prompt: &str) -> MacroPlanResult<Value>;
}
