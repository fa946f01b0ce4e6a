//! Remote location directory.
//!
//! The directory is the only durable state of a sync run. This module holds
//! the [`DirectoryClient`] abstraction, its REST implementation, the wire
//! types, and the per-tier [`RemoteSnapshot`].
//!
//! # REST interface
//!
//! ```text
//! GET   {base}?fields=fullPath,externalId&limit={max}  -> 200 {"result": [..]}
//! POST  {base}                                         -> 201
//! PATCH {base}/{externalId}                            -> 200
//! ```
//!
//! Any other status is a [`DirectoryError::Status`].

mod client;
mod error;
mod mock;
mod snapshot;
mod types;

pub use client::{DirectoryClient, DirectoryConfig, ReqwestDirectoryClient};
pub use error::{DirectoryError, DirectoryResult};
pub use mock::{DirectoryCall, DirectoryOperation, MockDirectoryClient};
pub use snapshot::RemoteSnapshot;
pub use types::{NodePayload, RemoteNode};
