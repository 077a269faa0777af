//! Deterministic identifier allocation.
//!
//! Donor, specimen, sample, file and mutation ids are a family prefix plus a
//! digest of the caller's business keys; object ids are name-based UUIDs.
//! Neither needs storage: the same keys give the same id in every process.
//! Analysis ids are caller-chosen or random, and [`client::HashIdClient`] can
//! remember the ones it has handed out for the lifetime of the instance.

pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod observed;
pub mod output;
pub mod retry;
pub mod types;
pub mod validate;

pub use client::{HashIdClient, IdClient, connect};
pub use config::{ClientConfig, ClientKind};
pub use error::IdError;
pub use types::{IdFamily, IssuedId, MutationKey};
