use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which identifier-client implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    /// Stateless hash derivation with an in-process observation set.
    #[default]
    Hash,
    /// Backed by a remote identifier service. Not available in this build.
    Remote,
}

impl ClientKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientKind::Hash => "hash",
            ClientKind::Remote => "remote",
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hash" => Ok(ClientKind::Hash),
            "remote" => Ok(ClientKind::Remote),
            other => Err(format!("unknown client kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub kind: ClientKind,
    /// Remember created analysis ids for later lookups.
    pub persist: bool,
}
