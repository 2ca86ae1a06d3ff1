use faststr::FastStr;
use serde::{Deserialize, Serialize};

/// Well-known chat roles. Incoming roles are not checked against these,
/// the provider is the one that rejects unknown roles.
pub mod role {
    pub const SYSTEM: &str = "system";
    pub const USER: &str = "user";
    pub const ASSISTANT: &str = "assistant";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    pub role:    FastStr,
    pub content: FastStr,
}

impl Message {
    pub fn new<R, C>(role: R, content: C) -> Self
    where
        R: Into<FastStr>,
        C: Into<FastStr>,
    {
        Self {
            role:    role.into(),
            content: content.into(),
        }
    }

    pub fn system<C: Into<FastStr>>(content: C) -> Self {
        Self::new(role::SYSTEM, content)
    }

    pub fn user<C: Into<FastStr>>(content: C) -> Self {
        Self::new(role::USER, content)
    }

    pub fn assistant<C: Into<FastStr>>(content: C) -> Self {
        Self::new(role::ASSISTANT, content)
    }

    pub fn is_system(&self) -> bool {
        self.role == role::SYSTEM
    }
}
