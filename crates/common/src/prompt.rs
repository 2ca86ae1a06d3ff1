use crate::error::{Error, Result};
use faststr::FastStr;
use std::fmt::Display;
use std::str::FromStr;

const TAILWIND_PROMPT: &str = include_str!("../prompts/tailwind.md");
const MULTI_LIBRARY_PROMPT: &str = include_str!("../prompts/multi_library.md");

/// Named system prompt variants. Chosen once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptProfile {
    #[default]
    Tailwind,
    MultiLibrary,
}

impl PromptProfile {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tailwind => "tailwind",
            Self::MultiLibrary => "multi-library",
        }
    }

    pub fn system_prompt(&self) -> FastStr {
        match self {
            Self::Tailwind => FastStr::from_static_str(TAILWIND_PROMPT),
            Self::MultiLibrary => FastStr::from_static_str(MULTI_LIBRARY_PROMPT),
        }
    }
}

impl Display for PromptProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PromptProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tailwind" => Ok(Self::Tailwind),
            "multi-library" | "multi_library" | "multi" => Ok(Self::MultiLibrary),
            other => Err(Error::InvalidConfig(
                "RELAY_PROMPT_PROFILE",
                other.to_owned().into(),
            )),
        }
    }
}
