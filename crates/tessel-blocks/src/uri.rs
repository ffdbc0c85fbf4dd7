use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies a block family (`module:name`) and optionally one of its
/// variants (`module:name.identifier`). Comparison is case-insensitive; every
/// part is stored lowercase.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockUri {
    module: String,
    name: String,
    identifier: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("malformed block uri `{uri}`: {reason}")]
pub struct UriParseError {
    pub uri: String,
    pub reason: &'static str,
}

fn valid_part(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

impl BlockUri {
    pub fn new(module: &str, name: &str) -> Result<BlockUri, UriParseError> {
        let err = |reason| UriParseError {
            uri: format!("{}:{}", module, name),
            reason,
        };
        if !valid_part(module) {
            return Err(err("module must be non-empty [a-z0-9_-]"));
        }
        if !valid_part(name) {
            return Err(err("name must be non-empty [a-z0-9_-]"));
        }
        Ok(BlockUri {
            module: module.to_ascii_lowercase(),
            name: name.to_ascii_lowercase(),
            identifier: None,
        })
    }

    /// Same family, with the given variant identifier.
    pub fn with_identifier(&self, identifier: impl fmt::Display) -> BlockUri {
        BlockUri {
            module: self.module.clone(),
            name: self.name.clone(),
            identifier: Some(identifier.to_string().to_ascii_lowercase()),
        }
    }

    /// This URI with the variant identifier stripped.
    pub fn family_uri(&self) -> BlockUri {
        BlockUri {
            module: self.module.clone(),
            name: self.name.clone(),
            identifier: None,
        }
    }

    #[inline]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    #[inline]
    pub fn is_family(&self) -> bool {
        self.identifier.is_none()
    }

    /// True when `other` names this URI's family or one of its variants.
    pub fn same_family(&self, other: &BlockUri) -> bool {
        self.module == other.module && self.name == other.name
    }
}

impl fmt::Display for BlockUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)?;
        if let Some(id) = &self.identifier {
            write!(f, ".{}", id)?;
        }
        Ok(())
    }
}

impl FromStr for BlockUri {
    type Err = UriParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| UriParseError {
            uri: s.to_string(),
            reason,
        };
        let s = s.trim();
        let (family, identifier) = match s.split_once('.') {
            Some((f, id)) => (f, Some(id)),
            None => (s, None),
        };
        let (module, name) = family
            .split_once(':')
            .ok_or_else(|| err("expected `module:name`"))?;
        let uri = BlockUri::new(module, name).map_err(|e| err(e.reason))?;
        match identifier {
            None => Ok(uri),
            Some(id) if valid_part(id) => Ok(uri.with_identifier(id)),
            Some(_) => Err(err("identifier must be non-empty [a-z0-9_-]")),
        }
    }
}

impl TryFrom<String> for BlockUri {
    type Error = UriParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BlockUri> for String {
    fn from(uri: BlockUri) -> String {
        uri.to_string()
    }
}
