use crate::config::{IdentifierPolicy, ModalConfig};
use crate::error::{ModalError, Result};

/// Builds the journal frame address for an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRoute {
    prefix: String,
    policy: IdentifierPolicy,
}

impl JournalRoute {
    pub fn new(prefix: impl Into<String>, policy: IdentifierPolicy) -> Self {
        Self {
            prefix: prefix.into(),
            policy,
        }
    }

    pub fn from_config(config: &ModalConfig) -> Self {
        Self::new(config.route_prefix.clone(), config.identifier_policy)
    }

    pub fn policy(&self) -> IdentifierPolicy {
        self.policy
    }

    /// Address of the journal view for `item_id`.
    pub fn address_for(&self, item_id: &str) -> Result<String> {
        match self.policy {
            IdentifierPolicy::Verbatim => Ok(format!("{}{}", self.prefix, item_id)),
            IdentifierPolicy::Encode => {
                Ok(format!("{}{}", self.prefix, urlencoding::encode(item_id)))
            }
            IdentifierPolicy::Strict => {
                if is_plain_identifier(item_id) {
                    Ok(format!("{}{}", self.prefix, item_id))
                } else {
                    Err(ModalError::InvalidIdentifier(item_id.to_string()))
                }
            }
        }
    }
}

impl Default for JournalRoute {
    fn default() -> Self {
        Self::from_config(&ModalConfig::default())
    }
}

fn is_plain_identifier(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
