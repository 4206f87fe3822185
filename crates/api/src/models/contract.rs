use super::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity under which an export is supplied: contract type plus optional name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractKey {
    contract_type: TypeRef,
    contract_name: Option<String>,
}

impl ContractKey {
    /// An empty name is the same contract as no name.
    pub fn new(contract_type: TypeRef, contract_name: Option<String>) -> Self {
        Self {
            contract_type,
            contract_name: contract_name.filter(|name| !name.is_empty()),
        }
    }

    pub fn unnamed(contract_type: TypeRef) -> Self {
        Self::new(contract_type, None)
    }

    pub fn contract_type(&self) -> &TypeRef {
        &self.contract_type
    }

    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref()
    }

    pub fn with_contract_type(&self, contract_type: TypeRef) -> Self {
        Self {
            contract_type,
            contract_name: self.contract_name.clone(),
        }
    }
}

impl fmt::Display for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.contract_name {
            Some(name) => write!(f, "{} \"{}\"", self.contract_type, name),
            None => write!(f, "{}", self.contract_type),
        }
    }
}
