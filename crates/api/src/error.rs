/// A structural defect in the declarations of an inspected type.
///
/// Every variant names the contract, the exporting member and the part, so a
/// host can attribute the failure without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    #[error("Exported contract type '{contract}' is not assignable from part '{part}'")]
    ContractNotAssignable {
        contract: String,
        member: String,
        part: String,
    },
    #[error(
        "Exported contract type '{contract}' is not assignable from property '{member}' of part '{part}'"
    )]
    ExportedContractTypeNotAssignable {
        contract: String,
        member: String,
        part: String,
    },
    #[error("Open generic part '{part}' cannot export non-generic contract '{contract}'")]
    NonGenericContractFromGenericPart {
        contract: String,
        member: String,
        part: String,
    },
    #[error(
        "Exported contract '{contract}' of open generic part '{part}' does not match the generic arguments of the class"
    )]
    GenericArgumentMismatch {
        contract: String,
        member: String,
        part: String,
    },
    #[error(
        "Exported member '{member}' of part '{part}' is not compatible with contract '{contract}'"
    )]
    ExportNotCompatible {
        contract: String,
        member: String,
        part: String,
    },
    #[error(
        "Type hierarchy of '{member}' in part '{part}' is too deep to check contract '{contract}'"
    )]
    HierarchyTooDeep {
        contract: String,
        member: String,
        part: String,
    },
    /// For part-level metadata `member` and `contract` both name the part type.
    #[error(
        "Metadata '{name}' of member '{member}' of part '{part}' mixes values of different types"
    )]
    MetadataTypeMismatch {
        name: String,
        contract: String,
        member: String,
        part: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionErrorKind {
    ContractNotAssignable,
    ExportedContractTypeNotAssignable,
    NonGenericContractFromGenericPart,
    GenericArgumentMismatch,
    ExportNotCompatible,
    HierarchyTooDeep,
    MetadataTypeMismatch,
}

impl CompositionError {
    pub fn kind(&self) -> CompositionErrorKind {
        match self {
            Self::ContractNotAssignable { .. } => CompositionErrorKind::ContractNotAssignable,
            Self::ExportedContractTypeNotAssignable { .. } => {
                CompositionErrorKind::ExportedContractTypeNotAssignable
            }
            Self::NonGenericContractFromGenericPart { .. } => {
                CompositionErrorKind::NonGenericContractFromGenericPart
            }
            Self::GenericArgumentMismatch { .. } => CompositionErrorKind::GenericArgumentMismatch,
            Self::ExportNotCompatible { .. } => CompositionErrorKind::ExportNotCompatible,
            Self::HierarchyTooDeep { .. } => CompositionErrorKind::HierarchyTooDeep,
            Self::MetadataTypeMismatch { .. } => CompositionErrorKind::MetadataTypeMismatch,
        }
    }

    /// Name of the type whose declarations are at fault.
    pub fn part(&self) -> &str {
        match self {
            Self::ContractNotAssignable { part, .. }
            | Self::ExportedContractTypeNotAssignable { part, .. }
            | Self::NonGenericContractFromGenericPart { part, .. }
            | Self::GenericArgumentMismatch { part, .. }
            | Self::ExportNotCompatible { part, .. }
            | Self::HierarchyTooDeep { part, .. }
            | Self::MetadataTypeMismatch { part, .. } => part,
        }
    }

    pub fn contract(&self) -> &str {
        match self {
            Self::ContractNotAssignable { contract, .. }
            | Self::ExportedContractTypeNotAssignable { contract, .. }
            | Self::NonGenericContractFromGenericPart { contract, .. }
            | Self::GenericArgumentMismatch { contract, .. }
            | Self::ExportNotCompatible { contract, .. }
            | Self::HierarchyTooDeep { contract, .. }
            | Self::MetadataTypeMismatch { contract, .. } => contract,
        }
    }

    pub fn member(&self) -> &str {
        match self {
            Self::ContractNotAssignable { member, .. }
            | Self::ExportedContractTypeNotAssignable { member, .. }
            | Self::NonGenericContractFromGenericPart { member, .. }
            | Self::GenericArgumentMismatch { member, .. }
            | Self::ExportNotCompatible { member, .. }
            | Self::HierarchyTooDeep { member, .. }
            | Self::MetadataTypeMismatch { member, .. } => member,
        }
    }
}

pub type CompositionResult<T> = std::result::Result<T, CompositionError>;
