pub mod error;
pub mod models;
pub mod provider;

// Re-export commonly used types
pub use error::{CompositionError, CompositionErrorKind, CompositionResult};
pub use models::*;
pub use provider::{
    AttributeProvider, AttributeProviderExt, AttributeProviderPtr, AttributeTarget,
    InheritanceProvider, MemberProvider, TypeProvider, TypeSystem, TypeSystemPtr,
};
