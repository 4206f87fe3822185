pub mod attribute;
pub mod contract;
pub mod metadata;
pub mod part;
pub mod types;

pub use attribute::*;
pub use contract::*;
pub use metadata::*;
pub use part::*;
pub use types::*;
