//! Intermediate Representation (IR) for the registry
//!
//! Typed symbols, declarations, enumerations and commands. The registry
//! document is converted into these once at ingestion; resolution and
//! emission work on nothing else.

pub mod command;
pub mod decl;
pub mod enums;
pub mod feature;
pub mod symbol;
pub mod types;

pub use command::*;
pub use decl::*;
pub use enums::*;
pub use feature::*;
pub use symbol::*;
pub use types::*;
