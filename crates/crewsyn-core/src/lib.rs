pub mod attributes;
pub mod duo;
pub mod error;
pub mod member;
pub mod team;

pub use attributes::*;
pub use duo::*;
pub use error::SynergyError;
pub use member::*;
pub use team::*;
