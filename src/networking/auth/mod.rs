pub mod credentials;
pub mod types;

pub use credentials::*;
pub use types::*;
