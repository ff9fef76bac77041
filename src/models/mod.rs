pub mod complaint;
pub mod directory;

pub use complaint::*;
pub use directory::*;
