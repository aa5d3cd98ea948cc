pub mod artifact;
pub mod plan;
pub mod template;

pub use artifact::*;
pub use plan::*;
pub use template::*;
