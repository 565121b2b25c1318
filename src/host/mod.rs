pub mod localization;
pub mod memory;
pub mod traits;

pub use localization::*;
pub use memory::*;
pub use traits::*;
