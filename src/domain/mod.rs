mod category;
mod expense;
mod money;

pub use category::*;
pub use expense::*;
pub use money::*;
