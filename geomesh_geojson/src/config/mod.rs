mod conversion;
mod property;

pub use conversion::*;
pub use property::*;
