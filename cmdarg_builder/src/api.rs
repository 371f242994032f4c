mod capture;
mod core;
pub(crate) mod field;
mod parameter;
mod value;

pub use self::capture::*;
pub use self::core::*;
pub use self::field::{List, Scalar, Switch};
pub use self::parameter::*;
pub use self::value::*;
