//! Low-level value and rule parsing.

pub(crate) mod keywords;
pub(crate) mod media;
pub(crate) mod stylesheet;
pub(crate) mod transform;
pub(crate) mod values;
