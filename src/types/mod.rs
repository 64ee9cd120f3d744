pub(crate) mod guard;
#[cfg(feature = "lifecycle")]
pub(crate) mod lifecycle;
