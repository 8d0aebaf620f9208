pub(crate) mod converter;
pub(crate) mod matrix;
pub(crate) mod source;
