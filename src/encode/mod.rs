pub(crate) mod encoder;
pub(crate) mod writer;
