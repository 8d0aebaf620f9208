//! Streaming still-image to video encoding pipeline.
//!
//! Images are converted into a planar 4:2:0 [`Picture`], submitted to a compression
//! [`Engine`] and the units it returns are written to any [`std::io::Write`] sink.
//!
//! ```no_run
//! use vidpipe::{Encoder, Options, Y4mBackend};
//!
//! # fn main() -> vidpipe::VidpipeResult<()> {
//! let opts = Options::new(352, 288, 30);
//! let frame = image::RgbImage::new(352, 288);
//! let mut enc = Encoder::open(Y4mBackend::new(), &opts, Vec::new())?;
//! for _ in 0..30 {
//!     enc.encode(&frame)?;
//! }
//! enc.flush()?;
//! enc.close();
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod config;
mod convert;
mod encode;
pub mod engine;
mod foundation;
mod picture;

pub use config::options::{LogLevel, MIN_UNIT_CAPACITY, Options, Preset, Profile, Tune};
pub use config::params::Params;
pub use convert::converter::PixelConverter;
pub use convert::matrix::ColorMatrix;
pub use convert::source::{PixelLayout, RawImage, SourceImage};
pub use encode::encoder::{Encoder, EncoderStats};
pub use encode::writer::UnitWriter;
pub use engine::units::{Unit, UnitList};
pub use engine::y4m::{Y4mBackend, Y4mEngine};
pub use engine::{Backend, Engine};
pub use foundation::core::{ChromaLayout, Csp, chroma_dims};
pub use foundation::error::{ErrorKind, VidpipeError, VidpipeResult};
pub use picture::{PLANE_ALIGN, Picture, Plane};
