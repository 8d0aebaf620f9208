//! Compression engine contract.
//!
//! An engine is opened from [`Params`] by a [`Backend`], accepts pictures, and hands back
//! compressed output units. Engines may hold several pictures before emitting anything and
//! may emit output that belongs to an earlier picture; callers must not interpret the order.

/// Output unit list and unit views.
pub mod units;
/// YUV4MPEG2 reference engine.
pub mod y4m;

use crate::config::params::Params;
use crate::foundation::core::Csp;
use crate::foundation::error::VidpipeResult;
use crate::picture::Picture;
use units::UnitList;

/// Opens engines and owns picture allocation for them.
pub trait Backend {
    /// Engine handle type.
    type Engine: Engine;

    /// Allocate the picture an encoder reuses for every frame.
    fn alloc_picture(&self, csp: Csp, width: u32, height: u32) -> VidpipeResult<Picture> {
        Picture::alloc(csp, width, height)
    }

    /// Release a picture returned by [`Backend::alloc_picture`].
    fn release_picture(&self, picture: Picture) {
        drop(picture);
    }

    /// Open an engine configured by `params`.
    fn open(&self, params: &Params) -> VidpipeResult<Self::Engine>;
}

/// An open compression engine.
///
/// Every call clears `units` before appending to it and returns the number of units appended.
pub trait Engine {
    /// Emit the stream headers (parameter sets).
    fn headers(&mut self, units: &mut UnitList) -> VidpipeResult<usize>;

    /// Submit `picture`, or drain one buffered picture when `None`.
    ///
    /// Returning zero units for a submission means the picture was buffered.
    fn encode(&mut self, picture: Option<&Picture>, units: &mut UnitList) -> VidpipeResult<usize>;

    /// Pictures submitted but not yet emitted.
    fn delayed_frames(&self) -> usize;

    /// Close the handle.
    fn close(self)
    where
        Self: Sized,
    {
    }
}
