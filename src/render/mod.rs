//! Drawing surfaces and the frame painter.

/// CPU raster surface (`vello_cpu`).
pub mod cpu;
/// Rendered frame readback type.
pub mod frame;
pub(crate) mod painter;
/// Draw-call recording surface.
pub mod record;
/// The drawing surface contract.
pub mod surface;
