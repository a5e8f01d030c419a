/// A rendered frame as RGBA8 pixels.
///
/// Frames read back from [`crate::render::cpu::CpuSurface`] are premultiplied alpha; the flag
/// makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in device pixels.
    pub width: u32,
    /// Frame height in device pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Zero-sized frame.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
            premultiplied: true,
        }
    }

    /// RGBA bytes of the pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
