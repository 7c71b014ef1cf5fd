use ndarray::{ArrayView3, ArrayViewMut3};

/// Channel ordering of a frame's pixel data.
///
/// The transport layer (ffmpeg readers/writers, the capture worker) speaks
/// `Bgr`; the detector contract is `Rgb`. Keeping the ordering on the frame
/// itself makes the conversion points explicit instead of an implicit
/// convention between modules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Bgr,
}

/// A single video frame: contiguous 3-channel bytes in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: PixelFormat, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 3,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            format,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Converts this frame into the given channel ordering.
    ///
    /// Converting to the current format is a no-op and preserves the pixel
    /// buffer byte-for-byte; converting between `Rgb` and `Bgr` swaps the
    /// first and third channel of every pixel in place.
    pub fn into_format(mut self, format: PixelFormat) -> Frame {
        if self.format != format {
            for px in self.data.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
            self.format = format;
        }
        self
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, 3)
    }
}
