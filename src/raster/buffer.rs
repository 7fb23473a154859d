use super::RasterSurface;
use image::{ImageBuffer, Pixel};

/// Software backend: any owned `image` buffer (preview `RgbImage`,
/// `GrayImage` maps) is a raster surface.
impl<P: Pixel> RasterSurface for ImageBuffer<P, Vec<P::Subpixel>> {
    type Value = P;

    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn put(&mut self, x: u32, y: u32, value: P) {
        self.put_pixel(x, y, value);
    }
}
