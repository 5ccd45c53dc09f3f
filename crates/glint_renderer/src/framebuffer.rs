//! 8-bit RGBA render target.
//!
//! Pixels are stored row-major, top row first: pixel `(x, y)` is at index
//! `y * width + x` and `y = 0` is the top of the image. [`Framebuffer::as_bytes`]
//! exposes the same order as a flat `R, G, B, A` byte slice, which is what
//! top-left-origin encoders expect. Encoders with a bottom-left origin can walk
//! [`Framebuffer::rows_bottom_up`] instead.

use bytemuck::{Pod, Zeroable};

/// One output pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Fixed-size grid of [`Rgba8`] pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Framebuffer {
    /// Channels per pixel.
    pub const CHANNELS: usize = 4;

    /// Create a new framebuffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        Self::CHANNELS
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba8) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Pixel data as `width * height * 4` bytes, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Rows from top to bottom, each `width * 4` bytes.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[u8]> + '_ {
        self.as_bytes()
            .chunks_exact((self.width as usize * Self::CHANNELS).max(1))
    }

    /// Rows from bottom to top, for encoders whose origin is the lower-left corner.
    pub fn rows_bottom_up(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.rows().rev()
    }
}
