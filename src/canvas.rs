//! Pixel surface the renderer draws on, with a text layer placed in pixel coordinates.

use anyhow::{ensure, Result};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// A block of pixels that can be blitted onto a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Image {
    pub fn solid(width: u32, height: u32, color: Rgb) -> Self {
        Image { width, height, pixels: vec![color; width as usize * height as usize] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.w && y < self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub fill: Rgb,
    /// Drawn behind the glyphs; `None` keeps the pixel color underneath.
    pub stroke: Option<Rgb>,
    pub bold: bool,
}

/// Text is laid out one glyph per pixel column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub x: u32,
    pub y: u32,
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    text: Vec<TextSpan>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "drawing surface must be non-empty, got {}x{} pixels",
            width,
            height
        );

        Ok(Canvas {
            width,
            height,
            pixels: vec![Rgb::default(); width as usize * height as usize],
            text: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the width, keeping existing pixels where the columns overlap.
    pub fn set_width(&mut self, width: u32) {
        if width == self.width {
            return;
        }

        let mut pixels = vec![Rgb::default(); width as usize * self.height as usize];
        let keep = width.min(self.width) as usize;
        for y in 0..self.height as usize {
            let src = y * self.width as usize;
            let dst = y * width as usize;
            pixels[dst..dst + keep].copy_from_slice(&self.pixels[src..src + keep]);
        }

        self.width = width;
        self.pixels = pixels;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        for y in rect.y..rect.y.saturating_add(rect.h) {
            for x in rect.x..rect.x.saturating_add(rect.w) {
                if let Some(i) = self.idx(x, y) {
                    self.pixels[i] = color;
                }
            }
        }
    }

    /// Blit `image` with its top-left corner at `(x, y)`, clipping at the edges.
    pub fn put_image(&mut self, image: &Image, x: u32, y: u32) {
        for dy in 0..image.height {
            for dx in 0..image.width {
                if let Some(i) = self.idx(x.saturating_add(dx), y.saturating_add(dy)) {
                    self.pixels[i] = image.pixels[(dy * image.width + dx) as usize];
                }
            }
        }
    }

    /// Place text anchored at `(x, y)`, truncated to `max_width` glyphs when given.
    pub fn fill_text(
        &mut self,
        text: &str,
        x: u32,
        y: u32,
        align: Align,
        max_width: Option<u32>,
        style: TextStyle,
    ) {
        let text: String = match max_width {
            Some(w) => text.chars().take(w as usize).collect(),
            None => text.to_string(),
        };
        let len = text.chars().count() as u32;
        let x = match align {
            Align::Left => x,
            Align::Center => x.saturating_sub(len / 2),
        };

        self.text.push(TextSpan { x, y, text, style });
    }

    /// Drop every text span that starts inside `rect`.
    pub fn clear_text(&mut self, rect: Rect) {
        self.text.retain(|span| !rect.contains(span.x, span.y));
    }

    pub fn text(&self) -> &[TextSpan] {
        &self.text
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const PLAIN: TextStyle = TextStyle { fill: Rgb::new(255, 255, 255), stroke: None, bold: false };

    #[test]
    fn empty_surface_is_rejected() {
        let err = Canvas::new(0, 10).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
        assert!(Canvas::new(10, 0).is_err());
    }

    #[test]
    fn put_image_clips_at_edges() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.put_image(&Image::solid(3, 3, RED), 2, 2);

        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(3, 3), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(Rgb::default()));
        assert_eq!(canvas.pixel(4, 4), None);
    }

    #[test]
    fn set_width_keeps_overlapping_pixels() {
        let mut canvas = Canvas::new(3, 2).unwrap();
        canvas.fill_rect(Rect::new(0, 0, 3, 2), RED);
        canvas.set_width(5);

        assert_eq!(canvas.width(), 5);
        assert_eq!(canvas.pixel(2, 1), Some(RED));
        assert_eq!(canvas.pixel(4, 1), Some(Rgb::default()));
    }

    #[test]
    fn centered_text_is_truncated_and_centered() {
        let mut canvas = Canvas::new(40, 10).unwrap();
        canvas.fill_text("Hello, world", 20, 5, Align::Center, Some(5), PLAIN);

        let span = &canvas.text()[0];
        assert_eq!(span.text, "Hello");
        assert_eq!(span.x, 18);
        assert_eq!(span.y, 5);
    }

    #[test]
    fn clear_text_only_removes_spans_inside_rect() {
        let mut canvas = Canvas::new(40, 10).unwrap();
        canvas.fill_text("a", 1, 1, Align::Left, None, PLAIN);
        canvas.fill_text("b", 30, 8, Align::Left, None, PLAIN);
        canvas.clear_text(Rect::new(0, 0, 10, 5));

        assert_eq!(canvas.text().len(), 1);
        assert_eq!(canvas.text()[0].text, "b");
    }
}
