mod buffer;

/// Integer pixel position. May lie outside a surface; drawing clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width-1] x [0, height-1]`.
    pub fn clamp_to(self, (width, height): (u32, u32)) -> Point {
        let max_x = width.saturating_sub(1).min(i32::MAX as u32) as i32;
        let max_y = height.saturating_sub(1).min(i32::MAX as u32) as i32;
        Point {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
        }
    }
}

/// Minimal drawing capability the input machine needs from a buffer.
///
/// Backends only provide bounds and single-pixel writes; the shapes are
/// computed here so every surface covers exactly the same pixel set for
/// the same call. That is what keeps the preview and both maps aligned.
pub trait RasterSurface {
    type Value: Copy;

    /// Returns (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Write one in-bounds pixel.
    fn put(&mut self, x: u32, y: u32, value: Self::Value);

    /// Unfilled rectangle between two inclusive corners given in any order.
    /// Additional rings of `thickness` grow inward.
    fn draw_rect_outline(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        value: Self::Value,
        thickness: u32,
    ) {
        let bounds = self.dimensions();
        for (x, y) in outline_coverage(top_left, bottom_right, thickness, bounds) {
            self.put(x, y, value);
        }
    }

    /// Filled disc of `radius` around `center`, clipped to bounds.
    fn draw_disc(&mut self, center: Point, radius: u32, value: Self::Value) {
        let bounds = self.dimensions();
        for (x, y) in disc_coverage(center, radius, bounds) {
            self.put(x, y, value);
        }
    }
}

/// Pixels with `(px-cx)^2 + (py-cy)^2 <= r^2`, clipped to `(width, height)`.
///
/// Only the part of the bounding box inside the surface is visited.
pub fn disc_coverage(
    center: Point,
    radius: u32,
    (width, height): (u32, u32),
) -> impl Iterator<Item = (u32, u32)> {
    let r = radius as i64;
    let r2 = (radius as i128) * (radius as i128);
    let (cx, cy) = (center.x as i64, center.y as i64);
    let (w, h) = (width as i64, height as i64);

    let xs = (-r).max(-cx)..=r.min(w - 1 - cx);
    let ys = (-r).max(-cy)..=r.min(h - 1 - cy);

    ys.flat_map(move |dy| {
        xs.clone().filter_map(move |dx| {
            let d2 = (dx as i128) * (dx as i128) + (dy as i128) * (dy as i128);
            (d2 <= r2).then_some(((cx + dx) as u32, (cy + dy) as u32))
        })
    })
}

/// Border pixels of the rectangle spanned by two inclusive corners.
pub fn outline_coverage(
    a: Point,
    b: Point,
    thickness: u32,
    (width, height): (u32, u32),
) -> Vec<(u32, u32)> {
    let (w, h) = (width as i64, height as i64);
    let mut left = a.x.min(b.x) as i64;
    let mut right = a.x.max(b.x) as i64;
    let mut top = a.y.min(b.y) as i64;
    let mut bottom = a.y.max(b.y) as i64;

    let mut pixels = Vec::new();
    let mut push = |x: i64, y: i64| {
        if x >= 0 && y >= 0 && x < w && y < h {
            pixels.push((x as u32, y as u32));
        }
    };

    for _ in 0..thickness.max(1) {
        if left > right || top > bottom {
            break;
        }
        for x in left..=right {
            push(x, top);
            push(x, bottom);
        }
        for y in top + 1..bottom {
            push(left, y);
            push(right, y);
        }
        left += 1;
        right -= 1;
        top += 1;
        bottom -= 1;
    }

    pixels
}
