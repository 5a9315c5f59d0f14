//! Software drawing primitives over `image::RgbaImage`.
//!
//! Coordinates are signed so shapes may hang off any edge; everything is clipped to
//! the image bounds. Pixels are overwritten, not blended.

pub mod font;

use image::{Rgba, RgbaImage};

pub use font::{GLYPH_SIZE, draw_text, text_width};

/// Clips the span `[start, start + len)` to `[0, limit)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clip(start: i64, len: u32, limit: u32) -> Option<(u32, u32)> {
    let lo = start.max(0);
    let hi = start.saturating_add(i64::from(len)).min(i64::from(limit));
    (lo < hi).then_some((lo as u32, hi as u32))
}

pub fn fill(image: &mut RgbaImage, color: Rgba<u8>) {
    for pixel in image.pixels_mut() {
        *pixel = color;
    }
}

pub fn fill_rect(image: &mut RgbaImage, position: (i64, i64), size: (u32, u32), color: Rgba<u8>) {
    let (Some((x0, x1)), Some((y0, y1))) = (
        clip(position.0, size.0, image.width()),
        clip(position.1, size.1, image.height()),
    ) else {
        return;
    };

    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

/// Rectangle outline drawn inside the given bounds.
pub fn stroke_rect(
    image: &mut RgbaImage,
    position: (i64, i64),
    size: (u32, u32),
    thickness: u32,
    color: Rgba<u8>,
) {
    let (x, y) = position;
    let (w, h) = size;
    let t = thickness.min(w).min(h);
    if t == 0 {
        return;
    }

    fill_rect(image, (x, y), (w, t), color);
    fill_rect(image, (x, y + i64::from(h - t)), (w, t), color);
    fill_rect(image, (x, y), (t, h), color);
    fill_rect(image, (x + i64::from(w - t), y), (t, h), color);
}

/// Filled circle, inclusive of the radius.
pub fn draw_disc(image: &mut RgbaImage, center: (i64, i64), radius: u32, color: Rgba<u8>) {
    let r = i64::from(radius);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put_clipped(image, center.0 + dx, center.1 + dy, color);
            }
        }
    }
}

/// Line of roughly `thickness` pixels, stamped with discs along a Bresenham walk.
///
/// The segment is first clipped to the image grown by the stroke radius, so the walk
/// never leaves the visible area.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_line(
    image: &mut RgbaImage,
    from: (i64, i64),
    to: (i64, i64),
    thickness: u32,
    color: Rgba<u8>,
) {
    let radius = thickness / 2;
    let margin = f64::from(radius);
    let bounds = (
        (-margin, -margin),
        (
            f64::from(image.width()) - 1.0 + margin,
            f64::from(image.height()) - 1.0 + margin,
        ),
    );
    let Some((start, end)) = clip_segment(from, to, bounds) else {
        return;
    };
    let from = (start.0.round() as i64, start.1.round() as i64);
    let to = (end.0.round() as i64, end.1.round() as i64);

    let (mut x, mut y) = from;
    let dx = (to.0 - from.0).abs();
    let dy = -(to.1 - from.1).abs();
    let sx = if from.0 < to.0 { 1 } else { -1 };
    let sy = if from.1 < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        draw_disc(image, (x, y), radius, color);
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Liang-Barsky clip of the segment to the box `(min, max)`; `None` when it misses.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
fn clip_segment(
    from: (i64, i64),
    to: (i64, i64),
    (min, max): ((f64, f64), (f64, f64)),
) -> Option<((f64, f64), (f64, f64))> {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [
        (-dx, x0 - min.0),
        (dx, max.0 - x0),
        (-dy, y0 - min.1),
        (dy, max.1 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (x0 + t0 * dx, y0 + t0 * dy),
        (x0 + t1 * dx, y0 + t1 * dy),
    ))
}

/// Nearest-neighbour copy of `source`, scaled to `size`, with its top-left at `position`.
pub fn blit_scaled(
    image: &mut RgbaImage,
    source: &RgbaImage,
    position: (i64, i64),
    size: (u32, u32),
) {
    let (sw, sh) = source.dimensions();
    if sw == 0 || sh == 0 {
        return;
    }
    let (Some((x0, x1)), Some((y0, y1))) = (
        clip(position.0, size.0, image.width()),
        clip(position.1, size.1, image.height()),
    ) else {
        return;
    };

    for y in y0..y1 {
        let local_y = u64::try_from(i64::from(y) - position.1).unwrap_or(0);
        let src_y = scale_index(local_y, size.1, sh);
        for x in x0..x1 {
            let local_x = u64::try_from(i64::from(x) - position.0).unwrap_or(0);
            let src_x = scale_index(local_x, size.0, sw);
            image.put_pixel(x, y, *source.get_pixel(src_x, src_y));
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scale_index(local: u64, dest_len: u32, source_len: u32) -> u32 {
    let index = local * u64::from(source_len) / u64::from(dest_len.max(1));
    index.min(u64::from(source_len - 1)) as u32
}

fn put_clipped(image: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
        if x < image.width() && y < image.height() {
            image.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn count(image: &RgbaImage, color: Rgba<u8>) -> usize {
        image.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut image = RgbaImage::new(10, 10);
        fill_rect(&mut image, (-5, 8), (10, 10), RED);

        assert_eq!(count(&image, RED), 5 * 2);
        assert_eq!(*image.get_pixel(4, 9), RED);
        assert_eq!(*image.get_pixel(5, 9), CLEAR);
    }

    #[test]
    fn test_fill_rect_fully_outside() {
        let mut image = RgbaImage::new(4, 4);
        fill_rect(&mut image, (10, 10), (5, 5), RED);
        fill_rect(&mut image, (-10, 0), (5, 5), RED);
        assert_eq!(count(&image, RED), 0);
    }

    #[test]
    fn test_stroke_rect() {
        let mut image = RgbaImage::new(10, 10);
        stroke_rect(&mut image, (0, 0), (10, 10), 2, RED);

        assert_eq!(count(&image, RED), 100 - 36);
        assert_eq!(*image.get_pixel(5, 5), CLEAR);
        assert_eq!(*image.get_pixel(9, 9), RED);
    }

    #[test]
    fn test_disc() {
        let mut image = RgbaImage::new(9, 9);
        draw_disc(&mut image, (4, 4), 2, RED);

        assert_eq!(count(&image, RED), 13);
        assert_eq!(*image.get_pixel(6, 4), RED);
        assert_eq!(*image.get_pixel(6, 6), CLEAR);
    }

    #[test]
    fn test_line_covers_endpoints() {
        let mut image = RgbaImage::new(20, 20);
        draw_line(&mut image, (2, 3), (17, 11), 1, RED);

        assert_eq!(*image.get_pixel(2, 3), RED);
        assert_eq!(*image.get_pixel(17, 11), RED);
    }

    #[test]
    fn test_thick_horizontal_line() {
        let mut image = RgbaImage::new(20, 20);
        draw_line(&mut image, (5, 10), (15, 10), 5, RED);

        for y in 8..=12 {
            assert_eq!(*image.get_pixel(10, y), RED);
        }
        assert_eq!(*image.get_pixel(10, 13), CLEAR);
    }

    #[test]
    fn test_line_to_distant_point_is_clipped() {
        let mut image = RgbaImage::new(50, 50);
        draw_line(&mut image, (10, 20), (20_000_000, 20), 1, RED);

        assert_eq!(*image.get_pixel(10, 20), RED);
        assert_eq!(*image.get_pixel(49, 20), RED);
        assert_eq!(*image.get_pixel(9, 20), CLEAR);
        assert_eq!(count(&image, RED), 40);
    }

    #[test]
    fn test_line_with_extreme_endpoints() {
        // Only termination matters here; f64 cannot resolve single pixels at this range.
        let mut image = RgbaImage::new(20, 20);
        draw_line(&mut image, (i64::MIN, 10), (i64::MAX, 10), 1, RED);
        assert!(image.enumerate_pixels().all(|(_, y, p)| y == 10 || *p == CLEAR));

        let mut image = RgbaImage::new(20, 20);
        draw_line(&mut image, (-1_000, -1_000), (-500, 5_000), 3, RED);
        assert_eq!(count(&image, RED), 0);
    }

    #[test]
    fn test_blit_scaled_doubles() {
        let mut source = RgbaImage::new(2, 1);
        source.put_pixel(1, 0, RED);

        let mut image = RgbaImage::new(6, 4);
        blit_scaled(&mut image, &source, (1, 1), (4, 2));

        assert_eq!(*image.get_pixel(1, 1), CLEAR);
        assert_eq!(*image.get_pixel(2, 2), CLEAR);
        assert_eq!(*image.get_pixel(3, 1), RED);
        assert_eq!(*image.get_pixel(4, 2), RED);
        assert_eq!(count(&image, RED), 4);
    }

    #[test]
    fn test_fill() {
        let mut image = RgbaImage::new(3, 3);
        fill(&mut image, RED);
        assert_eq!(count(&image, RED), 9);
    }
}
