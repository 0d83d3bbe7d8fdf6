// src/icon.rs
use crate::error::IconError;
use crate::text::draw_label;
use crate::utils::*;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::{self, Write};
use std::path::Path;

pub const BACKGROUND: Rgb<u8> = hex_rgb(0x10b981);
pub const BODY: Rgb<u8> = hex_rgb(0xffffff);
pub const LEAF: Rgb<u8> = hex_rgb(0x34d399);
pub const LABEL: &str = "NP";

/// Padding around the body is `size / PADDING_DIVISOR`
pub const PADDING_DIVISOR: u32 = 8;
/// Body top is pushed down by an extra `size / BODY_DROP_DIVISOR`
pub const BODY_DROP_DIVISOR: u32 = 10;
pub const LEAF_SIZE_DIVISOR: u32 = 6;
/// Leaf starts `size / LEAF_OFFSET_DIVISOR` right of the center line
pub const LEAF_OFFSET_DIVISOR: u32 = 8;
pub const FONT_SIZE_DIVISOR: u32 = 3;
pub const LABEL_DROP_DIVISOR: u32 = 10;

/// Icons written by the generator
pub const ICON_TARGETS: [(u32, &str); 2] = [(192, "icon-192x192.png"), (512, "icon-512x512.png")];

#[derive(Debug, Clone, PartialEq)]
pub struct IconStyle {
    pub background: Rgb<u8>,
    pub body: Rgb<u8>,
    pub leaf: Rgb<u8>,
    pub label_color: Rgb<u8>,
    pub label: String,
}

impl Default for IconStyle {
    fn default() -> Self {
        IconStyle {
            background: BACKGROUND,
            body: BODY,
            leaf: LEAF,
            label_color: BACKGROUND,
            label: LABEL.to_string(),
        }
    }
}

/// Shape layout for one icon size, all integer division
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconGeometry {
    pub size: u32,
    pub body: BoundingBox,
    pub leaf: BoundingBox,
    pub font_size: u32,
    pub label_drop: u32,
}

impl IconGeometry {
    pub fn for_size(size: u32) -> Self {
        let padding = size / PADDING_DIVISOR;
        let leaf_size = size / LEAF_SIZE_DIVISOR;
        let leaf_x = size / 2 + size / LEAF_OFFSET_DIVISOR;

        IconGeometry {
            size,
            body: BoundingBox::new(
                padding,
                padding + size / BODY_DROP_DIVISOR,
                size - padding,
                size - padding,
            ),
            leaf: BoundingBox::new(leaf_x, padding, leaf_x + leaf_size, padding + leaf_size),
            font_size: size / FONT_SIZE_DIVISOR,
            label_drop: size / LABEL_DROP_DIVISOR,
        }
    }
}

/// Draw the icon in memory. Label failures are logged and skipped.
pub fn draw_icon(size: u32, style: &IconStyle) -> Result<RgbImage, IconError> {
    if size == 0 {
        return Err(IconError::InvalidSize(size));
    }

    let geometry = IconGeometry::for_size(size);
    log::debug!("geometry for {}px: {:?}", size, geometry);

    let mut img = RgbImage::from_pixel(size, size, style.background);
    let (x_grid, y_grid) = pixel_grid(size);

    let body = ellipse_mask(&x_grid, &y_grid, &geometry.body);
    fill_mask(&mut img, &body, style.body);

    let leaf = ellipse_mask(&x_grid, &y_grid, &geometry.leaf);
    fill_mask(&mut img, &leaf, style.leaf);

    if let Err(e) = draw_label(
        &mut img,
        &style.label,
        geometry.font_size,
        geometry.label_drop,
        style.label_color,
    ) {
        log::warn!("skipping label on {}px icon: {}", size, e);
    }

    Ok(img)
}

/// Confirmation line printed after each icon is written
pub fn announce(out: &mut impl Write, output_path: &Path) -> io::Result<()> {
    writeln!(out, "Created {}", output_path.display())
}

/// Write the icon as PNG, replacing any existing file, then announce it on `out`.
pub fn render_to(
    size: u32,
    output_path: impl AsRef<Path>,
    style: &IconStyle,
    out: &mut impl Write,
) -> Result<(), IconError> {
    let output_path = output_path.as_ref();
    let img = draw_icon(size, style)?;
    img.save_with_format(output_path, ImageFormat::Png)?;

    log::info!("wrote {}x{} icon to {}", size, size, output_path.display());
    announce(out, output_path)?;
    Ok(())
}

pub fn render_with(
    size: u32,
    output_path: impl AsRef<Path>,
    style: &IconStyle,
) -> Result<(), IconError> {
    render_to(size, output_path, style, &mut io::stdout().lock())
}

pub fn render(size: u32, output_path: impl AsRef<Path>) -> Result<(), IconError> {
    render_with(size, output_path, &IconStyle::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn body_only_mask(size: u32) -> ndarray::Array2<bool> {
        let geometry = IconGeometry::for_size(size);
        let (xg, yg) = pixel_grid(size);
        let body = ellipse_mask(&xg, &yg, &geometry.body);
        let leaf = ellipse_mask(&xg, &yg, &geometry.leaf);
        ndarray::Zip::from(&body)
            .and(&leaf)
            .map_collect(|&b, &l| b && !l)
    }

    #[test]
    fn test_geometry_192() {
        let g = IconGeometry::for_size(192);
        assert_eq!(g.body, BoundingBox::new(24, 43, 168, 168));
        assert_eq!(g.leaf, BoundingBox::new(120, 24, 152, 56));
        assert_eq!(g.font_size, 64);
        assert_eq!(g.label_drop, 19);
    }

    #[test]
    fn test_geometry_512() {
        let g = IconGeometry::for_size(512);
        assert_eq!(g.body, BoundingBox::new(64, 115, 448, 448));
        assert_eq!(g.leaf, BoundingBox::new(320, 64, 405, 149));
        assert_eq!(g.font_size, 170);
        assert_eq!(g.label_drop, 51);
    }

    #[test]
    fn test_draw_icon_shapes() {
        for (size, _) in ICON_TARGETS {
            let img = draw_icon(size, &IconStyle::default()).unwrap();
            let g = IconGeometry::for_size(size);

            assert_eq!(img.dimensions(), (size, size));
            assert_eq!(img.get_pixel(0, 0), &BACKGROUND);
            assert_eq!(img.get_pixel(size - 1, size - 1), &BACKGROUND);

            let (lx, ly) = g.leaf.center();
            assert_eq!(img.get_pixel(lx as u32, ly as u32), &LEAF);

            // Falls in the gap between the two letters
            let (bx, by) = g.body.center();
            assert_eq!(img.get_pixel(bx as u32, by as u32), &BODY);
            assert_eq!(img.get_pixel(g.body.left + 2, by as u32), &BODY);
        }
    }

    #[test]
    fn test_draw_icon_has_label() {
        let img = draw_icon(192, &IconStyle::default()).unwrap();
        let mask = body_only_mask(192);

        let label_pixels = img
            .enumerate_pixels()
            .filter(|(x, y, p)| mask[[*y as usize, *x as usize]] && **p == BACKGROUND)
            .count();
        assert!(label_pixels > 0);
    }

    #[test]
    fn test_draw_icon_without_font_glyph() {
        let style = IconStyle {
            label: "\u{2603}".to_string(),
            ..IconStyle::default()
        };
        let img = draw_icon(192, &style).unwrap();
        let mask = body_only_mask(192);

        assert_eq!(img.dimensions(), (192, 192));
        assert_eq!(img.get_pixel(0, 0), &BACKGROUND);
        for (x, y, p) in img.enumerate_pixels() {
            if mask[[y as usize, x as usize]] {
                assert_eq!(p, &BODY, "unexpected label pixel at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_draw_icon_rejects_zero_size() {
        assert!(matches!(
            draw_icon(0, &IconStyle::default()),
            Err(IconError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempdir().unwrap();
        for (size, name) in ICON_TARGETS {
            let path = dir.path().join(name);
            render(size, &path).unwrap();

            let decoded = image::open(&path).unwrap().to_rgb8();
            assert_eq!(decoded.dimensions(), (size, size));
            assert_eq!(decoded.get_pixel(0, 0), &Rgb([0x10, 0xb9, 0x81]));
        }
    }

    #[test]
    fn test_announce_line() {
        for (_, name) in ICON_TARGETS {
            let mut out = Vec::new();
            announce(&mut out, Path::new(name)).unwrap();
            assert_eq!(out, format!("Created {}\n", name).into_bytes());
        }
        let mut out = Vec::new();
        announce(&mut out, Path::new("icon-192x192.png")).unwrap();
        assert_eq!(out, b"Created icon-192x192.png\n");
    }

    #[test]
    fn test_render_to_announces_each_target() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let mut expected = String::new();
        for (size, name) in ICON_TARGETS {
            let path: PathBuf = dir.path().join(name);
            render_to(size, &path, &IconStyle::default(), &mut out).unwrap();
            expected.push_str(&format!("Created {}\n", path.display()));
        }

        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_render_failure_announces_nothing() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let result = render_to(0, dir.path().join("icon.png"), &IconStyle::default(), &mut out);

        assert!(matches!(result, Err(IconError::InvalidSize(0))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("idempotent.png");
        render(192, &path).unwrap();
        let first = fs::read(&path).unwrap();
        render(192, &path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_render_missing_glyph_still_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-label.png");
        let style = IconStyle {
            label: "\u{2603}\u{2603}".to_string(),
            ..IconStyle::default()
        };
        render_with(512, &path, &style).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 512);
        assert_eq!(decoded.height(), 512);
    }

    #[test]
    fn test_render_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("icon.png");
        assert!(matches!(render(192, &path), Err(IconError::Image(_))));
    }
}
