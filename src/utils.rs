use image::{Rgb, RgbImage};
use ndarray::{Array1, Array2, Zip};

/// Inclusive (left, top, right, bottom) pixel box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        BoundingBox {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.left as f64 + self.right as f64) / 2.0,
            (self.top as f64 + self.bottom as f64) / 2.0,
        )
    }

    /// Horizontal and vertical semi-axes of the inscribed ellipse
    pub fn radii(&self) -> (f64, f64) {
        (
            (self.right as f64 - self.left as f64) / 2.0,
            (self.bottom as f64 - self.top as f64) / 2.0,
        )
    }
}

/// Create a meshgrid from x and y arrays, similar to numpy's meshgrid
pub fn meshgrid(x: &Array1<f64>, y: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let nx = x.len();
    let ny = y.len();

    let mut x_grid = Array2::zeros((ny, nx));
    for i in 0..ny {
        x_grid.row_mut(i).assign(x);
    }

    let mut y_grid = Array2::zeros((ny, nx));
    for j in 0..nx {
        y_grid.column_mut(j).assign(y);
    }

    (x_grid, y_grid)
}

/// Integer pixel coordinates of a square canvas
pub fn pixel_grid(size: u32) -> (Array2<f64>, Array2<f64>) {
    let coords: Array1<f64> = (0..size).map(|i| i as f64).collect();
    meshgrid(&coords, &coords)
}

/// Pixels covered by the ellipse inscribed in `bbox`
pub fn ellipse_mask(x_grid: &Array2<f64>, y_grid: &Array2<f64>, bbox: &BoundingBox) -> Array2<bool> {
    let (cx, cy) = bbox.center();
    let (rx, ry) = bbox.radii();

    if rx <= 0.0 || ry <= 0.0 {
        return Array2::from_elem(x_grid.dim(), false);
    }

    Zip::from(x_grid).and(y_grid).par_map_collect(|&x, &y| {
        let dx = (x - cx) / rx;
        let dy = (y - cy) / ry;
        dx * dx + dy * dy <= 1.0
    })
}

/// Paint every masked pixel with `color`
pub fn fill_mask(canvas: &mut RgbImage, mask: &Array2<bool>, color: Rgb<u8>) {
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        if mask[[y as usize, x as usize]] {
            *pixel = color;
        }
    }
}

/// Parse a `#rrggbb` literal at compile time
pub const fn hex_rgb(hex: u32) -> Rgb<u8> {
    Rgb([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
}
