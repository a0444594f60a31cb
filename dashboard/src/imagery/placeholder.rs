//! Stand-in image for samples that are not available yet

use ndarray::Array2;

/// Side length of the placeholder image in pixels
pub const PLACEHOLDER_SIZE: usize = 128;

/// A square image with ones on both diagonals and zeros elsewhere
///
/// Where the diagonals cross (odd sizes only) the pixel holds 2.
pub fn placeholder_cross(size: usize) -> Array2<f64> {
    Array2::from_shape_fn((size, size), |(row, col)| {
        let diagonal = if row == col { 1.0 } else { 0.0 };
        let anti_diagonal = if row + col + 1 == size { 1.0 } else { 0.0 };
        diagonal + anti_diagonal
    })
}
