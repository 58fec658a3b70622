//! Edge mixing: blend each border of an image with its mirror image so the
//! periodic extension assumed by the DFT has no jump at the borders.

use nalgebra::{Matrix4, Vector4};
use ndarray::{Array2, Axis};

use crate::error::ResampleError;

/// `a·x³ + b·x² + c·x + d`, stored as `[a, b, c, d]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSpline {
    pub coeffs: [f64; 4],
}

impl CubicSpline {
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        let [a, b, c, d] = self.coeffs;
        ((a * x + b) * x + c) * x + d
    }

    #[must_use]
    pub fn derivative(&self, x: f64) -> f64 {
        let [a, b, c, _] = self.coeffs;
        (3.0 * a * x + 2.0 * b) * x + c
    }
}

/// The cubic through `(x1, y1)` and `(x2, y2)` with slopes `dy1` and `dy2`.
///
/// Returns `None` when the system is singular (`x1 == x2`).
#[must_use]
pub fn cubic_hermite_spline(
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    dy1: f64,
    dy2: f64,
) -> Option<CubicSpline> {
    #[rustfmt::skip]
    let system = Matrix4::new(
        x1.powi(3),       x1 * x1,  x1,  1.0,
        3.0 * x1 * x1,    2.0 * x1, 1.0, 0.0,
        x2.powi(3),       x2 * x2,  x2,  1.0,
        3.0 * x2 * x2,    2.0 * x2, 1.0, 0.0,
    );
    let rhs = Vector4::new(y1, dy1, y2, dy2);
    let solution = system.lu().solve(&rhs)?;
    if solution.iter().any(|value| !value.is_finite()) {
        return None;
    }
    Some(CubicSpline {
        coeffs: [solution[0], solution[1], solution[2], solution[3]],
    })
}

/// Blend image borders with their mirror images.
///
/// Along x, the weight `w(x)` rises from 0.5 at either border to 1 at a
/// fractional distance `wx` from it (cubic with flat ends) and the image
/// becomes `img·w + fliplr(img)·(1 - w)`; y is treated the same with `wy`.
/// The result is the mean of the two one-axis blends.
pub fn mix_edges(image: &Array2<f64>, wx: f64, wy: f64) -> Result<Array2<f64>, ResampleError> {
    validate_width(wx)?;
    validate_width(wy)?;
    let (rows, cols) = image.dim();
    if rows < 2 || cols < 2 {
        return Err(ResampleError::InvalidShape {
            detail: "edge mixing needs at least 2 samples along each axis",
        });
    }

    let weights_x = mixing_weights(cols, wx)?;
    let weights_y = mixing_weights(rows, wy)?;
    let mut flipped_x = image.to_owned();
    flipped_x.invert_axis(Axis(1));
    let mut flipped_y = image.to_owned();
    flipped_y.invert_axis(Axis(0));

    Ok(Array2::from_shape_fn((rows, cols), |(r, c)| {
        let value = image[[r, c]];
        let mixed_x = value * weights_x[c] + flipped_x[[r, c]] * (1.0 - weights_x[c]);
        let mixed_y = value * weights_y[r] + flipped_y[[r, c]] * (1.0 - weights_y[r]);
        0.5 * (mixed_x + mixed_y)
    }))
}

fn validate_width(width: f64) -> Result<(), ResampleError> {
    if !(width > 0.0 && width < 0.5) {
        return Err(ResampleError::InvalidArgument {
            detail: "edge width must lie strictly between 0 and 0.5",
        });
    }
    Ok(())
}

/// Mixing weight per sample of an axis normalized to `[0, 1]`.
fn mixing_weights(len: usize, width: f64) -> Result<Vec<f64>, ResampleError> {
    let ramp = cubic_hermite_spline(0.0, width, 0.5, 1.0, 0.0, 0.0).ok_or(
        ResampleError::InvalidArgument {
            detail: "edge width too small to fit a mixing ramp",
        },
    )?;
    let last = (len - 1) as f64;
    Ok((0..len)
        .map(|i| {
            let t = i as f64 / last;
            if t <= width {
                ramp.eval(t)
            } else if t >= 1.0 - width {
                ramp.eval(1.0 - t)
            } else {
                1.0
            }
        })
        .collect())
}
