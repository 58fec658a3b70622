use ndarray::{Array2, Axis};

use crate::transforms::FftError;

/// Sample frequencies for the length-`n` complex DFT, zero frequency first.
pub fn fftfreq(n: usize, sample_spacing: f64) -> Result<Vec<f64>, FftError> {
    validate_frequency_args(n, sample_spacing)?;
    let scale = 1.0 / (n as f64 * sample_spacing);
    let split = n.div_ceil(2);

    let mut freqs = Vec::with_capacity(n);
    for idx in 0..n {
        if idx < split {
            freqs.push(idx as f64 * scale);
        } else {
            freqs.push(-((n - idx) as f64) * scale);
        }
    }
    Ok(freqs)
}

/// Move the zero-frequency sample from index 0 to index `len / 2`.
#[must_use]
pub fn fftshift_1d<T: Clone>(input: &[T]) -> Vec<T> {
    rotate_left_owned(input, input.len().div_ceil(2))
}

/// Inverse of [`fftshift_1d`]: move index `len / 2` back to index 0.
#[must_use]
pub fn ifftshift_1d<T: Clone>(input: &[T]) -> Vec<T> {
    rotate_left_owned(input, input.len() / 2)
}

/// [`fftshift_1d`] applied along both axes.
#[must_use]
pub fn fftshift_2d<T: Clone>(input: &Array2<T>) -> Array2<T> {
    let (rows, cols) = input.dim();
    roll_2d(input, (rows / 2) as isize, (cols / 2) as isize)
}

/// [`ifftshift_1d`] applied along both axes.
#[must_use]
pub fn ifftshift_2d<T: Clone>(input: &Array2<T>) -> Array2<T> {
    let (rows, cols) = input.dim();
    roll_2d(input, -((rows / 2) as isize), -((cols / 2) as isize))
}

/// Cyclic roll: `out[i, j] = input[i - row_shift, j - col_shift]` (indices mod shape).
#[must_use]
pub fn roll_2d<T: Clone>(input: &Array2<T>, row_shift: isize, col_shift: isize) -> Array2<T> {
    let (rows, cols) = input.dim();
    if rows == 0 || cols == 0 {
        return input.clone();
    }
    let row_shift = row_shift.rem_euclid(rows as isize) as usize;
    let col_shift = col_shift.rem_euclid(cols as isize) as usize;
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        input[[(i + rows - row_shift) % rows, (j + cols - col_shift) % cols]].clone()
    })
}

/// Apply `f` to every lane along `axis`, producing lanes of length `new_len`.
///
/// `f` must return exactly `new_len` values; extra values are ignored and
/// missing ones stay at `T::default()`.
pub fn map_lanes<T, F>(input: &Array2<T>, axis: Axis, new_len: usize, mut f: F) -> Array2<T>
where
    T: Clone + Default,
    F: FnMut(&[T]) -> Vec<T>,
{
    let mut shape = [input.nrows(), input.ncols()];
    shape[axis.index()] = new_len;
    let mut output = Array2::from_elem((shape[0], shape[1]), T::default());
    for (source, mut target) in input.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        let mapped = f(&source.to_vec());
        for (slot, value) in target.iter_mut().zip(mapped) {
            *slot = value;
        }
    }
    output
}

pub(crate) fn validate_frequency_args(n: usize, sample_spacing: f64) -> Result<(), FftError> {
    if n == 0 {
        return Err(FftError::InvalidLength {
            detail: "n must be greater than zero",
        });
    }
    if !(sample_spacing.is_finite() && sample_spacing > 0.0) {
        return Err(FftError::NonPositiveSampleSpacing);
    }
    Ok(())
}

fn rotate_left_owned<T: Clone>(input: &[T], shift: usize) -> Vec<T> {
    if input.is_empty() {
        return Vec::new();
    }
    let split = shift % input.len();
    input[split..]
        .iter()
        .cloned()
        .chain(input[..split].iter().cloned())
        .collect()
}
