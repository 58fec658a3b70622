#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ndarray::Array2;
use qmi_fft::{Complex64, FftOptions, Origin};
use qmi_resample::{expand_spectrum, replicate_pixels_freq};

#[derive(Debug, Arbitrary)]
struct ExpandInput {
    rows: u8,
    cols: u8,
    factor_x: u8,
    factor_y: u8,
    centered: bool,
    values: Vec<(f64, f64)>,
}

fuzz_target!(|input: ExpandInput| {
    let rows = usize::from(input.rows % 16);
    let cols = usize::from(input.cols % 16);
    let factor_x = usize::from(input.factor_x % 5);
    let factor_y = usize::from(input.factor_y % 5);
    if input.values.len() < rows * cols {
        return;
    }
    let data = input.values[..rows * cols]
        .iter()
        .map(|&(re, im)| Complex64::new(re, im))
        .collect::<Vec<_>>();
    let Ok(spectrum) = Array2::from_shape_vec((rows, cols), data) else {
        return;
    };
    let origin = Origin::from_centered(input.centered);
    let opts = FftOptions::default();

    if let Ok(expanded) = expand_spectrum(&spectrum, factor_x, factor_y, origin, &opts) {
        assert_eq!(expanded.dim(), (rows * factor_y, cols * factor_x));
    }
    if let Ok(replicated) = replicate_pixels_freq(&spectrum, factor_x, factor_y, origin, &opts) {
        assert_eq!(replicated.dim(), (rows * factor_y, cols * factor_x));
    }
});
