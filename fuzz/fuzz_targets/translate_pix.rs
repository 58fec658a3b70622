#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ndarray::Array2;
use qmi_resample::{BoundaryMode, Offset2, PixelSpacing, translate_pix};

#[derive(Debug, Arbitrary)]
struct PixInput {
    rows: u8,
    cols: u8,
    shift_x: f64,
    shift_y: f64,
    dx: f64,
    dy: f64,
    no_wrap: bool,
}

fuzz_target!(|input: PixInput| {
    let rows = usize::from(input.rows % 32);
    let cols = usize::from(input.cols % 32);
    let image = Array2::from_shape_fn((rows, cols), |(r, c)| (r * cols + c) as i32);
    let boundary = if input.no_wrap {
        BoundaryMode::NoWrap
    } else {
        BoundaryMode::Wrap
    };
    if let Ok(moved) = translate_pix(
        &image,
        Offset2::new(input.shift_x, input.shift_y),
        PixelSpacing::new(input.dx, input.dy),
        boundary,
        -1,
    ) {
        assert_eq!(moved.image.dim(), (rows, cols));
    }
});
