#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use qmi_fft::{AxisConvention, FrequencySign, Origin, frequency_axis, position_axis};

#[derive(Debug, Arbitrary)]
struct AxisInput {
    length: u16,
    dt: f64,
    centered: bool,
    positive: bool,
}

fuzz_target!(|input: AxisInput| {
    let sign = if input.positive {
        FrequencySign::Positive
    } else {
        FrequencySign::Symmetric
    };
    let convention = AxisConvention::new(Origin::from_centered(input.centered), sign);
    let length = usize::from(input.length);
    if let Ok(freqs) = frequency_axis(length, input.dt, convention) {
        assert_eq!(freqs.len(), length);
    }
    if let Ok(positions) = position_axis(length, input.dt, convention) {
        assert_eq!(positions.len(), length);
    }
});
