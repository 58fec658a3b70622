//! Differential and metamorphic tests for qmi-resample.
//!
//! Oracles are either hand-computed values or an independent route to the
//! same result (real-space replication vs the spectral formula, index rolls
//! vs phase ramps, sinc sums vs FFT shifts). Random inputs come from seeded
//! `StdRng` streams; the seed is logged with every comparison.

use ndarray::Array2;
use qmi_fft::{
    BackendKind, Complex64, FftOptions, Origin, fft2_real, fftshift_2d, frequency_spacing, ifft2,
    ifftshift_2d, roll_2d,
};
use qmi_resample::{
    BoundaryMode, NyquistCorners, Offset2, PixelSpacing, expand_image, expand_image_with,
    expand_spectrum, replicate_pixels, replicate_pixels_freq, translate_image, translate_pix,
    translate_spectrum, whittaker_interpolate,
};
use qmi_runtime::{TestLogEntry, TestResult, max_abs_diff_complex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((rows, cols), |_| rng.gen_range(-1.0..1.0))
}

fn random_spectrum(rows: usize, cols: usize, seed: u64) -> Array2<Complex64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((rows, cols), |_| {
        Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    })
}

fn to_complex(image: &Array2<f64>) -> Array2<Complex64> {
    image.mapv(|value| Complex64::new(value, 0.0))
}

fn check(test_id: &str, seed: u64, shape: &[usize], max_error: f64, tol: f64) {
    let pass = max_error <= tol;
    TestLogEntry::new(test_id, "qmi_resample", "differential comparison")
        .with_seed(seed)
        .with_shape(shape)
        .with_max_error(max_error)
        .with_result(TestResult::from_pass(pass))
        .emit();
    assert!(pass, "{test_id}: max error {max_error} exceeds {tol}");
}

// ═══════════════════════════════════════════════════════════════════
// §1  Pixel replication: spectral formula vs real-space Kronecker product
// ═══════════════════════════════════════════════════════════════════

#[test]
fn diff_replication_matches_real_space_edge_layout() {
    let opts = FftOptions::default();
    for (seed, (rows, cols), (mx, my)) in [
        (11, (7, 6), (2, 3)),
        (12, (5, 8), (3, 1)),
        (13, (4, 4), (2, 2)),
    ] {
        let image = random_image(rows, cols, seed);
        let replicated = replicate_pixels(&image, mx, my).expect("kron");
        let reference = fft2_real(&replicated, &opts).expect("fft2");
        let spectrum = fft2_real(&image, &opts).expect("fft2");
        let from_spectrum =
            replicate_pixels_freq(&spectrum, mx, my, Origin::Edge, &opts).expect("replicate");
        check(
            "replication_spectrum",
            seed,
            &[rows, cols],
            max_abs_diff_complex(&from_spectrum, &reference),
            1e-9,
        );

        let back = ifft2(&from_spectrum, &opts).expect("ifft2");
        check(
            "replication_real_space",
            seed,
            &[rows * my, cols * mx],
            max_abs_diff_complex(&back, &to_complex(&replicated)),
            1e-12,
        );
    }
}

#[test]
fn diff_replication_centered_layout_matches_edge_layout() {
    let seed = 21;
    let opts = FftOptions::default();
    let spectrum = fft2_real(&random_image(5, 7, seed), &opts).expect("fft2");
    let edge = replicate_pixels_freq(&spectrum, 3, 2, Origin::Edge, &opts).expect("edge");
    let centered = replicate_pixels_freq(&fftshift_2d(&spectrum), 3, 2, Origin::Centered, &opts)
        .expect("centered");
    check(
        "replication_centering",
        seed,
        &[5, 7],
        max_abs_diff_complex(&ifftshift_2d(&centered), &edge),
        1e-12,
    );
}

// ═══════════════════════════════════════════════════════════════════
// §2  Band-limited expansion
// ═══════════════════════════════════════════════════════════════════

// Hand-computed: the 2x2 image has no Nyquist corner energy, so the
// expansion interpolates halfway values along both axes.
#[test]
fn diff_expand_two_by_two_oracle() {
    let image = ndarray::array![[1.0, 2.0], [3.0, 4.0]];
    let opts = FftOptions::default();
    let expected = ndarray::array![
        [1.0, 1.5, 2.0, 1.5],
        [2.0, 2.5, 3.0, 2.5],
        [3.0, 3.5, 4.0, 3.5],
        [2.0, 2.5, 3.0, 2.5]
    ];

    let spectrum = fft2_real(&image, &opts).expect("fft2");
    let edge = expand_spectrum(&spectrum, 2, 2, Origin::Edge, &opts).expect("edge");
    let centered = expand_spectrum(&fftshift_2d(&spectrum), 2, 2, Origin::Centered, &opts)
        .expect("centered");
    assert!(max_abs_diff_complex(&edge, &ifftshift_2d(&centered)) < 1e-12);

    let resampled = ifft2(&edge, &opts).expect("ifft2");
    check(
        "expand_2x2_oracle",
        0,
        &[2, 2],
        max_abs_diff_complex(&resampled, &to_complex(&expected)),
        1e-12,
    );
}

#[test]
fn diff_expand_centering_on_random_spectra() {
    let opts = FftOptions::default();
    for (seed, (rows, cols), (mx, my)) in [(31, (9, 8), (2, 3)), (32, (6, 6), (4, 2))] {
        let spectrum = random_spectrum(rows, cols, seed);
        let edge = expand_spectrum(&spectrum, mx, my, Origin::Edge, &opts).expect("edge");
        let centered = expand_spectrum(&fftshift_2d(&spectrum), mx, my, Origin::Centered, &opts)
            .expect("centered");
        check(
            "expand_centering",
            seed,
            &[rows, cols],
            max_abs_diff_complex(&edge, &ifftshift_2d(&centered)),
            1e-12,
        );
    }
}

#[test]
fn diff_expand_passes_through_original_samples() {
    let opts = FftOptions::default();
    for (seed, (rows, cols), (mx, my)) in [
        (41, (8, 6), (2, 3)),
        (42, (7, 9), (3, 2)),
        (43, (6, 7), (2, 2)),
        (44, (1, 10), (3, 1)),
        (45, (11, 1), (1, 4)),
    ] {
        let image = random_image(rows, cols, seed);
        let expanded =
            expand_image_with(&image, mx, my, NyquistCorners::Quarter, &opts).expect("expand");
        assert_eq!(expanded.dim(), (rows * my, cols * mx));
        let mut worst = 0.0_f64;
        for ((r, c), &value) in image.indexed_iter() {
            let sample = expanded[[r * my, c * mx]];
            worst = worst.max((sample - Complex64::new(value, 0.0)).norm());
        }
        check("expand_sample_reproduction", seed, &[rows, cols], worst, 1e-12);

        let imaginary = expanded.iter().map(|v| v.im.abs()).fold(0.0, f64::max);
        check("expand_real_output", seed, &[rows, cols], imaginary, 1e-12);
    }
}

#[test]
fn diff_default_corners_add_the_checkerboard_component() {
    // Doubling the four corner entries adds C/(nx·ny)·(-1)^(x+y) on the
    // original grid, C being the corner bin of the unexpanded spectrum.
    let opts = FftOptions::default();
    for (seed, (rows, cols), (mx, my)) in [(46, (8, 6), (2, 3)), (47, (4, 10), (3, 2))] {
        let image = random_image(rows, cols, seed);
        let corner = fft2_real(&image, &opts).expect("fft2")[[rows / 2, cols / 2]];
        let amplitude = corner.re / (rows * cols) as f64;
        let expanded = expand_image(&image, mx, my, &opts).expect("expand");
        let mut worst = 0.0_f64;
        for ((r, c), &value) in image.indexed_iter() {
            let sign = if (r + c).is_multiple_of(2) { 1.0 } else { -1.0 };
            let want = Complex64::new(value + sign * amplitude, 0.0);
            worst = worst.max((expanded[[r * my, c * mx]] - want).norm());
        }
        check("expand_default_corner_term", seed, &[rows, cols], worst, 1e-12);
        assert!(corner.im.abs() < 1e-12);
    }
}

#[test]
fn diff_unit_factors_are_identity() {
    let opts = FftOptions::default();
    let spectrum = random_spectrum(6, 5, 51);
    for origin in [Origin::Edge, Origin::Centered] {
        assert_eq!(
            expand_spectrum(&spectrum, 1, 1, origin, &opts).expect("expand"),
            spectrum
        );
        let replicated = replicate_pixels_freq(&spectrum, 1, 1, origin, &opts).expect("replicate");
        assert!(max_abs_diff_complex(&replicated, &spectrum) < 1e-15);
    }
}

// ═══════════════════════════════════════════════════════════════════
// §3  Frequency shifts by whole bins are index rolls
// ═══════════════════════════════════════════════════════════════════

#[test]
fn diff_translate_spectrum_whole_bins_100x100() {
    let seed = 61;
    let opts = FftOptions::default();
    let spacing = PixelSpacing::uniform(0.065);
    let image = random_image(100, 100, seed);
    let spectrum = fftshift_2d(&fft2_real(&image, &opts).expect("fft2"));
    let df = frequency_spacing(100, spacing.dx).expect("df");

    for n in 1..20 {
        let bins = n as f64 * df;
        for (shift, roll) in [
            (Offset2::new(bins, 0.0), (0, -(n as isize))),
            (Offset2::new(0.0, bins), (-(n as isize), 0)),
            (Offset2::new(bins, bins), (-(n as isize), -(n as isize))),
        ] {
            let shifted =
                translate_spectrum(&spectrum, shift, spacing, None, &opts).expect("translate");
            let expected = roll_2d(&spectrum, roll.0, roll.1);
            check(
                "translate_spectrum_whole_bins",
                seed,
                &[100, 100],
                max_abs_diff_complex(&shifted, &expected),
                1e-7,
            );
        }
    }
}

#[test]
fn diff_translate_image_round_trip() {
    let seed = 62;
    let opts = FftOptions::default();
    let spacing = PixelSpacing::new(0.1, 0.2);
    let image = random_image(12, 10, seed);
    let forward =
        translate_image(&image, Offset2::new(0.037, -0.41), spacing, &opts).expect("forward");
    // The shift is linear, so undo it on the real and imaginary parts separately.
    let undo = Offset2::new(-0.037, 0.41);
    let back_re = translate_image(&forward.mapv(|v| v.re), undo, spacing, &opts).expect("re");
    let back_im = translate_image(&forward.mapv(|v| v.im), undo, spacing, &opts).expect("im");
    let recovered = &back_re + &back_im.mapv(|v| v * Complex64::i());
    check(
        "translate_image_round_trip",
        seed,
        &[12, 10],
        max_abs_diff_complex(&recovered, &to_complex(&image)),
        1e-12,
    );
}

// ═══════════════════════════════════════════════════════════════════
// §4  Sinc interpolation vs FFT translation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn diff_whittaker_agrees_with_fourier_shift() {
    let len = 64;
    let dt = 0.5;
    let sigma = 2.0;
    let center = 32.0 * dt;
    let shift = 0.37;
    let gaussian = |x: f64| (-(x - center).powi(2) / (2.0 * sigma * sigma)).exp();

    let samples = (0..len).map(|n| gaussian(n as f64 * dt)).collect::<Vec<_>>();
    let queries = (16..48).map(|n| n as f64 * dt + shift).collect::<Vec<_>>();
    let interpolated = whittaker_interpolate(&queries, &samples, dt).expect("whittaker");

    let row = Array2::from_shape_vec((1, len), samples).expect("row");
    let translated = translate_image(
        &row,
        Offset2::new(shift, 0.0),
        PixelSpacing::new(dt, 1.0),
        &FftOptions::default(),
    )
    .expect("translate");

    let mut worst = 0.0_f64;
    for (i, n) in (16..48).enumerate() {
        let fourier = translated[[0, n]];
        worst = worst.max((fourier.re - interpolated[i]).abs());
        worst = worst.max((interpolated[i] - gaussian(queries[i])).abs());
        worst = worst.max(fourier.im.abs());
    }
    check("whittaker_vs_fourier", 0, &[len], worst, 1e-6);
}

// ═══════════════════════════════════════════════════════════════════
// §5  Whole-pixel translation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn diff_translate_pix_matches_fourier_shift_for_whole_pixels() {
    let seed = 71;
    let opts = FftOptions::default();
    let spacing = PixelSpacing::new(0.5, 2.0);
    let image = random_image(9, 8, seed);
    for (px, py) in [(1_i64, 0_i64), (0, -3), (-2, 4)] {
        let shift = Offset2::new(px as f64 * spacing.dx, py as f64 * spacing.dy);
        let moved = translate_pix(&image, shift, spacing, BoundaryMode::Wrap, 0.0).expect("pix");
        assert_eq!((moved.pixels_x, moved.pixels_y), (px, py));
        let fourier = translate_image(&image, shift, spacing, &opts).expect("fourier");
        check(
            "translate_pix_vs_fourier",
            seed,
            &[9, 8],
            max_abs_diff_complex(&fourier, &to_complex(&moved.image)),
            1e-12,
        );
    }
}

#[test]
fn diff_translate_pix_no_wrap_keeps_interior() {
    let image = random_image(6, 6, 72);
    let moved = translate_pix(
        &image,
        Offset2::new(1.6, -0.4),
        PixelSpacing::uniform(0.8),
        BoundaryMode::NoWrap,
        f64::NAN,
    )
    .expect("pix");
    assert_eq!((moved.pixels_x, moved.pixels_y), (2, 0));
    for ((r, c), value) in moved.image.indexed_iter() {
        if c >= 4 {
            assert!(value.is_nan());
        } else {
            assert_eq!(*value, image[[r, c + 2]]);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// §6  Backends
// ═══════════════════════════════════════════════════════════════════

#[test]
fn diff_naive_backend_gives_same_expansion() {
    let seed = 81;
    let image = random_image(5, 6, seed);
    let fast = expand_image(&image, 2, 3, &FftOptions::default()).expect("rustfft");
    let slow = expand_image(
        &image,
        2,
        3,
        &FftOptions::default().with_backend(BackendKind::NaiveDft),
    )
    .expect("naive");
    check(
        "expand_backend_agreement",
        seed,
        &[5, 6],
        max_abs_diff_complex(&fast, &slow),
        1e-10,
    );
}
