use criterion::{Criterion, criterion_group, criterion_main};
use ndarray::Array2;
use qmi_fft::{FftOptions, Origin, fft2_real, fftshift_2d};
use qmi_resample::{
    Offset2, PixelSpacing, expand_image, expand_spectrum, mix_edges, replicate_pixels_freq,
    translate_image, translate_spectrum,
};

fn make_image(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(r, c)| ((r * 31 + c * 17) % 23) as f64 / 23.0)
}

fn bench_expand(c: &mut Criterion) {
    let opts = FftOptions::default();
    let image = make_image(128, 128);
    let spectrum = fftshift_2d(&fft2_real(&image, &opts).unwrap());
    c.bench_function("expand_spectrum_128x128_2x2", |b| {
        b.iter(|| expand_spectrum(&spectrum, 2, 2, Origin::Centered, &opts).unwrap());
    });
    c.bench_function("expand_image_128x128_2x2", |b| {
        b.iter(|| expand_image(&image, 2, 2, &opts).unwrap());
    });
    c.bench_function("replicate_pixels_freq_128x128_2x2", |b| {
        b.iter(|| replicate_pixels_freq(&spectrum, 2, 2, Origin::Centered, &opts).unwrap());
    });
}

fn bench_translate(c: &mut Criterion) {
    let opts = FftOptions::default();
    let spacing = PixelSpacing::uniform(0.065);
    let image = make_image(256, 256);
    let spectrum = fftshift_2d(&fft2_real(&image, &opts).unwrap());
    let apodization = Array2::from_elem((256, 256), 1.0);
    c.bench_function("translate_image_256x256", |b| {
        b.iter(|| translate_image(&image, Offset2::new(0.013, -0.021), spacing, &opts).unwrap());
    });
    c.bench_function("translate_spectrum_256x256_apodized", |b| {
        b.iter(|| {
            translate_spectrum(&spectrum, Offset2::new(0.4, 0.1), spacing, Some(&apodization), &opts)
                .unwrap()
        });
    });
}

fn bench_mix_edges(c: &mut Criterion) {
    let image = make_image(512, 512);
    c.bench_function("mix_edges_512x512", |b| {
        b.iter(|| mix_edges(&image, 0.1, 0.1).unwrap());
    });
}

criterion_group!(benches, bench_expand, bench_translate, bench_mix_edges);
criterion_main!(benches);
