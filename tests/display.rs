//! Exercise the public display pipeline the way a viewer would:
//! decode result in, frames and statistics out.

extern crate texview;
use texview::prelude::*;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;


fn layout(
    dimensions: Dimensions, pixel_format: PixelFormat, channel_type: ChannelType,
    mip_count: u32, layer_count: u32,
) -> TextureLayout
{
    TextureLayout {
        dimensions, pixel_format, channel_type,
        color_space: ColorSpace::Linear,
        texture_type: if layer_count > 1 { TextureType::Array2D } else { TextureType::Single2D },
        mip_count, layer_count,
        source_format: FileFormat::Ktx,
    }
}

#[test]
fn view_an_rgb_texture_from_load_to_frame() {
    // a 2×2 base with one 1×1 mip, as a decoder would hand it over
    let source_layout = layout(
        Dimensions::new(2, 2, 1),
        PixelFormat::Rgb8, ChannelType::UnsignedNormalized,
        2, 1,
    );

    let texture = Texture::new(source_layout, vec![
        10, 20, 30,   40, 50, 60,
        70, 80, 90,   100, 110, 120,

        5, 6, 7, // mip 1
    ]).unwrap();

    let source = DisplaySource::new(&texture, FloatVisualization::default()).unwrap();

    let base = source.frame(0, 0, false).unwrap();
    assert_eq!(base.format, DisplayFormat::Rgba8);
    assert_eq!(base.dimensions, Dimensions::new(2, 2, 1));
    assert_eq!(base.bytes, &[
        10, 20, 30, 255,   40, 50, 60, 255,
        70, 80, 90, 255,   100, 110, 120, 255,
    ]);

    let mip = source.frame(1, 0, true).unwrap();
    assert_eq!(mip.bytes, &[5, 6, 7, 255]);
    assert_eq!(mip.scale_to, Some(Dimensions::new(2, 2, 1)));

    // the same texture also yields statistics
    let report = analyze(&texture).unwrap();
    let ranges = report.layer(0, 0).unwrap();
    assert_eq!(ranges.channel(0), Some(ChannelRange {
        min: ChannelValue::U64(10),
        max: ChannelValue::U64(100),
    }));
    assert_eq!(ranges.channel(3), None);
}

#[test]
fn view_a_float_texture_in_both_visualizations() {
    let source_layout = layout(
        Dimensions::new(3, 1, 1),
        PixelFormat::R32, ChannelType::SignedFloat,
        1, 1,
    );

    let buffer: Vec<u8> = [0.0_f32, 10.0, 5.0].iter()
        .flat_map(|value| value.to_ne_bytes().to_vec())
        .collect();

    let texture = Texture::new(source_layout, buffer).unwrap();

    let mut source = DisplaySource::new(&texture, FloatVisualization::Remap).unwrap();
    assert_eq!(source.frame(0, 0, false).unwrap().bytes, &[0, 255, 128]);

    source.set_visualization(FloatVisualization::Clamp).unwrap();
    assert_eq!(source.frame(0, 0, false).unwrap().bytes, &[0, 255, 255]);

    // statistics keep the float kind regardless of the visualization
    let ranges = *analyze(&texture).unwrap().layer(0, 0).unwrap();
    assert_eq!(ranges.channel(0), Some(ChannelRange {
        min: ChannelValue::F64(0.0),
        max: ChannelValue::F64(10.0),
    }));
}

#[test]
fn out_of_range_requests_fail_before_any_read() {
    let source_layout = layout(
        Dimensions::new(2, 2, 1),
        PixelFormat::Rgba8, ChannelType::UnsignedNormalized,
        2, 2,
    );

    let buffer = vec![0; source_layout.total_size().unwrap() as usize];
    let texture = Texture::new(source_layout, buffer).unwrap();
    let source = DisplaySource::new(&texture, FloatVisualization::default()).unwrap();

    assert!(matches!(source.frame(2, 0, false), Err(Error::IndexOutOfRange { .. })));
    assert!(matches!(source.frame(0, 2, false), Err(Error::IndexOutOfRange { .. })));
}

#[test]
fn compressed_textures_are_declined_everywhere() {
    let compressed = layout(
        Dimensions::new(8, 8, 1),
        PixelFormat::Bc7Rgba, ChannelType::UnsignedNormalized,
        1, 1,
    );

    assert!(!texview::display::can_display(compressed.pixel_format, compressed.channel_type));
    assert!(!texview::display::can_compute_min_max(compressed.pixel_format));

    // block data has no per-texel layout, so no packed size exists either
    assert!(matches!(compressed.total_size(), Err(Error::UnsupportedFormat { .. })));
}

#[cfg(feature = "rayon")]
#[test]
fn a_background_conversion_feeds_the_display_source() {
    let source_layout = layout(
        Dimensions::new(2, 1, 1),
        PixelFormat::Rgb8, ChannelType::UnsignedNormalized,
        1, 1,
    );

    let texture = Texture::new(source_layout, vec![1, 2, 3,  4, 5, 6]).unwrap();

    let handle = match texview::background::convert_in_background(&texture, FloatVisualization::default()) {
        Some(handle) => handle,
        None => return, // no thread pool on this platform, nothing to test
    };

    let prepared = handle.wait().unwrap();
    let source = DisplaySource::with_prepared(&texture, FloatVisualization::default(), prepared).unwrap();

    assert_eq!(source.frame(0, 0, false).unwrap().bytes, &[1, 2, 3, 255,  4, 5, 6, 255]);
}

#[test]
fn random_layouts_stay_mutually_consistent() {
    let mut random = StdRng::seed_from_u64(42);

    let formats = [
        PixelFormat::R8, PixelFormat::Ra8, PixelFormat::Rgb8, PixelFormat::Rgba8,
        PixelFormat::R16, PixelFormat::Rgb16, PixelFormat::Rgba32,
    ];

    for _ in 0..512 {
        let dimensions = Dimensions::new(
            random.random_range(1..=64),
            random.random_range(1..=64),
            if random.random_bool(0.2) { random.random_range(1..=8) } else { 1 },
        );

        let max_mips = texview::meta::full_mip_chain_len(dimensions);
        let test_layout = layout(
            dimensions,
            formats[random.random_range(0..formats.len())],
            ChannelType::UnsignedNormalized,
            random.random_range(1..=max_mips),
            random.random_range(1..=6),
        );

        test_layout.validate().unwrap();

        // the last layer of the last mip must end exactly at the total size
        let last_mip = test_layout.mip_count - 1;
        let last_layer = test_layout.layer_count - 1;
        let end = test_layout.layer_offset(last_mip, last_layer).unwrap()
            + test_layout.bytes_per_layer(last_mip).unwrap();
        assert_eq!(end, test_layout.total_size().unwrap());

        // and a buffer of exactly that size must satisfy every span
        let texture = Texture::new(
            test_layout,
            vec![0; test_layout.total_size().unwrap() as usize],
        ).unwrap();

        for mip_index in 0..test_layout.mip_count {
            assert!(texture.mip_span(mip_index).is_ok());

            for layer_index in 0..test_layout.layer_count {
                let span = texture.layer_span(mip_index, layer_index).unwrap();
                assert_eq!(span.len() as u64, test_layout.bytes_per_layer(mip_index).unwrap());
            }
        }
    }
}

#[test]
fn random_conversions_cover_the_whole_chain() {
    let mut random = StdRng::seed_from_u64(7);

    for _ in 0..64 {
        let dimensions = Dimensions::new(
            random.random_range(1..=32),
            random.random_range(1..=32),
            1,
        );

        let source_layout = layout(
            dimensions,
            PixelFormat::Rgb8, ChannelType::UnsignedNormalized,
            random.random_range(1..=texview::meta::full_mip_chain_len(dimensions)),
            random.random_range(1..=4),
        );

        let buffer: Vec<u8> = (0..source_layout.total_size().unwrap())
            .map(|byte| byte as u8)
            .collect();

        let texture = Texture::new(source_layout, buffer).unwrap();
        let source = DisplaySource::new(&texture, FloatVisualization::default()).unwrap();

        for mip_index in 0..source_layout.mip_count {
            for layer_index in 0..source_layout.layer_count {
                let raw = texture.layer_span(mip_index, layer_index).unwrap();
                let frame = source.frame(mip_index, layer_index, false).unwrap();

                assert_eq!(frame.format, DisplayFormat::Rgba8);
                assert_eq!(frame.bytes.len() / 4, raw.len() / 3);

                for (raw_pixel, converted) in raw.chunks_exact(3).zip(frame.bytes.chunks_exact(4)) {
                    assert_eq!(&converted[..3], raw_pixel);
                    assert_eq!(converted[3], 255);
                }
            }
        }
    }
}
