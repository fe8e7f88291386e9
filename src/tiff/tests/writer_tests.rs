use std::io::Cursor;

use crate::compression::{CompressionHandler, LzwHandler};
use crate::profile::RasterProfile;
use crate::tiff::builder::GeoTiffBuilder;
use crate::tiff::constants::{compression, field_types, sample_format, tags};
use crate::tiff::errors::TiffError;
use crate::tiff::layout::{ChunkLayout, SampleSource};

use super::test_utils::{GradientSource, ParsedTiff};

fn profile(json: &str) -> RasterProfile {
    RasterProfile::from_json(json, "test").unwrap()
}

fn write(profile: &RasterProfile, source: &GradientSource, description: Option<&str>) -> ParsedTiff {
    let cursor = GeoTiffBuilder::new(profile)
        .with_description(description)
        .write(source, Cursor::new(Vec::new()))
        .unwrap();
    ParsedTiff::parse(cursor.into_inner())
}

#[test]
fn test_uncompressed_strip_with_epsg_crs() {
    let profile = profile(
        r#"{"crs": "EPSG:4326", "transform": [0.5, 0, -10, 0, -0.5, 60],
            "width": 5, "height": 3, "dtype": "uint16", "compress": "none", "nodata": 0}"#,
    );
    let source = GradientSource { rows: 3, cols: 5 };
    let tiff = write(&profile, &source, None);

    assert!(!tiff.is_big_tiff);
    assert_eq!(tiff.value(tags::IMAGE_WIDTH), 5);
    assert_eq!(tiff.value(tags::IMAGE_LENGTH), 3);
    assert_eq!(tiff.value(tags::BITS_PER_SAMPLE), 16);
    assert_eq!(tiff.value(tags::SAMPLE_FORMAT), sample_format::UNSIGNED as u64);
    assert_eq!(tiff.value(tags::COMPRESSION), compression::NONE as u64);
    assert_eq!(tiff.value(tags::SAMPLES_PER_PIXEL), 1);
    assert_eq!(tiff.value(tags::ROWS_PER_STRIP), 3);

    let strips = tiff.chunks(tags::STRIP_OFFSETS, tags::STRIP_BYTE_COUNTS);
    assert_eq!(strips.len(), 1);
    let expected: Vec<u8> = (0..3)
        .flat_map(|r| (0..5).map(move |c| (r * 100 + c) as u16))
        .flat_map(|v| v.to_le_bytes())
        .collect();
    assert_eq!(strips[0], expected);

    assert_eq!(tiff.tag(tags::MODEL_PIXEL_SCALE_TAG).doubles(), vec![0.5, 0.5, 0.0]);
    assert_eq!(
        tiff.tag(tags::MODEL_TIEPOINT_TAG).doubles(),
        vec![0.0, 0.0, 0.0, -10.0, 60.0, 0.0]
    );
    assert_eq!(
        tiff.tag(tags::GEO_KEY_DIRECTORY_TAG).values(),
        vec![1, 1, 0, 4, 1024, 0, 1, 2, 1025, 0, 1, 1, 1026, 34737, 10, 0, 2048, 0, 1, 4326]
    );
    assert_eq!(tiff.tag(tags::GEO_ASCII_PARAMS_TAG).text(), "EPSG:4326|");
    assert_eq!(tiff.tag(tags::GDAL_NODATA).text(), "0");
    assert!(!tiff.tags.contains_key(&tags::GDAL_METADATA));
}

#[test]
fn test_lzw_tiles_are_padded_at_the_edges() {
    let profile = profile(
        r#"{"crs": "+proj=aea +lat_0=40 +units=m", "transform": [90, 0, -2245497.1304, 0, -90, 1338250.676],
            "width": 40, "height": 20, "dtype": "uint16", "compress": "lzw",
            "tiled": true, "blockxsize": 16, "blockysize": 16}"#,
    );
    let source = GradientSource { rows: 20, cols: 40 };
    let tiff = write(&profile, &source, Some("Water depth"));

    assert_eq!(tiff.value(tags::COMPRESSION), compression::LZW as u64);
    assert_eq!(tiff.value(tags::TILE_WIDTH), 16);
    assert_eq!(tiff.value(tags::TILE_LENGTH), 16);
    assert!(!tiff.tags.contains_key(&tags::STRIP_OFFSETS));

    let tiles = tiff.chunks(tags::TILE_OFFSETS, tags::TILE_BYTE_COUNTS);
    assert_eq!(tiles.len(), 6);

    // Bottom-right tile covers rows 16..20 and columns 32..40
    let decoded = LzwHandler.decompress(&tiles[5]).unwrap();
    assert_eq!(decoded.len(), 16 * 16 * 2);
    let pixel = |row: usize, col: usize| u16::from_le_bytes([decoded[(row * 16 + col) * 2], decoded[(row * 16 + col) * 2 + 1]]);
    assert_eq!(pixel(0, 0), source.value(16, 32));
    assert_eq!(pixel(3, 7), source.value(19, 39));
    assert_eq!(pixel(3, 8), 0);
    assert_eq!(pixel(4, 0), 0);

    assert!(tiff.tag(tags::GDAL_METADATA).text().contains(">Water depth</Item>"));
    assert!(!tiff.tags.contains_key(&tags::GDAL_NODATA));
    assert_eq!(tiff.tag(tags::GEO_ASCII_PARAMS_TAG).text(), "+proj=aea +lat_0=40 +units=m|");
}

#[test]
fn test_zstd_uses_gdal_code() {
    let profile = profile(
        r#"{"transform": [1, 0, 0, 0, -1, 0], "width": 4, "height": 4, "compress": "zstd"}"#,
    );
    let tiff = write(&profile, &GradientSource { rows: 4, cols: 4 }, None);

    assert_eq!(tiff.value(tags::COMPRESSION), 50000);
    // No CRS, no keys
    assert!(!tiff.tags.contains_key(&tags::GEO_KEY_DIRECTORY_TAG));
    assert!(tiff.tags.contains_key(&tags::MODEL_TIEPOINT_TAG));
}

#[test]
fn test_rotated_transform() {
    let profile = profile(
        r#"{"crs": "EPSG:3857", "transform": [10, 2, 500, 2, -10, 900], "width": 4, "height": 2, "compress": "deflate"}"#,
    );
    let tiff = write(&profile, &GradientSource { rows: 2, cols: 4 }, None);

    assert_eq!(tiff.value(tags::COMPRESSION), compression::DEFLATE as u64);
    let matrix = tiff.tag(tags::MODEL_TRANSFORMATION_TAG).doubles();
    assert_eq!(&matrix[..8], &[10.0, 2.0, 0.0, 500.0, 2.0, -10.0, 0.0, 900.0]);
    assert_eq!(matrix[15], 1.0);
    assert!(!tiff.tags.contains_key(&tags::MODEL_PIXEL_SCALE_TAG));
}

#[test]
fn test_dimension_mismatch_is_rejected() {
    let profile = profile(r#"{"transform": [1, 0, 0, 0, -1, 0], "width": 4, "height": 4}"#);
    let result = GeoTiffBuilder::new(&profile).write(&GradientSource { rows: 4, cols: 5 }, Cursor::new(Vec::new()));
    assert!(matches!(result, Err(TiffError::InvalidLayout(_))));
}

#[test]
fn test_default_compression_is_lzw() {
    let profile = profile(r#"{"transform": [1, 0, 0, 0, -1, 0], "width": 3, "height": 2}"#);
    let tiff = write(&profile, &GradientSource { rows: 2, cols: 3 }, None);
    assert_eq!(tiff.value(tags::COMPRESSION), compression::LZW as u64);
}

#[test]
fn test_big_tiff_file_reads_back() {
    let profile = profile(
        r#"{"crs": "+proj=aea +lat_1=29.5 +lat_2=45.5 +units=m", "transform": [90, 0, -2245497.1304, 0, -90, 1338250.676],
            "width": 20, "height": 18, "dtype": "uint16", "compress": "lzw", "nodata": -9999,
            "tiled": true, "blockxsize": 16, "blockysize": 16}"#,
    );
    let source = GradientSource { rows: 18, cols: 20 };
    let layout = ChunkLayout::from_profile(&profile, source.element_type()).unwrap();
    let cursor = GeoTiffBuilder::new(&profile)
        .with_description(Some("Water depth"))
        .write_layout(&source, Cursor::new(Vec::new()), &layout, true)
        .unwrap();
    let tiff = ParsedTiff::parse(cursor.into_inner());

    assert!(tiff.is_big_tiff);
    assert_eq!(tiff.value(tags::IMAGE_WIDTH), 20);
    assert_eq!(tiff.tag(tags::TILE_OFFSETS).field_type, field_types::LONG8);

    let tiles = tiff.chunks(tags::TILE_OFFSETS, tags::TILE_BYTE_COUNTS);
    assert_eq!(tiles.len(), 4);
    let decoded = LzwHandler.decompress(&tiles[3]).unwrap();
    assert_eq!(u16::from_le_bytes([decoded[0], decoded[1]]), source.value(16, 16));

    assert_eq!(tiff.tag(tags::MODEL_PIXEL_SCALE_TAG).doubles(), vec![90.0, 90.0, 0.0]);
    assert_eq!(
        tiff.tag(tags::MODEL_TIEPOINT_TAG).doubles(),
        vec![0.0, 0.0, 0.0, -2245497.1304, 1338250.676, 0.0]
    );
    assert_eq!(tiff.tag(tags::GEO_ASCII_PARAMS_TAG).text(), "+proj=aea +lat_1=29.5 +lat_2=45.5 +units=m|");
    assert_eq!(tiff.tag(tags::GDAL_NODATA).text(), "-9999");
    assert!(tiff.tag(tags::GDAL_METADATA).text().contains(">Water depth</Item>"));
}
