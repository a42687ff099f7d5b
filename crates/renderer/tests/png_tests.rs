//! Tests for PNG encoding of rendered frames.

use std::io::Read;

use renderer::png::{create_png, create_png_auto, create_png_indexed, encode_surface};
use renderer::{PixmapSurface, RasterSurface};
use surface_common::Color;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Split a PNG into `(type, data)` chunks, checking every CRC.
fn chunks(png: &[u8]) -> Vec<(String, Vec<u8>)> {
    assert_eq!(&png[..8], &SIGNATURE);
    let mut out = Vec::new();
    let mut pos = 8;
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let kind = &png[pos + 4..pos + 8];
        let data = &png[pos + 8..pos + 8 + len];
        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());
        assert_eq!(crc, crc32fast::hash(&[kind, data].concat()));
        out.push((String::from_utf8(kind.to_vec()).unwrap(), data.to_vec()));
        pos += 12 + len;
    }
    out
}

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .unwrap();
    out
}

// ============================================================================
// RGBA encoding
// ============================================================================

#[test]
fn test_create_png_layout() {
    let pixels = [
        255, 0, 0, 255, 0, 255, 0, 255, //
        0, 0, 255, 255, 255, 255, 255, 128,
    ];
    let png = create_png(&pixels, 2, 2).unwrap();
    let chunks = chunks(&png);

    let names: Vec<&str> = chunks.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["IHDR", "IDAT", "IEND"]);

    let ihdr = &chunks[0].1;
    assert_eq!(&ihdr[0..4], &2u32.to_be_bytes());
    assert_eq!(&ihdr[4..8], &2u32.to_be_bytes());
    assert_eq!(ihdr[9], 6);

    // Each scanline is a zero filter byte followed by the raw row.
    let raw = inflate(&chunks[1].1);
    assert_eq!(raw.len(), 2 * (1 + 8));
    assert_eq!(raw[0], 0);
    assert_eq!(&raw[1..9], &pixels[0..8]);
    assert_eq!(&raw[10..18], &pixels[8..16]);
}

#[test]
fn test_create_png_rejects_bad_buffer() {
    assert!(create_png(&[0; 15], 2, 2).is_err());
    assert!(create_png(&[], 0, 0).is_err());
}

// ============================================================================
// Indexed encoding
// ============================================================================

#[test]
fn test_auto_picks_indexed_for_few_colors() {
    let mut pixels = Vec::new();
    for i in 0..64 {
        let c = if i % 2 == 0 { [10, 20, 30, 255] } else { [200, 100, 0, 255] };
        pixels.extend_from_slice(&c);
    }
    let png = create_png_auto(&pixels, 8, 8).unwrap();
    let chunks = chunks(&png);
    assert_eq!(chunks[0].1[9], 3);
    let plte = chunks.iter().find(|(n, _)| n == "PLTE").unwrap();
    assert_eq!(plte.1.len(), 2 * 3);
    // Fully opaque palette needs no tRNS chunk.
    assert!(chunks.iter().all(|(n, _)| n != "tRNS"));
}

#[test]
fn test_auto_falls_back_to_rgba() {
    let mut pixels = Vec::with_capacity(300 * 4);
    for i in 0..300u32 {
        pixels.extend_from_slice(&[(i % 256) as u8, (i / 256) as u8, 7, 255]);
    }
    let png = create_png_auto(&pixels, 300, 1).unwrap();
    assert_eq!(chunks(&png)[0].1[9], 6);
}

#[test]
fn test_indexed_writes_transparency() {
    let palette = [(0, 0, 0, 0), (255, 255, 255, 255)];
    let png = create_png_indexed(2, 1, &palette, &[0, 1]).unwrap();
    let chunks = chunks(&png);
    let trns = chunks.iter().find(|(n, _)| n == "tRNS").unwrap();
    assert_eq!(trns.1, vec![0, 255]);
}

#[test]
fn test_indexed_rejects_empty_palette() {
    assert!(create_png_indexed(1, 1, &[], &[0]).is_err());
}

// ============================================================================
// Surface encoding
// ============================================================================

#[test]
fn test_encode_surface_roundtrips_pixels() {
    let mut surface = PixmapSurface::new(4, 3).unwrap();
    surface.clear(Color::rgb(10, 10, 10));
    surface.fill_rect(0.0, 0.0, 2.0, 3.0, Color::rgb(250, 0, 0));

    let png = encode_surface(&surface).unwrap();
    let chunks = chunks(&png);
    assert_eq!(&chunks[0].1[0..4], &4u32.to_be_bytes());
    assert_eq!(&chunks[0].1[4..8], &3u32.to_be_bytes());
    assert_eq!(chunks[0].1[9], 3);

    let plte = &chunks.iter().find(|(n, _)| n == "PLTE").unwrap().1;
    let idat = &chunks.iter().find(|(n, _)| n == "IDAT").unwrap().1;
    let raw = inflate(idat);
    for row in raw.chunks(1 + 4) {
        let left = row[1] as usize;
        let right = row[4] as usize;
        assert_eq!(&plte[left * 3..left * 3 + 3], &[250, 0, 0]);
        assert_eq!(&plte[right * 3..right * 3 + 3], &[10, 10, 10]);
    }
}
