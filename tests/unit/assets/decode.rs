use std::io::Cursor;

use super::*;

fn png_1x1(px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, px.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_1x1([100, 50, 200, 128]);
    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_corrupt_bytes() {
    assert!(decode_image(b"definitely not a png").is_err());
}

#[test]
fn data_uri_base64_roundtrips_png() {
    let buf = png_1x1([1, 2, 3, 255]);
    let uri = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&buf)
    );
    assert!(is_data_uri(&uri));
    let parsed = parse_data_uri(&uri).unwrap();
    assert_eq!(parsed.mime, "image/png");
    assert_eq!(parsed.bytes, buf);
}

#[test]
fn data_uri_plain_payload_is_percent_decoded() {
    let parsed = parse_data_uri("data:,hello%20world").unwrap();
    assert_eq!(parsed.mime, "text/plain");
    assert_eq!(parsed.bytes, b"hello world");

    assert!(parse_data_uri("data:image/png;base64").is_err());
    assert!(parse_data_uri("data:,bad%2").is_err());
    assert!(parse_data_uri("https://example.com/a.png").is_err());
}

#[test]
fn from_premul_rgba8_checks_length() {
    assert!(DecodedImage::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(DecodedImage::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
}

#[test]
fn non_ascii_urls_are_not_data_uris() {
    for url in ["日本.png", "dat日本", "ロゴ/画像.png", "é"] {
        assert!(!is_data_uri(url), "{url}");
        assert!(parse_data_uri(url).is_err(), "{url}");
    }
    let uri = parse_data_uri("DATA:text/plain,日本").unwrap();
    assert_eq!(uri.bytes, "日本".as_bytes());
}
