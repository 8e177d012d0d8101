use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn unpremultiplies_before_encoding() {
    let f = frame(vec![128, 0, 0, 128, 0, 0, 0, 0], true);
    let png = encode_png(&f).unwrap();
    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(back.get_pixel(1, 0).0, [0, 0, 0, 0]);
}

#[test]
fn straight_frames_pass_through() {
    let f = frame(vec![10, 20, 30, 40, 1, 2, 3, 255], false);
    assert_eq!(straight_rgba8(&f).unwrap(), f.data);
}

#[test]
fn short_buffers_are_rejected() {
    let f = frame(vec![0; 4], true);
    let err = encode_png(&f).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("framecut-png-{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    write_png(&path, &frame(vec![255; 8], true)).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
    let _ = std::fs::remove_dir_all(&dir);
}
