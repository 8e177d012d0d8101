use std::cell::Cell;
use std::io::Cursor;

use base64::Engine as _;

use super::*;

struct CountingLoader {
    calls: Cell<usize>,
}

impl ImageLoader for CountingLoader {
    async fn load(&self, url: &str) -> FramecutResult<DecodedImage> {
        self.calls.set(self.calls.get() + 1);
        if url.starts_with("bad") {
            return Err(FramecutError::decode("corrupt"));
        }
        DecodedImage::from_premul_rgba8(1, 1, vec![255, 0, 0, 255])
    }
}

fn png_data_uri(w: u32, h: u32) -> String {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([0, 255, 0, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&buf)
    )
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
}

#[test]
fn resolve_all_loads_each_url_once() {
    let loader = CountingLoader {
        calls: Cell::new(0),
    };
    let mut cache = ImageCache::new();

    let stats = pollster::block_on(cache.resolve_all(["a", "b", "a"], &loader));
    assert_eq!(stats.loaded, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(loader.calls.get(), 2);

    let stats = pollster::block_on(cache.resolve_all(["a", "b"], &loader));
    assert_eq!(stats.hits, 2);
    assert_eq!(loader.calls.get(), 2);
    assert!(cache.get("a").is_some());
}

#[test]
fn failures_are_remembered_until_forgotten() {
    let loader = CountingLoader {
        calls: Cell::new(0),
    };
    let mut cache = ImageCache::new();

    let stats = pollster::block_on(cache.resolve_all(["bad-url"], &loader));
    assert_eq!(stats.failed, 1);
    assert!(cache.get("bad-url").is_none());
    assert!(cache.failure("bad-url").unwrap().contains("corrupt"));

    pollster::block_on(cache.resolve_all(["bad-url"], &loader));
    assert_eq!(loader.calls.get(), 1);

    assert!(cache.forget("bad-url"));
    pollster::block_on(cache.resolve_all(["bad-url"], &loader));
    assert_eq!(loader.calls.get(), 2);
}

#[test]
fn url_loader_decodes_data_uris() {
    let loader = UrlImageLoader::default();
    let img = pollster::block_on(loader.load(&png_data_uri(3, 2))).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(&img.rgba8_premul[..4], &[0, 255, 0, 255]);

    assert!(pollster::block_on(loader.load("data:text/plain,hi")).is_err());
    assert!(pollster::block_on(loader.load("https://example.com/x.png")).is_err());
    assert!(pollster::block_on(loader.load("relative.png")).is_err());
}

#[test]
fn display_url_truncates_long_values() {
    assert_eq!(display_url("a.png"), "a.png");
    let long = png_data_uri(4, 4);
    let shown = display_url(&long);
    assert!(shown.starts_with("data:image/png;base64,"));
    assert!(shown.len() < long.len());
}
