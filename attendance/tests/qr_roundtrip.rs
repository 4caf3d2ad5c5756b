use attendance::qr::{PNG_DATA_URI_PREFIX, QrGenerator, decode_data_uri, encode_png_data_uri};
use attendance::{CheckinUrls, Segment};
use image::{Rgba, RgbaImage};
use std::io::Write;
use tempfile::NamedTempFile;

fn generator(logo: Option<String>) -> QrGenerator {
    QrGenerator::new(600, logo, reqwest::Client::new())
}

/// Decodes a generated data URI back to the text it carries.
fn decode(uri: &str) -> String {
    let (media, bytes) = decode_data_uri(uri).expect("data uri");
    assert_eq!(media, "image/png");
    let img = image::load_from_memory(&bytes).expect("png").to_rgba8();
    assert_eq!(img.dimensions(), (600, 600));

    let (w, h) = img.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
        let Rgba([r, g, b, _]) = *img.get_pixel(x as u32, y as u32);
        ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
    });
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one code");
    let (_, content) = grids[0].decode().expect("decodable code");
    content
}

fn logo_png() -> Vec<u8> {
    let mut logo = RgbaImage::from_pixel(64, 64, Rgba([200, 30, 30, 255]));
    for y in 16..48 {
        for x in 16..48 {
            logo.put_pixel(x, y, Rgba([20, 40, 160, 255]));
        }
    }
    let uri = encode_png_data_uri(&logo).unwrap();
    decode_data_uri(&uri).unwrap().1
}

fn logo_data_uri() -> String {
    encode_png_data_uri(&image::load_from_memory(&logo_png()).unwrap().to_rgba8()).unwrap()
}

fn payloads() -> Vec<String> {
    let urls = CheckinUrls::new("https://hmpti.example.org").unwrap();
    let mut out: Vec<String> = Segment::ALL
        .iter()
        .map(|s| urls.build("5f0c2a8e-7d1b-4c55-9a3e-1b2c3d4e5f60", *s))
        .collect();
    out.push("evt1".into());
    out.push(urls.build("id with spaces/and#hash?", Segment::General));

    let long = format!("https://hmpti.example.org/attendance/senior/{}", "a".repeat(300));
    out.push(long[..300].to_owned());
    out
}

#[tokio::test]
async fn plain_codes_decode_to_their_payload() {
    let qr = generator(None);
    for data in payloads() {
        let uri = qr.generate(&data).await.expect("generate");
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));
        assert_eq!(decode(&uri), data);
    }
}

#[tokio::test]
async fn codes_with_a_file_logo_still_decode() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&logo_png()).unwrap();
    let qr = generator(Some(file.path().to_string_lossy().into_owned()));

    for data in payloads() {
        let with_logo = qr.generate(&data).await.expect("generate");
        assert_eq!(decode(&with_logo), data);
    }
}

#[tokio::test]
async fn logo_changes_the_centre_of_the_image() {
    let data = "https://hmpti.example.org/attendance/umum/evt1";
    let plain = generator(None).generate(data).await.unwrap();
    let with_logo = generator(Some(logo_data_uri())).generate(data).await.unwrap();

    assert_ne!(plain, with_logo);
    assert_eq!(decode(&with_logo), data);
}

#[tokio::test]
async fn per_call_logo_overrides_configuration() {
    let qr = generator(None);
    let data = "https://hmpti.example.org/attendance/panitia/evt1";
    let logo = logo_data_uri();
    let uri = qr.generate_with_logo(data, Some(&logo)).await.unwrap();
    assert_eq!(decode(&uri), data);
}

#[tokio::test]
async fn unusable_logos_degrade_to_plain_codes() {
    let garbage = {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"definitely not an image").unwrap();
        f
    };
    let sources = [
        "/nonexistent/dir/logo.png".to_owned(),
        garbage.path().to_string_lossy().into_owned(),
        "data:image/png;base64,@@@not-base64@@@".to_owned(),
        "data:image/png;base64,aGVsbG8=".to_owned(),
        "http://127.0.0.1:9/logo.png".to_owned(),
    ];

    let data = "https://hmpti.example.org/attendance/senior/evt1";
    let plain = generator(None).generate(data).await.unwrap();
    for source in sources {
        let uri = generator(Some(source.clone()))
            .generate(data)
            .await
            .unwrap_or_else(|e| panic!("{source} should degrade, got {e}"));
        assert_eq!(uri, plain, "{source}");
        assert_eq!(decode(&uri), data);
    }
}

#[tokio::test]
async fn oversized_payload_is_an_error() {
    let err = generator(None).generate(&"x".repeat(5000)).await;
    assert!(err.is_err());
}
