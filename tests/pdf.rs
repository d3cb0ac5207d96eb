use report_composer::*;
use std::io::Read;

const SERIF: &[u8] = include_bytes!("../assets/DejaVuSerif.ttf");

fn family() -> FontFamily {
    FontFamily::new(Font::load(SERIF.to_vec()).expect("valid font"))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn png() -> Vec<u8> {
    let mut bytes = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image::RgbImage::new(40, 20))
        .write_to(&mut bytes, image::ImageOutputFormat::Png)
        .expect("can encode");
    bytes.into_inner()
}

#[test]
fn report_renders_to_a_pdf_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let plot = dir.path().join("plot.png");
    std::fs::write(&plot, png()).expect("can write plot");

    let family = family();
    let geometry =
        PageGeometry::new(pagesize::REPORT, Margins::all(Mm(10.0))).expect("valid geometry");
    let mut composer = Composer::new(ComposerConfig::new(geometry), &family);
    let report = Report {
        customer: "ACME".to_string(),
        plot: Some(plot),
        caption: "Spectrum".to_string(),
        notes: lipsum::lipsum(300),
        ..Default::default()
    };
    report.compose(&mut composer);
    let composition = composer.finish();
    let pages = composition.page_count();

    let mut doc = Document::from_composition(composition, family);
    let mut info = Info::new();
    info.title("Vibration report");
    doc.set_info(info);
    assert_eq!(doc.page_order.len(), pages);
    assert_eq!(doc.images.len(), 1);

    let out = dir.path().join("report.pdf");
    doc.save(&out).expect("can save");

    let mut bytes = Vec::new();
    std::fs::File::open(&out)
        .expect("saved file")
        .read_to_end(&mut bytes)
        .expect("readable");
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"/Subtype /Image"));
    assert!(contains(&bytes, b"(Vibration report)"));
    assert!(contains(&bytes, format!("/Count {pages}").as_bytes()));
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("no").join("such").join("report.pdf");

    let family = family();
    let geometry = PageGeometry::from_pixels(Px(1000.0), Px(1000.0)).expect("valid geometry");
    let mut composer = Composer::new(ComposerConfig::new(geometry), &family);
    composer.add_text("hello", Style::default());
    let doc = Document::from_composition(composer.finish(), family);

    match doc.save(&path) {
        Err(ComposeError::SinkUnavailable { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an unavailable sink, got {other:?}"),
    }
}
