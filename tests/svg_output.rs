use expense_chart::chart::{ChartOptions, render_chart};
use expense_chart::plotters_surface::render_image;
use expense_chart::svg::SvgDocument;
use expense_chart::{Dataset, RecordingSurface};
use std::fs;
use tempfile::tempdir;

fn sample() -> Dataset {
    Dataset::try_from(vec![
        ("A".to_string(), 10.0),
        ("B".to_string(), -20.0),
        ("C".to_string(), 5.0),
    ])
    .unwrap()
}

#[test]
fn inline_svg_matches_expected_markup() {
    let opts = ChartOptions::default();
    let mut doc = SvgDocument::new(opts.width, opts.height).with_id("graph");
    render_chart(&mut doc, &sample(), &opts).unwrap();
    let svg = doc.to_svg_string();

    let expected = "\
<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"graph\" viewBox=\"0 0 300 100\" preserveAspectRatio=\"none\">
  <line x1=\"0\" y1=\"0\" x2=\"0\" y2=\"100\" stroke=\"black\" stroke-width=\"1\"/>
  <line x1=\"0\" y1=\"50\" x2=\"300\" y2=\"50\" stroke=\"black\" stroke-width=\"1\"/>
  <text x=\"2\" y=\"10\" font-size=\"8\" font-family=\"sans-serif\" fill=\"black\">±20</text>
  <rect x=\"1\" y=\"25\" width=\"99\" height=\"25\" fill=\"green\"/>
  <rect x=\"101\" y=\"50\" width=\"99\" height=\"50\" fill=\"red\"/>
  <rect x=\"201\" y=\"37.5\" width=\"99\" height=\"12.5\" fill=\"green\"/>
</svg>
";
    assert_eq!(svg, expected);
}

#[test]
fn replayed_recording_produces_identical_svg() {
    let opts = ChartOptions::default();
    let mut recorded = RecordingSurface::new();
    render_chart(&mut recorded, &sample(), &opts).unwrap();

    let mut direct = SvgDocument::new(opts.width, opts.height);
    render_chart(&mut direct, &sample(), &opts).unwrap();
    let mut replayed = SvgDocument::new(opts.width, opts.height);
    recorded.replay(&mut replayed).unwrap();

    assert_eq!(direct.to_svg_string(), replayed.to_svg_string());
}

#[test]
fn svg_file_is_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    let opts = ChartOptions::default();
    let mut doc = SvgDocument::new(opts.width, opts.height);
    render_chart(&mut doc, &sample(), &opts).unwrap();
    doc.save(&path).unwrap();
    let txt = fs::read_to_string(&path).unwrap();
    assert_eq!(txt.matches("<rect ").count(), 3);
}

#[test]
fn plotters_svg_image_is_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart_px.svg");
    let out = render_image(&sample(), &path, &ChartOptions::default(), 2).unwrap();
    assert_eq!(out.bars.len(), 3);
    let txt = fs::read_to_string(&path).unwrap();
    assert!(txt.contains("<svg"));
    assert!(txt.contains("±20"));
}

#[test]
fn png_image_is_written_without_font() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.png");
    render_image(&sample(), &path, &ChartOptions::default(), 2).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "png has content");
}

#[test]
fn failed_render_creates_no_image() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zero.png");
    let zero = Dataset::try_from(vec![("A".to_string(), 0.0)]).unwrap();
    assert!(render_image(&zero, &path, &ChartOptions::default(), 2).is_err());
    assert!(!path.exists());
}
