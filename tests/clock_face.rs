/*
 *  tests/clock_face.rs
 *
 *  Integration tests: attributes to pixels through the public API
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 */

use std::collections::HashMap;
use std::time::Duration;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::Size;

use clockface::canvas::{EgCanvas, RecordingCanvas};
use clockface::config::{self, Cli};
use clockface::face::{
    measure, AttrValue, ClockStyle, ClockTime, FixedClock, MeasureSpec, Shape,
};
use clockface::vframebuf::VarFrameBuf;
use clockface::view::{ClockView, Lifecycle, ManualScheduler, Redraw};

const SURFACE: Rgb888 = Rgb888::new(0, 0, 80);

fn rasterise(style: ClockStyle, time: ClockTime, side: u32) -> VarFrameBuf<Rgb888> {
    let mut view = ClockView::new(style, ManualScheduler::new(), FixedClock(time));
    view.on_measure(MeasureSpec::exactly(side), MeasureSpec::exactly(side));
    let mut fb = VarFrameBuf::new(side, side, SURFACE);
    view.on_draw(&mut EgCanvas::new(&mut fb)).unwrap();
    fb
}

#[test]
fn test_size_negotiation() {
    let cases = [
        (MeasureSpec::exactly(200), MeasureSpec::exactly(300), 200),
        (MeasureSpec::at_most(500), MeasureSpec::exactly(150), 150),
        (MeasureSpec::exactly(150), MeasureSpec::unspecified(400), 150),
        (MeasureSpec::at_most(400), MeasureSpec::at_most(250), 250),
        (MeasureSpec::unspecified(0), MeasureSpec::unspecified(0), 0),
    ];
    for (w, h, side) in cases {
        assert_eq!(measure(w, h), Size::new(side, side), "{:?} x {:?}", w, h);
    }
}

#[test]
fn test_attributes_resolve_with_fallback() {
    let mut attrs: HashMap<String, AttrValue> = HashMap::new();
    attrs.insert("shape".into(), AttrValue::Int(1));
    attrs.insert("hasSeconds".into(), AttrValue::Bool(true));
    attrs.insert("dialColor".into(), AttrValue::from("#00ff00"));
    // unusable: falls back to the default colour
    attrs.insert("mainColor".into(), AttrValue::from("not a colour"));

    let style = ClockStyle::from_attributes(&attrs);
    assert_eq!(style.shape, Shape::Square);
    assert!(style.has_seconds);
    assert!(!style.has_numbers);
    assert_eq!(style.dial_color, Rgb888::GREEN);
    assert_eq!(style.main_color, Rgb888::BLACK);
    assert_eq!(style.second_hand_color, Rgb888::RED);

    let empty: HashMap<String, AttrValue> = HashMap::new();
    assert_eq!(ClockStyle::from_attributes(&empty), ClockStyle::default());
}

#[test]
fn test_round_face_pixels() {
    let fb = rasterise(ClockStyle::default(), ClockTime::new(3, 0, 0), 100);
    // corner lies outside the round background
    assert_eq!(fb.pixel(0, 0), Some(SURFACE));
    // ring between dial and background edge
    assert_eq!(fb.pixel(3, 50), Some(Rgb888::BLACK));
    // open dial below the center
    assert_eq!(fb.pixel(50, 85), Some(Rgb888::WHITE));
    // hour hand points at three
    let on_hand = [fb.pixel(65, 49), fb.pixel(65, 50)];
    assert!(on_hand.contains(&Some(Rgb888::BLACK)), "{:?}", on_hand);
}

#[test]
fn test_square_face_pixels() {
    let style = ClockStyle { shape: Shape::Square, ..ClockStyle::default() };
    let fb = rasterise(style, ClockTime::new(3, 0, 0), 100);
    // rounded corner stays clear, edge midpoint is filled
    assert_eq!(fb.pixel(0, 0), Some(SURFACE));
    assert_eq!(fb.pixel(1, 50), Some(Rgb888::BLACK));
    assert_eq!(fb.pixel(50, 85), Some(Rgb888::WHITE));
}

#[test]
fn test_repeated_draw_is_pixel_identical() {
    let style = ClockStyle { has_numbers: true, has_seconds: true, ..ClockStyle::default() };
    let t = ClockTime::new(10, 8, 42);
    let a = rasterise(style, t, 160);
    let b = rasterise(style, t, 160);
    assert_eq!(a.as_slice(), b.as_slice());

    // and a different time actually changes the picture
    let c = rasterise(style, ClockTime::new(4, 40, 0), 160);
    assert_ne!(a.as_slice(), c.as_slice());
}

#[test]
fn test_numerals_placed_around_dial() {
    let style = ClockStyle { has_numbers: true, ..ClockStyle::default() };
    let mut view = ClockView::new(style, ManualScheduler::new(), FixedClock(ClockTime::default()));
    view.on_measure(MeasureSpec::exactly(200), MeasureSpec::exactly(200));
    let mut canvas = RecordingCanvas::new();
    view.on_draw(&mut canvas).unwrap();

    let texts: Vec<_> = canvas.texts().collect();
    assert_eq!(texts.len(), 12);
    let pos = |label: &str| *texts.iter().find(|(t, _)| *t == label).unwrap().1;

    let (twelve, three, six, nine) = (pos("12"), pos("3"), pos("6"), pos("9"));
    assert!(twelve.y < six.y);
    assert!(nine.x < three.x);
    assert!((twelve.x - six.x).abs() < 1e-3);
    assert!((three.y - nine.y).abs() < 1e-3);
}

#[test]
fn test_view_lifecycle_end_to_end() {
    let style = ClockStyle::default();
    let mut view = ClockView::new(style, ManualScheduler::new(), FixedClock(ClockTime::new(8, 30, 20)));
    assert_eq!(view.lifecycle(), Lifecycle::Created);
    view.on_measure(MeasureSpec::at_most(64), MeasureSpec::at_most(48));
    assert_eq!(view.size(), Size::new(48, 48));

    view.on_attached();
    let mut fb = VarFrameBuf::new(64, 48, SURFACE);
    for _ in 0..3 {
        assert!(view.scheduler_mut().fire_next().is_some());
        view.on_draw(&mut EgCanvas::new(&mut fb)).unwrap();
        assert_eq!(
            view.scheduler().last().unwrap().redraw,
            Redraw::After(Duration::from_secs(40))
        );
    }
    assert_eq!(view.frames(), 3);

    view.on_detached();
    assert_eq!(view.scheduler().pending().count(), 0);
    assert_eq!(view.scheduler_mut().fire_next(), None);
}

#[test]
fn test_config_file_drives_style() {
    let path = std::env::temp_dir().join(format!("clockface-test-{}.yaml", std::process::id()));
    std::fs::write(
        &path,
        "fps: 10\nat: \"04:05:06\"\nstyle:\n  shape: 1\n  has_numbers: true\n  second_hand_color: blue\n",
    )
    .unwrap();

    let cli = Cli {
        config: Some(path.clone()),
        seconds: Some(true),
        ..Default::default()
    };
    let cfg = config::load_with(&cli).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.fps(), 10);
    assert_eq!(cfg.fixed_time(), Some(ClockTime::new(4, 5, 6)));
    let style = ClockStyle::from_attributes(&cfg.style());
    assert_eq!(style.shape, Shape::Square);
    assert!(style.has_numbers);
    assert!(style.has_seconds);
    assert_eq!(style.second_hand_color, Rgb888::BLUE);
}
