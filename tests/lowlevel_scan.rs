use pixseek::lowlevel::{pixels_match, sampling_stride, verify_interior, NeedleCorners};
use pixseek::{MatchConfig, Matcher, OwnedImage, Rect, Rgba16};

fn make_stripes(width: usize, height: usize) -> OwnedImage {
    OwnedImage::from_fn(width, height, |x, y| {
        let band = ((x / 3) + (y / 2)) % 4;
        Rgba16::from_rgb8((band * 60) as u8, 90, (255 - band * 60) as u8)
    })
    .unwrap()
}

#[test]
fn manual_loop_over_a_window_agrees_with_matcher() {
    let haystack = make_stripes(30, 20);
    let needle = OwnedImage::from_source(&haystack.view().region(6, 4, 6, 4).unwrap()).unwrap();
    let cfg = MatchConfig::default().with_color_tolerance(0);
    let corners = NeedleCorners::sample(&needle).unwrap().unwrap();

    // Restrict anchors to a window the full matcher also covers.
    let window = Rect::new(0, 0, 15, 10);
    let mut manual = Vec::new();
    for y in window.min_y..window.max_y {
        for x in window.min_x..window.max_x {
            if corners.matches_at(&haystack, x, y, cfg.color_tolerance).unwrap()
                && verify_interior(&haystack, &needle, x, y, cfg.sample_stride, cfg.color_tolerance)
                    .unwrap()
            {
                manual.push(Rect::from_anchor(x, y, 6, 4));
            }
        }
    }

    let full: Vec<Rect> = Matcher::new(&needle)
        .unwrap()
        .with_config(cfg)
        .find_all(&haystack)
        .unwrap()
        .into_iter()
        .filter(|r| window.contains(r.min_x, r.min_y))
        .collect();
    assert!(manual.contains(&Rect::new(6, 4, 12, 8)));
    assert_eq!(manual, full);
}

#[test]
fn helpers_expose_the_tolerance_and_stride_rules() {
    let a = Rgba16::opaque(100, 200, 300);
    let b = Rgba16::new(110, 190, 300, 0);
    assert!(pixels_match(a, b, 10));
    assert!(!pixels_match(a, b, 9));

    assert_eq!(sampling_stride(10, 64, 48), 10);
    assert_eq!(sampling_stride(10, 8, 48), 1);
    assert_eq!(sampling_stride(0, 64, 48), 1);
}
