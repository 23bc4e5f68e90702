/// Interleaved RGB image with every pixel within half a pixel of a circle of
/// radius `r` set to white, black elsewhere.
pub fn ring_rgb(width: usize, height: usize, center: (f64, f64), r: f64) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    paint(width, height, |x, y| {
        let d = (x - center.0).hypot(y - center.1);
        if (d - r).abs() <= 0.5 {
            [255, 255, 255]
        } else {
            [0, 0, 0]
        }
    })
}

/// Filled discs of colour `fg` on a `bg` background.
pub fn discs_rgb(
    width: usize,
    height: usize,
    discs: &[((f64, f64), f64)],
    fg: [u8; 3],
    bg: [u8; 3],
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    paint(width, height, |x, y| {
        let inside = discs
            .iter()
            .any(|&((cx, cy), r)| (x - cx).hypot(y - cy) <= r);
        if inside {
            fg
        } else {
            bg
        }
    })
}

fn paint(width: usize, height: usize, f: impl Fn(f64, f64) -> [u8; 3]) -> Vec<u8> {
    let mut img = Vec::with_capacity(3 * width * height);
    for y in 0..height {
        for x in 0..width {
            img.extend_from_slice(&f(x as f64, y as f64));
        }
    }
    img
}
