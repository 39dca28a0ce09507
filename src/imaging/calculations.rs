//! Pure calculation functions for rendition dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Scale dimensions to fit within a bounding box, preserving aspect ratio.
///
/// Height is clamped first: if the height exceeds `max_height`, scale so the
/// height equals `max_height` and recompute the width proportionally. Then,
/// if the resulting width still exceeds `max_width`, scale again so the
/// width equals `max_width` and recompute the height. The result never
/// exceeds the box in either dimension.
///
/// There is no "never enlarge" guard: the clamps only ever shrink, so an
/// original already smaller than the box passes through at its own size and
/// nothing is blown up past the source dimensions.
///
/// # Examples
/// ```
/// # use obscura::imaging::fit_within;
/// // 4000×3000 into 300×200: height binds, width follows proportionally
/// assert_eq!(fit_within((4000, 3000), (300, 200)), (267, 200));
/// ```
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (max_w, max_h) = bounds;
    let mut w = source.0 as f64;
    let mut h = source.1 as f64;

    if h > max_h as f64 {
        w = w / h * max_h as f64;
        h = max_h as f64;
    }
    if w > max_w as f64 {
        h = h / w * max_w as f64;
        w = max_w as f64;
    }

    // Extreme aspect ratios can round a dimension down to zero; the encoder
    // needs at least one pixel on each edge.
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}
