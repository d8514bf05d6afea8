/// One display-side frame of an animated zoom.
///
/// Expressed in pixel space of the previously rendered grid: the display
/// centers its view on `center` and magnifies it by `1 / zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFrame {
    pub index: u32,
    pub center: (f64, f64),
    pub zoom: f64,
}

/// Linear interpolation from `old_center` at zoom 1 towards `new_center`
/// at `zoom`, over `frames` steps.
///
/// Frame `i` sits at `i / frames` of the way, so the last frame stops one
/// step short of the target; the freshly generated grid replaces it.
pub fn zoom_frames(
    old_center: (f64, f64),
    new_center: (f64, f64),
    zoom: f64,
    frames: u32,
) -> impl Iterator<Item = ZoomFrame> {
    let n = frames.max(1) as f64;
    let step_x = (new_center.0 - old_center.0) / n;
    let step_y = (new_center.1 - old_center.1) / n;
    let step_zoom = (zoom - 1.0) / n;

    (0..frames).map(move |i| {
        let t = i as f64;
        ZoomFrame {
            index: i,
            center: (old_center.0 + t * step_x, old_center.1 + t * step_y),
            zoom: 1.0 + t * step_zoom,
        }
    })
}
