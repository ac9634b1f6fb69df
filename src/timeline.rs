//! Animation values as pure functions of UI state.
//!
//! Renderers call these every frame with the current state and clock; nothing
//! here holds state of its own.

use std::f32::consts::TAU;

/// Nav bar slide distance when hidden, in points
pub const NAV_HIDDEN_OFFSET: f32 = -100.0;

/// Nav show/hide tween duration, in seconds
pub const NAV_TWEEN_SECS: f32 = 0.2;

/// Hero clip fade-in duration, in seconds
pub const HERO_FADE_SECS: f64 = 1.0;

/// Hero frame corners at full scroll progress, as fractions of the frame size.
/// Order: top-left, top-right, bottom-right, bottom-left.
const HERO_CLIP: [(f32, f32); 4] = [(0.14, 0.0), (0.72, 0.0), (0.88, 0.90), (0.0, 0.95)];

const FULL_FRAME: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Target `(y offset, opacity)` of the nav bar
pub fn nav_offset(visible: bool) -> (f32, f32) {
    if visible { (0.0, 1.0) } else { (NAV_HIDDEN_OFFSET, 0.0) }
}

/// Move `current` toward `target`, covering the full distance in `duration` seconds
pub fn approach(current: f32, target: f32, dt: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return target;
    }
    let t = (dt / duration).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// `power1.out` easing
fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Opacity of a hero clip `elapsed` seconds after it loaded
pub fn fade_in(elapsed: f64) -> f32 {
    let t = (elapsed / HERO_FADE_SECS).clamp(0.0, 1.0) as f32;
    ease_out_quad(t)
}

/// Scroll progress of the hero frame animation.
///
/// Starts when the frame's centre sits at the viewport centre (scroll 0) and
/// ends when its bottom edge reaches the viewport centre.
pub fn hero_scroll_progress(scroll_y: f32, hero_height: f32) -> f32 {
    if hero_height <= 0.0 {
        return 0.0;
    }
    (scroll_y / (hero_height / 2.0)).clamp(0.0, 1.0)
}

/// Hero frame outline at `progress`, as fractions of the frame size.
///
/// Progress 0 is the full rectangle; progress 1 is the clipped polygon.
pub fn hero_frame_polygon(progress: f32) -> [(f32, f32); 4] {
    let t = progress.clamp(0.0, 1.0);
    std::array::from_fn(|i| {
        let (fx, fy) = FULL_FRAME[i];
        let (cx, cy) = HERO_CLIP[i];
        (fx + (cx - fx) * t, fy + (cy - fy) * t)
    })
}

/// Height of audio indicator bar `bar` (1-based) as a fraction of its maximum
pub fn indicator_bar_height(bar: u32, time: f64, active: bool) -> f32 {
    const REST: f32 = 0.25;
    const PERIOD_SECS: f64 = 0.5;

    if !active {
        return REST;
    }
    let phase = ((time - bar as f64 * 0.1) / PERIOD_SECS) as f32;
    REST + (1.0 - REST) * (0.5 + 0.5 * (phase * TAU).sin())
}
