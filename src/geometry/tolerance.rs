// Centralized tolerances for connector geometry

pub const EPS_POS: f32 = 1e-5; // point coincidence / no-move threshold (px)

// Snap threshold for split/merge decisions (px). Empirically tuned; kept
// configurable through LayoutConfig rather than derived.
pub const DEFAULT_MIN_GAP: f32 = 10.0;

#[inline]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[inline]
pub fn near_zero(x: f32, eps: f32) -> bool {
    x.abs() <= eps
}
