use super::tolerance::{approx_eq, EPS_POS};
use crate::model::{AnchorSide, ControlPoint};

pub fn distance(a: &ControlPoint, b: &ControlPoint) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Left/right exits run horizontally, top/bottom vertically.
pub fn is_horizontal_side(side: AnchorSide) -> bool {
    matches!(side, AnchorSide::Left | AnchorSide::Right)
}

/// Point pulled back from an anchor by `offset` along its exit direction.
/// Keeps the anchor's id: witnesses are never rendered or stored.
pub fn offset_point(p: &ControlPoint, side: AnchorSide, offset: f32) -> ControlPoint {
    let (x, y) = match side {
        AnchorSide::Left => (p.x - offset, p.y),
        AnchorSide::Right => (p.x + offset, p.y),
        AnchorSide::Top => (p.x, p.y - offset),
        AnchorSide::Bottom => (p.x, p.y + offset),
    };
    ControlPoint { id: p.id, x, y }
}

/// True iff `p` lies on the axis-aligned segment a-b, endpoints included.
/// Exact-axis check on whichever axis the segment is constant on.
pub fn line_contains_point(a: &ControlPoint, b: &ControlPoint, p: &ControlPoint) -> bool {
    if approx_eq(a.y, b.y, EPS_POS) {
        approx_eq(p.y, a.y, EPS_POS)
            && p.x >= a.x.min(b.x) - EPS_POS
            && p.x <= a.x.max(b.x) + EPS_POS
    } else if approx_eq(a.x, b.x, EPS_POS) {
        approx_eq(p.x, a.x, EPS_POS)
            && p.y >= a.y.min(b.y) - EPS_POS
            && p.y <= a.y.max(b.y) + EPS_POS
    } else {
        false
    }
}

// Per-axis direction sign of an axis-aligned segment.
fn axis_sign(from: f32, to: f32) -> i8 {
    let d = to - from;
    if d > EPS_POS {
        1
    } else if d < -EPS_POS {
        -1
    } else {
        0
    }
}

/// True iff segment b1-b2 runs exactly opposite to segment a1-a2, i.e. the
/// path folds back on itself.
pub fn lines_reverse_direction(
    a1: &ControlPoint,
    a2: &ControlPoint,
    b1: &ControlPoint,
    b2: &ControlPoint,
) -> bool {
    let d1 = (axis_sign(a1.x, a2.x), axis_sign(a1.y, a2.y));
    let d2 = (axis_sign(b1.x, b2.x), axis_sign(b1.y, b2.y));
    if d1 == (0, 0) || d2 == (0, 0) {
        return false;
    }
    d1.0 == -d2.0 && d1.1 == -d2.1
}

fn reduce_once(points: &[ControlPoint]) -> Vec<ControlPoint> {
    let mut cleaned: Vec<ControlPoint> = Vec::with_capacity(points.len());
    for p in points {
        let dup = cleaned
            .last()
            .map(|last| approx_eq(last.x, p.x, EPS_POS) && approx_eq(last.y, p.y, EPS_POS))
            .unwrap_or(false);
        if !dup {
            cleaned.push(*p);
        }
    }
    let mut reduced: Vec<ControlPoint> = Vec::with_capacity(cleaned.len());
    for p in cleaned {
        while reduced.len() >= 2 {
            let a = reduced[reduced.len() - 2];
            let b = reduced[reduced.len() - 1];
            let collinear = (approx_eq(a.x, b.x, EPS_POS) && approx_eq(b.x, p.x, EPS_POS))
                || (approx_eq(a.y, b.y, EPS_POS) && approx_eq(b.y, p.y, EPS_POS));
            if collinear {
                reduced.pop();
            } else {
                break;
            }
        }
        reduced.push(p);
    }
    reduced
}

/// Collapses consecutive duplicates and collinear-redundant interior points
/// into a minimal equivalent polyline. Runs to a fixpoint so that removing
/// a fold-back run cannot leave a fresh duplicate behind; idempotent.
pub fn reduce_points(points: &[ControlPoint]) -> Vec<ControlPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut cur = reduce_once(points);
    loop {
        let next = reduce_once(&cur);
        if next.len() == cur.len() {
            return next;
        }
        cur = next;
    }
}
