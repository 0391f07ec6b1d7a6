use tracing::debug;

use crate::algorithms::merge::merge_points;
use crate::algorithms::split::split_points;
use crate::algorithms::validity::is_valid_points;
use crate::geometry::math::distance;
use crate::geometry::tolerance::EPS_POS;
use crate::model::{ControlPoint, DragEvent, IdSource};
use crate::segment::Segment;
use crate::session::{SessionState, SessionStore};

/// Resolves one pointer-move event against the live polyline and returns
/// the point sequence to commit (possibly unchanged). Strategy order:
/// no-move redraw, split for anchor-fixed runs, merge (validity-checked)
/// for interior runs, then plain reposition as the safe fallback.
pub fn resolve_drag_impl(
    seg: &Segment<'_>,
    ev: &DragEvent,
    min_gap: f32,
    sessions: &mut SessionStore,
    ids: &mut dyn IdSource,
) -> Vec<ControlPoint> {
    let ctx = seg.ctx;
    if distance(&ev.from.start, &ev.to.start) < EPS_POS {
        // no movement, pure redraw
        return ctx.points.clone();
    }
    if seg.is_start_fixed() || seg.is_end_fixed() {
        if let Some(points) = split_points(seg, ev, min_gap, sessions, ids) {
            return points;
        }
    }
    if let Some(points) = merge_points(seg, ev, min_gap, sessions, ids) {
        if is_valid_points(ctx, &points) {
            return points;
        }
        debug!(idx = seg.idx, "merge candidate rejected, repositioning instead");
    }
    // Plain reposition: slide the run's two endpoints along the drag axis.
    let mut points = ctx.points.clone();
    if seg.is_horizontal() {
        points[seg.idx].y = ev.to.start.y;
        points[seg.idx + 1].y = ev.to.start.y;
    } else {
        points[seg.idx].x = ev.to.start.x;
        points[seg.idx + 1].x = ev.to.start.x;
    }
    sessions.put(
        &ev.drag_id,
        SessionState {
            drag_from: ev.drag_from.clone(),
            start: points[seg.idx],
            end: points[seg.idx + 1],
            target: None,
        },
    );
    points
}
