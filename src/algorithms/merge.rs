use tracing::debug;

use crate::geometry::tolerance::{approx_eq, EPS_POS};
use crate::model::{ControlPoint, DragEvent, IdSource, PointId};
use crate::segment::Segment;
use crate::session::{SessionState, SessionStore};

/// Merge protocol: when an interior dragged run comes close enough to a
/// same-orientation neighbor, collapse two or three runs into one.
///
/// Returns the new point sequence, or `None` when no merge condition is
/// met (the caller falls through to a plain reposition). The caller is
/// responsible for validity-checking the result before committing.
pub fn merge_points(
    seg: &Segment<'_>,
    ev: &DragEvent,
    min_gap: f32,
    sessions: &mut SessionStore,
    ids: &mut dyn IdSource,
) -> Option<Vec<ControlPoint>> {
    let ctx = seg.ctx;
    let horizontal = seg.is_horizontal();
    let prev = seg.previous();
    let next = seg.next();

    // Coordinates split into the run's own axis ("along") and the drag
    // axis ("perp"); one body covers both orientations.
    let perp = |p: &ControlPoint| if horizontal { p.y } else { p.x };
    let along = |p: &ControlPoint| if horizontal { p.x } else { p.y };
    let make = |id: PointId, along_c: f32, perp_c: f32| {
        if horizontal {
            ControlPoint { id, x: along_c, y: perp_c }
        } else {
            ControlPoint { id, x: perp_c, y: along_c }
        }
    };

    let from_c = perp(&ev.from.start);
    let to_c = perp(&ev.to.start);
    let prev_c = prev.as_ref().map(|p| perp(p.start()));
    let next_c = next.as_ref().map(|n| perp(n.start()));

    // Snap to whichever same-orientation neighbor sits closer to the drag
    // target; a lone neighbor wins by default.
    let target_c = match (prev_c, next_c) {
        (Some(p), Some(n)) => {
            if (to_c - p).abs() < (to_c - n).abs() {
                p
            } else {
                n
            }
        }
        (Some(p), None) => p,
        (None, Some(n)) => n,
        (None, None) => return None,
    };

    // Merge only while actively approaching the neighbor, and only once
    // inside the snap threshold.
    let current_gap = (to_c - target_c).abs();
    if (from_c - target_c).abs() <= current_gap || current_gap >= min_gap {
        return None;
    }

    let prev_at = prev_c.map_or(false, |c| approx_eq(c, target_c, EPS_POS));
    let next_at = next_c.map_or(false, |c| approx_eq(c, target_c, EPS_POS));

    let points = &ctx.points;
    let start_points: &[ControlPoint] = prev.as_ref().map_or(&[], |p| &points[..p.idx]);
    let end_points: &[ControlPoint] = next.as_ref().map_or(&[], |n| &points[n.idx + 2..]);
    debug!(idx = seg.idx, horizontal, prev_at, next_at, "merging runs");

    let result = if prev_at && next_at {
        // previous, current and next fold into one straight run
        let p = prev.as_ref().unwrap();
        let n = next.as_ref().unwrap();
        let (s, e) = (*p.start(), *n.end());
        sessions.put(
            &ev.drag_id,
            SessionState { drag_from: ev.drag_from.clone(), start: s, end: e, target: None },
        );
        let mut out = Vec::with_capacity(start_points.len() + 2 + end_points.len());
        out.extend_from_slice(start_points);
        out.push(s);
        out.push(e);
        out.extend_from_slice(end_points);
        out
    } else if prev_at {
        // previous and current fold; current's end projects onto the
        // previous run's line
        let p = prev.as_ref().unwrap();
        let s = *p.start();
        let e = make(ids.next_id(), along(&ev.from.end), target_c);
        sessions.put(
            &ev.drag_id,
            SessionState { drag_from: ev.drag_from.clone(), start: s, end: e, target: None },
        );
        let mut out = Vec::with_capacity(start_points.len() + 4 + end_points.len());
        out.extend_from_slice(start_points);
        out.push(s);
        out.push(e);
        match next.as_ref() {
            Some(n) => {
                out.push(*n.start());
                out.push(*n.end());
            }
            // Last draggable run: close directly onto the target anchor.
            None => out.push(ctx.target),
        }
        out.extend_from_slice(end_points);
        out
    } else {
        // current and next fold; current's start projects onto the next
        // run's line
        let n = next.as_ref().unwrap();
        let s = make(ids.next_id(), along(&ev.from.start), target_c);
        let e = *n.end();
        sessions.put(
            &ev.drag_id,
            SessionState { drag_from: ev.drag_from.clone(), start: s, end: e, target: None },
        );
        let mut out = Vec::with_capacity(start_points.len() + 4 + end_points.len());
        out.extend_from_slice(start_points);
        match prev.as_ref() {
            Some(p) => {
                out.push(*p.start());
                out.push(*p.end());
            }
            // First draggable run: open directly from the source anchor.
            None => out.push(ctx.source),
        }
        out.push(s);
        out.push(e);
        out.extend_from_slice(end_points);
        out
    };
    Some(result)
}
