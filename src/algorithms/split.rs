use tracing::debug;

use crate::geometry::math::distance;
use crate::model::{ControlPoint, DragEvent, IdSource, Line};
use crate::segment::Segment;
use crate::session::{SessionState, SessionStore};

/// Split protocol: when the dragged segment touches a fixed anchor, keep
/// the mandated clearance by inserting a 4-point perpendicular detour
/// instead of moving the anchor run itself.
///
/// Returns the new full point sequence, or `None` when this segment is not
/// split-eligible (the caller then tries merge). Sub-`min_gap` moves return
/// the sequence unchanged after caching the candidate into the session.
pub fn split_points(
    seg: &Segment<'_>,
    ev: &DragEvent,
    min_gap: f32,
    sessions: &mut SessionStore,
    ids: &mut dyn IdSource,
) -> Option<Vec<ControlPoint>> {
    let ctx = seg.ctx;
    let from = &ev.from;
    let start_points = &ctx.points[..seg.idx + 1];
    let end_points = &ctx.points[seg.idx + 1..];

    // An earlier sub-threshold move of this gesture cached a target pair;
    // compose the new delta against that original geometry, not the
    // already-repositioned baseline.
    let mut to = ev.to;
    if let Some(state) = sessions.get(&ev.drag_id) {
        if let Some((ts, te)) = state.target {
            to = Line {
                start: ControlPoint {
                    id: ids.next_id(),
                    x: ts.x + (to.start.x - from.start.x),
                    y: ts.y + (to.start.y - from.start.y),
                },
                end: ControlPoint {
                    id: ids.next_id(),
                    x: te.x + (to.end.x - from.end.x),
                    y: te.y + (to.end.y - from.end.y),
                },
            };
        }
    }

    let horizontal = seg.is_horizontal();
    let source_delta = if horizontal {
        (ctx.source.y - to.start.y).abs()
    } else {
        (ctx.source.x - to.start.x).abs()
    };
    let target_delta = if horizontal {
        (ctx.target.y - to.end.y).abs()
    } else {
        (ctx.target.x - to.end.x).abs()
    };
    let move_delta = if horizontal {
        (from.start.y - to.start.y).abs()
    } else {
        (from.start.x - to.start.x).abs()
    };

    // The anchor runs always split; the offset runs split only once the
    // drag has pushed them inside the anchor's clearance zone.
    let (need_split, start_split) = if seg.is_source() {
        (true, source_delta > min_gap)
    } else if seg.is_target() {
        (true, target_delta > min_gap)
    } else if seg.is_source_offset() && source_delta < ctx.offset {
        (true, move_delta > min_gap)
    } else if seg.is_target_offset() && target_delta < ctx.offset {
        (true, move_delta > min_gap)
    } else {
        (false, false)
    };
    if !need_split {
        return None;
    }

    if !start_split {
        // Below the snap threshold: no geometry change, just remember the
        // candidate so the gesture keeps composing smoothly.
        sessions.put(
            &ev.drag_id,
            SessionState {
                drag_from: ev.drag_from.clone(),
                start: from.start,
                end: from.end,
                target: Some((to.start, to.end)),
            },
        );
        return Some(ctx.points.clone());
    }

    // Center the detour on the segment, leaving min_handler_width between
    // the two new stub points.
    let center = (distance(&from.start, &from.end) - ctx.min_handler_width()) / 2.0;
    debug!(idx = seg.idx, horizontal, center, "splitting anchor run");
    let (a, b, c, d);
    if horizontal {
        let dir = if from.start.x < from.end.x { 1.0 } else { -1.0 };
        let off = center * dir;
        a = ControlPoint { id: ids.next_id(), x: from.start.x + off, y: from.start.y };
        b = ControlPoint { id: ids.next_id(), x: from.start.x + off, y: to.start.y };
        c = ControlPoint { id: ids.next_id(), x: from.end.x - off, y: to.start.y };
        d = ControlPoint { id: ids.next_id(), x: from.end.x - off, y: from.start.y };
    } else {
        let dir = if from.start.y < from.end.y { 1.0 } else { -1.0 };
        let off = center * dir;
        a = ControlPoint { id: ids.next_id(), x: from.start.x, y: from.start.y + off };
        b = ControlPoint { id: ids.next_id(), x: to.start.x, y: from.start.y + off };
        c = ControlPoint { id: ids.next_id(), x: to.start.x, y: from.end.y - off };
        d = ControlPoint { id: ids.next_id(), x: from.start.x, y: from.end.y - off };
    }
    // b and c are the new draggable run; subsequent deltas measure from them.
    sessions.put(
        &ev.drag_id,
        SessionState {
            drag_from: ev.drag_from.clone(),
            start: b,
            end: c,
            target: None,
        },
    );

    let mut out = Vec::with_capacity(ctx.points.len() + 4);
    out.extend_from_slice(start_points);
    out.extend_from_slice(&[a, b, c, d]);
    out.extend_from_slice(end_points);
    Some(out)
}
