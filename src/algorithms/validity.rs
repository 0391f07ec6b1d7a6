use crate::context::EdgeContext;
use crate::geometry::math::{line_contains_point, lines_reverse_direction};
use crate::model::ControlPoint;

/// Whether a candidate point sequence still honors the anchor corridors:
/// the first segment must contain the source offset witness and the last
/// the target offset witness, and neither end pair of segments may fold
/// back on itself. Paths of fewer than four points are too short to fold
/// or clip clearance and are always valid.
pub fn is_valid_points(ctx: &EdgeContext, points: &[ControlPoint]) -> bool {
    if points.len() < 4 {
        return true;
    }
    let n = points.len();
    let first = (&points[0], &points[1]);
    let second = (&points[1], &points[2]);
    let penultimate = (&points[n - 3], &points[n - 2]);
    let last = (&points[n - 2], &points[n - 1]);

    if !line_contains_point(first.0, first.1, &ctx.source_offset)
        || !line_contains_point(last.0, last.1, &ctx.target_offset)
    {
        return false;
    }
    if lines_reverse_direction(first.0, first.1, second.0, second.1)
        || lines_reverse_direction(penultimate.0, penultimate.1, last.0, last.1)
    {
        return false;
    }
    true
}
