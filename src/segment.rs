use crate::context::EdgeContext;
use crate::geometry::math::distance;
use crate::geometry::tolerance::{approx_eq, EPS_POS};
use crate::model::ControlPoint;

/// One segment of the polyline, as an index view over the context's point
/// sequence: segment `idx` spans points `[idx, idx + 1]`. Built fresh per
/// resolution call; nothing here outlives the context it borrows.
#[derive(Clone, Copy)]
pub struct Segment<'a> {
    pub idx: usize,
    pub ctx: &'a EdgeContext,
}

impl<'a> Segment<'a> {
    pub fn new(ctx: &'a EdgeContext, idx: usize) -> Option<Segment<'a>> {
        if idx + 1 < ctx.points.len() {
            Some(Segment { idx, ctx })
        } else {
            None
        }
    }

    pub fn start(&self) -> &ControlPoint {
        &self.ctx.points[self.idx]
    }

    pub fn end(&self) -> &ControlPoint {
        &self.ctx.points[self.idx + 1]
    }

    pub fn length(&self) -> f32 {
        distance(self.start(), self.end())
    }

    pub fn is_horizontal(&self) -> bool {
        approx_eq(self.start().y, self.end().y, EPS_POS)
    }

    /// Nearest run with the same orientation, two segments back in the
    /// alternating horizontal/vertical sequence.
    pub fn previous(&self) -> Option<Segment<'a>> {
        self.idx.checked_sub(2).and_then(|i| Segment::new(self.ctx, i))
    }

    /// Nearest run with the same orientation, two segments ahead.
    pub fn next(&self) -> Option<Segment<'a>> {
        Segment::new(self.ctx, self.idx + 2)
    }

    pub fn is_source(&self) -> bool {
        self.idx == 0
    }

    pub fn is_source_offset(&self) -> bool {
        self.idx == 1
    }

    pub fn is_target(&self) -> bool {
        self.idx + 2 == self.ctx.points.len()
    }

    pub fn is_target_offset(&self) -> bool {
        self.idx + 3 == self.ctx.points.len()
    }

    /// The segment's start is pinned to the source anchor corridor.
    pub fn is_start_fixed(&self) -> bool {
        self.is_source() || self.is_source_offset()
    }

    pub fn is_end_fixed(&self) -> bool {
        self.is_target() || self.is_target_offset()
    }

    /// Whether the host should offer a drag handle on this segment. Runs
    /// touching a fixed anchor are only draggable once they are long
    /// enough to split.
    pub fn can_drag(&self) -> bool {
        if self.is_start_fixed() || self.is_end_fixed() {
            return self.can_split();
        }
        self.length() >= self.ctx.min_handler_width()
    }

    /// Whether a split can carve a `min_handler_width` detour out of this
    /// segment while keeping `offset` clearance on both flanks.
    pub fn can_split(&self) -> bool {
        self.length() >= self.ctx.min_handler_width() + 2.0 * self.ctx.offset
    }
}
