use crate::error::RouteError;
use crate::geometry::math::{is_horizontal_side, offset_point};
use crate::model::{AnchorSide, ControlPoint, LayoutConfig};

/// Immutable per-gesture view of one edge: the live polyline, the layout
/// constants, and the derived anchor/witness points. Built fresh from the
/// stored point sequence on every drag-resolution call.
#[derive(Clone, Debug)]
pub struct EdgeContext {
    pub points: Vec<ControlPoint>,
    pub offset: f32,
    pub handler_width: f32,
    pub source_side: AnchorSide,
    pub target_side: AnchorSide,
    pub source: ControlPoint,
    pub target: ControlPoint,
    /// Pulled back from `source` by `offset` along the exit direction.
    /// Validity witness only; never rendered.
    pub source_offset: ControlPoint,
    pub target_offset: ControlPoint,
}

impl EdgeContext {
    pub fn new(
        points: Vec<ControlPoint>,
        config: &LayoutConfig,
        source_side: AnchorSide,
        target_side: AnchorSide,
    ) -> Result<Self, RouteError> {
        if points.len() < 2 {
            return Err(RouteError::InvalidPath(points.len()));
        }
        let source = points[0];
        let target = points[points.len() - 1];
        let source_offset = offset_point(&source, source_side, config.offset);
        let target_offset = offset_point(&target, target_side, config.offset);
        Ok(EdgeContext {
            points,
            offset: config.offset,
            handler_width: config.handler_width,
            source_side,
            target_side,
            source,
            target,
            source_offset,
            target_offset,
        })
    }

    pub fn is_horizontal_layout(&self) -> bool {
        is_horizontal_side(self.source_side)
    }

    pub fn min_handler_width(&self) -> f32 {
        self.handler_width + 2.0 * self.offset
    }
}
