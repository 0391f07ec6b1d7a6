use serde::{Deserialize, Serialize};

/// Opaque identity for a control point. Keys host-side state; never used
/// for geometric equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(pub u64);

/// External id-provider collaborator. Every point synthesized by a split
/// or merge gets a fresh id; surviving points keep theirs.
pub trait IdSource {
    fn next_id(&mut self) -> PointId;
}

/// Default monotonic id source.
#[derive(Clone, Debug, Default)]
pub struct SeqIds {
    next: u64,
}

impl IdSource for SeqIds {
    fn next_id(&mut self) -> PointId {
        self.next += 1;
        PointId(self.next)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ControlPoint {
    pub id: PointId,
    pub x: f32,
    pub y: f32,
}

/// Directed segment; start -> end order matters for reversal tests.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Line {
    pub start: ControlPoint,
    pub end: ControlPoint,
}

/// Which side of a node an anchor exits from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
}

/// Stored layout of one connector: an orthogonal polyline from the source
/// anchor to the target anchor, plus the anchors' exit sides.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeLayout {
    pub points: Vec<ControlPoint>,
    pub source_side: AnchorSide,
    pub target_side: AnchorSide,
}

/// Layout constants supplied by the host canvas.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Minimum clearance a routed segment keeps from an anchor before turning.
    pub offset: f32,
    /// Minimum draggable segment length.
    pub handler_width: f32,
    /// Snap threshold for split/merge decisions.
    pub min_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            offset: 20.0,
            handler_width: 20.0,
            min_gap: crate::geometry::tolerance::DEFAULT_MIN_GAP,
        }
    }
}

/// One pointer-move of a drag gesture, as delivered by the host canvas.
/// `from` is the dragged segment before this event, `to` its dragged
/// position now.
#[derive(Clone, Debug)]
pub struct DragEvent {
    pub drag_id: String,
    pub drag_from: Option<String>,
    pub from: Line,
    pub to: Line,
}
