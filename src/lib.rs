pub mod context;
pub mod error;
pub mod model;
pub mod segment;
pub mod session;
pub mod geometry {
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod drag;
    pub mod merge;
    pub mod split;
    pub mod validity;
}
mod json;

use std::collections::HashSet;

use tracing::trace;

use crate::algorithms::drag::resolve_drag_impl;
use crate::context::EdgeContext;
use crate::error::RouteError;
use crate::geometry::limits;
use crate::geometry::math::reduce_points;
use crate::model::{
    AnchorSide, ControlPoint, DragEvent, EdgeLayout, IdSource, LayoutConfig, SeqIds,
};
use crate::segment::Segment;
use crate::session::{SessionState, SessionStore};

/// Redraw bookkeeping handed to the host: which edges changed since the
/// last reset.
#[derive(Clone, Debug, Default)]
pub struct DirtyState {
    pub since_ver: u64,
    pub edges_modified: HashSet<u32>,
    pub full: bool,
}

/// Commit/rebuild bridge: stores a finalized, reduced point sequence back
/// into the owning diagram's edge data and flags it for redraw.
pub trait EdgeSink {
    fn commit_edge(&mut self, edge: u32, points: Vec<ControlPoint>);
}

/// Edge store driven synchronously from the host's pointer events. Owns
/// the per-gesture session cache; segment views are built fresh per
/// resolution call and never retained across events.
pub struct Diagram {
    pub(crate) edges: Vec<Option<EdgeLayout>>, // id is index
    pub(crate) config: LayoutConfig,
    pub(crate) sessions: SessionStore,
    pub(crate) ids: SeqIds,
    pub(crate) geom_ver: u64,
    pub(crate) dirty: DirtyState,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Diagram {
            edges: Vec::new(),
            config,
            sessions: SessionStore::default(),
            ids: SeqIds::default(),
            geom_ver: 1,
            dirty: DirtyState { since_ver: 1, ..Default::default() },
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    pub(crate) fn bump(&mut self) {
        self.geom_ver += 1;
    }

    pub fn dirty(&self) -> &DirtyState {
        &self.dirty
    }

    pub fn dirty_reset(&mut self) {
        self.dirty = DirtyState { since_ver: self.geom_ver, ..Default::default() };
    }

    pub(crate) fn mark_full_dirty(&mut self) {
        self.dirty.full = true;
    }

    // Edges

    pub fn add_edge(
        &mut self,
        source_side: AnchorSide,
        target_side: AnchorSide,
        coords: &[(f32, f32)],
    ) -> Result<u32, RouteError> {
        if coords.len() < 2 {
            return Err(RouteError::InvalidPath(coords.len()));
        }
        if coords
            .iter()
            .any(|&(x, y)| !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y))
        {
            return Err(RouteError::NonFinite);
        }
        let points = coords
            .iter()
            .map(|&(x, y)| ControlPoint { id: self.ids.next_id(), x, y })
            .collect();
        let id = self.edges.len() as u32;
        self.edges.push(Some(EdgeLayout { points, source_side, target_side }));
        self.dirty.edges_modified.insert(id);
        self.bump();
        Ok(id)
    }

    pub fn remove_edge(&mut self, edge: u32) -> bool {
        match self.edges.get_mut(edge as usize) {
            Some(slot) if slot.is_some() => {
                *slot = None;
            }
            _ => return false,
        }
        self.dirty.edges_modified.insert(edge);
        self.bump();
        true
    }

    pub fn edge(&self, edge: u32) -> Option<&EdgeLayout> {
        self.edges.get(edge as usize).and_then(|e| e.as_ref())
    }

    pub fn edge_points(&self, edge: u32) -> Option<&[ControlPoint]> {
        self.edge(edge).map(|e| e.points.as_slice())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    pub fn segment_count(&self, edge: u32) -> Option<usize> {
        self.edge(edge).map(|e| e.points.len() - 1)
    }

    /// Drag-handle affordance for the host: whether segment `seg_idx` of
    /// `edge` accepts a drag right now.
    pub fn can_drag(&self, edge: u32, seg_idx: usize) -> bool {
        self.with_segment(edge, seg_idx, |seg| seg.can_drag()).unwrap_or(false)
    }

    pub fn can_split(&self, edge: u32, seg_idx: usize) -> bool {
        self.with_segment(edge, seg_idx, |seg| seg.can_split()).unwrap_or(false)
    }

    fn with_segment<T>(
        &self,
        edge: u32,
        seg_idx: usize,
        f: impl FnOnce(&Segment<'_>) -> T,
    ) -> Option<T> {
        let layout = self.edge(edge)?;
        let ctx = EdgeContext::new(
            layout.points.clone(),
            &self.config,
            layout.source_side,
            layout.target_side,
        )
        .ok()?;
        Segment::new(&ctx, seg_idx).map(|seg| f(&seg))
    }

    // Drag resolution

    /// Entry point per pointer-move event. Returns `Ok(true)` when a
    /// sequence was committed, `Ok(false)` for unknown edges, out-of-range
    /// segment indices or non-finite input.
    pub fn on_dragging(
        &mut self,
        edge: u32,
        seg_idx: usize,
        ev: &DragEvent,
    ) -> Result<bool, RouteError> {
        let (points, source_side, target_side) = match self.edge(edge) {
            Some(l) => (l.points.clone(), l.source_side, l.target_side),
            None => return Ok(false),
        };
        let finite = [ev.to.start.x, ev.to.start.y, ev.to.end.x, ev.to.end.y]
            .iter()
            .all(|c| c.is_finite());
        if !finite {
            return Ok(false);
        }
        let ctx = EdgeContext::new(points, &self.config, source_side, target_side)?;
        let seg = match Segment::new(&ctx, seg_idx) {
            Some(seg) => seg,
            None => return Ok(false),
        };
        let next =
            resolve_drag_impl(&seg, ev, self.config.min_gap, &mut self.sessions, &mut self.ids);
        self.commit_edge(edge, next);
        Ok(true)
    }

    /// Last session record for a gesture, if any.
    pub fn session(&self, drag_id: &str) -> Option<&SessionState> {
        self.sessions.get(drag_id)
    }

    /// Pointer-up cleanup for hosts that want it; dragging never relies on
    /// this being called.
    pub fn end_drag(&mut self, drag_id: &str) {
        self.sessions.end(drag_id);
    }

    // JSON interchange with the host

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }

    pub fn from_json_value(&mut self, v: serde_json::Value) -> bool {
        json::from_json_impl(self, v)
    }
}

impl EdgeSink for Diagram {
    fn commit_edge(&mut self, edge: u32, points: Vec<ControlPoint>) {
        let reduced = reduce_points(&points);
        if let Some(Some(layout)) = self.edges.get_mut(edge as usize) {
            layout.points = reduced;
            self.dirty.edges_modified.insert(edge);
            self.geom_ver += 1;
            trace!(edge, ver = self.geom_ver, "edge committed");
        }
    }
}
