use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::limits;
use crate::model::{AnchorSide, ControlPoint, EdgeLayout, IdSource};
use crate::Diagram;

pub fn to_json_impl(d: &Diagram) -> Value {
    #[derive(Serialize)]
    struct PointSer {
        x: f32,
        y: f32,
    }
    #[derive(Serialize)]
    struct EdgeSer {
        id: u32,
        source_side: AnchorSide,
        target_side: AnchorSide,
        points: Vec<PointSer>,
    }
    let mut edges = Vec::new();
    for (i, e) in d.edges.iter().enumerate() {
        if let Some(e) = e {
            edges.push(EdgeSer {
                id: i as u32,
                source_side: e.source_side,
                target_side: e.target_side,
                points: e.points.iter().map(|p| PointSer { x: p.x, y: p.y }).collect(),
            });
        }
    }
    serde_json::json!({
        "version": 1,
        "edges": edges,
    })
}

/// Appends edges from an untrusted document. Malformed records (too few
/// points, out-of-bounds coordinates) are skipped rather than failing the
/// whole import; returns false only when the document shape is unusable.
pub fn from_json_impl(d: &mut Diagram, v: Value) -> bool {
    #[derive(Deserialize)]
    struct PointDe {
        x: f32,
        y: f32,
    }
    #[derive(Deserialize)]
    struct EdgeDe {
        source_side: AnchorSide,
        target_side: AnchorSide,
        points: Vec<PointDe>,
    }
    #[derive(Deserialize)]
    struct DocDe {
        edges: Vec<EdgeDe>,
    }
    let doc: DocDe = match serde_json::from_value(v) {
        Ok(doc) => doc,
        Err(_) => return false,
    };
    if doc.edges.len() > limits::MAX_EDGES {
        return false;
    }
    for e in doc.edges {
        if e.points.len() < 2 || e.points.len() > limits::MAX_POINTS_PER_EDGE {
            continue;
        }
        if e.points
            .iter()
            .any(|p| !limits::in_coord_bounds(p.x) || !limits::in_coord_bounds(p.y))
        {
            continue;
        }
        let points = e
            .points
            .iter()
            .map(|p| ControlPoint { id: d.ids.next_id(), x: p.x, y: p.y })
            .collect();
        d.edges.push(Some(EdgeLayout {
            points,
            source_side: e.source_side,
            target_side: e.target_side,
        }));
    }
    d.mark_full_dirty();
    d.bump();
    true
}
