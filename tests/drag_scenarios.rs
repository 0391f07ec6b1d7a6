use orthoroute::algorithms::merge::merge_points;
use orthoroute::algorithms::split::split_points;
use orthoroute::algorithms::validity::is_valid_points;
use orthoroute::context::EdgeContext;
use orthoroute::error::RouteError;
use orthoroute::geometry::math::reduce_points;
use orthoroute::model::{
    AnchorSide, ControlPoint, DragEvent, Line, LayoutConfig, PointId, SeqIds,
};
use orthoroute::segment::Segment;
use orthoroute::session::SessionStore;
use orthoroute::Diagram;

fn cfg() -> LayoutConfig {
    LayoutConfig { offset: 20.0, handler_width: 20.0, min_gap: 10.0 }
}

fn pt(id: u64, x: f32, y: f32) -> ControlPoint {
    ControlPoint { id: PointId(id), x, y }
}

fn seg_line(d: &Diagram, edge: u32, idx: usize) -> Line {
    let p = d.edge_points(edge).unwrap();
    Line { start: p[idx], end: p[idx + 1] }
}

fn shifted(l: Line, dx: f32, dy: f32) -> Line {
    let mut l = l;
    l.start.x += dx;
    l.start.y += dy;
    l.end.x += dx;
    l.end.y += dy;
    l
}

fn ev(drag_id: &str, from: Line, to: Line) -> DragEvent {
    DragEvent { drag_id: drag_id.into(), drag_from: None, from, to }
}

fn coords(d: &Diagram, edge: u32) -> Vec<(f32, f32)> {
    d.edge_points(edge).unwrap().iter().map(|p| (p.x, p.y)).collect()
}

#[test]
fn scenario_a_sub_threshold_drag_keeps_straight_edge() {
    let mut d = Diagram::with_config(cfg());
    let e = d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, 0.0), (200.0, 0.0)]).unwrap();
    let from = seg_line(&d, e, 0);
    let committed = d.on_dragging(e, 0, &ev("g1", from, shifted(from, 0.0, 5.0))).unwrap();
    assert!(committed);
    assert_eq!(coords(&d, e), vec![(0.0, 0.0), (200.0, 0.0)]);
    // the candidate is cached so the gesture keeps composing
    let s = d.session("g1").unwrap();
    assert!(s.target.is_some());
}

#[test]
fn scenario_b_source_split_inserts_centered_detour() {
    let mut d = Diagram::with_config(cfg());
    let e = d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, 0.0), (80.0, 0.0)]).unwrap();
    let from = seg_line(&d, e, 0);
    d.on_dragging(e, 0, &ev("g1", from, shifted(from, 0.0, 15.0))).unwrap();
    let got = coords(&d, e);
    assert_eq!(
        got,
        vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 15.0),
            (70.0, 15.0),
            (70.0, 0.0),
            (80.0, 0.0),
        ]
    );
    // stub separation equals handler_width + 2 * offset
    assert_eq!(got[3].0 - got[2].0, 60.0);
    // anchors never move
    assert_eq!(got[0], (0.0, 0.0));
    assert_eq!(got[5], (80.0, 0.0));
}

#[test]
fn scenario_c_three_way_merge_collapses_to_straight_run() {
    let mut d = Diagram::with_config(cfg());
    let e = d
        .add_edge(
            AnchorSide::Right,
            AnchorSide::Left,
            &[(0.0, 0.0), (50.0, 0.0), (50.0, 40.0), (100.0, 40.0), (100.0, 0.0), (150.0, 0.0)],
        )
        .unwrap();
    let from = seg_line(&d, e, 2);
    d.on_dragging(e, 2, &ev("g1", from, shifted(from, 0.0, -39.5))).unwrap();
    assert_eq!(coords(&d, e), vec![(0.0, 0.0), (150.0, 0.0)]);
}

#[test]
fn scenario_d_invalid_merge_falls_back_to_reposition() {
    // The middle run ends left of the source clearance witness; merging it
    // down to the source row would clip the witness out of the first
    // segment, so the merge must be discarded in favor of a plain slide.
    let mut d = Diagram::with_config(cfg());
    let e = d
        .add_edge(
            AnchorSide::Right,
            AnchorSide::Left,
            &[(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (15.0, 30.0), (15.0, 60.0), (100.0, 60.0)],
        )
        .unwrap();
    let from = seg_line(&d, e, 2);
    d.on_dragging(e, 2, &ev("g1", from, shifted(from, 0.0, -25.0))).unwrap();
    let got = coords(&d, e);
    assert_eq!(got.len(), 6);
    assert_eq!(got[2], (30.0, 5.0));
    assert_eq!(got[3], (15.0, 5.0));
    assert_eq!(got[0], (0.0, 0.0));
    assert_eq!(got[5], (100.0, 60.0));
}

#[test]
fn no_move_event_commits_unchanged_path() {
    let mut d = Diagram::with_config(cfg());
    let e = d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, 0.0), (200.0, 0.0)]).unwrap();
    let before = coords(&d, e);
    let ver = d.geom_version();
    let from = seg_line(&d, e, 0);
    let committed = d.on_dragging(e, 0, &ev("g1", from, from)).unwrap();
    assert!(committed);
    assert_eq!(coords(&d, e), before);
    // still a commit: the host gets its redraw
    assert!(d.geom_version() > ver);
    assert!(d.dirty().edges_modified.contains(&e));
}

#[test]
fn split_is_idempotent_without_intervening_commit() {
    let config = cfg();
    let points = vec![pt(1, 0.0, 0.0), pt(2, 80.0, 0.0)];
    let ctx = EdgeContext::new(points, &config, AnchorSide::Right, AnchorSide::Left).unwrap();
    let seg = Segment::new(&ctx, 0).unwrap();
    let from = Line { start: ctx.points[0], end: ctx.points[1] };
    let to = shifted(from, 0.0, 15.0);
    let mut sessions = SessionStore::default();
    let mut ids = SeqIds::default();

    let first = split_points(&seg, &ev("g1", from, to), 10.0, &mut sessions, &mut ids).unwrap();
    let second = split_points(&seg, &ev("g1", from, to), 10.0, &mut sessions, &mut ids).unwrap();
    let xy = |v: &[ControlPoint]| v.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>();
    assert_eq!(xy(&first), xy(&second));
    assert_eq!(first.len(), 6);
}

#[test]
fn split_below_min_gap_returns_points_unchanged() {
    let config = cfg();
    let points = vec![pt(1, 0.0, 0.0), pt(2, 80.0, 0.0)];
    let ctx =
        EdgeContext::new(points.clone(), &config, AnchorSide::Right, AnchorSide::Left).unwrap();
    let seg = Segment::new(&ctx, 0).unwrap();
    let from = Line { start: ctx.points[0], end: ctx.points[1] };
    let mut sessions = SessionStore::default();
    let mut ids = SeqIds::default();

    let out = split_points(&seg, &ev("g1", from, shifted(from, 0.0, 8.0)), 10.0, &mut sessions, &mut ids)
        .unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].id, points[0].id);
    assert_eq!(out[1].id, points[1].id);
    let s = sessions.get("g1").unwrap();
    let (ts, _te) = s.target.unwrap();
    assert_eq!(ts.y, 8.0);
}

#[test]
fn merge_requires_monotonic_approach() {
    let config = cfg();
    let points = vec![
        pt(1, 0.0, 0.0),
        pt(2, 50.0, 0.0),
        pt(3, 50.0, 40.0),
        pt(4, 100.0, 40.0),
        pt(5, 100.0, 0.0),
        pt(6, 150.0, 0.0),
    ];
    let ctx = EdgeContext::new(points, &config, AnchorSide::Right, AnchorSide::Left).unwrap();
    let seg = Segment::new(&ctx, 2).unwrap();
    let from = Line { start: ctx.points[2], end: ctx.points[3] };
    let mut sessions = SessionStore::default();
    let mut ids = SeqIds::default();

    // moving away from the y=0 neighbors
    let away = shifted(from, 0.0, 5.0);
    assert!(merge_points(&seg, &ev("g1", from, away), 10.0, &mut sessions, &mut ids).is_none());
    // approaching but still outside the snap threshold
    let outside = shifted(from, 0.0, -25.0);
    assert!(merge_points(&seg, &ev("g1", from, outside), 10.0, &mut sessions, &mut ids).is_none());
    // approaching and inside the threshold
    let inside = shifted(from, 0.0, -35.0);
    assert!(merge_points(&seg, &ev("g1", from, inside), 10.0, &mut sessions, &mut ids).is_some());
}

#[test]
fn short_paths_are_always_valid() {
    let config = cfg();
    let points = vec![pt(1, 0.0, 0.0), pt(2, 50.0, 0.0), pt(3, 50.0, 50.0)];
    let ctx =
        EdgeContext::new(points.clone(), &config, AnchorSide::Right, AnchorSide::Top).unwrap();
    assert!(is_valid_points(&ctx, &points));
    assert!(is_valid_points(&ctx, &points[..2]));
}

#[test]
fn clipping_the_source_witness_is_rejected() {
    let config = cfg();
    let points = vec![
        pt(1, 0.0, 0.0),
        pt(2, 50.0, 0.0),
        pt(3, 50.0, 50.0),
        pt(4, 150.0, 50.0),
    ];
    let ctx = EdgeContext::new(points, &config, AnchorSide::Right, AnchorSide::Left).unwrap();
    // witness sits at (20, 0); a first segment stopping short of it fails
    let clipped = vec![
        pt(5, 0.0, 0.0),
        pt(6, 10.0, 0.0),
        pt(7, 10.0, 50.0),
        pt(8, 150.0, 50.0),
    ];
    assert!(!is_valid_points(&ctx, &clipped));
    // and a folded end pair fails even when both witnesses are covered
    let folded = vec![
        pt(9, 0.0, 0.0),
        pt(10, 50.0, 0.0),
        pt(11, 170.0, 50.0),
        pt(12, 120.0, 50.0),
        pt(13, 150.0, 50.0),
    ];
    assert!(!is_valid_points(&ctx, &folded));
}

#[test]
fn reduce_collapses_duplicates_and_collinear_runs() {
    let points = vec![
        pt(1, 0.0, 0.0),
        pt(2, 50.0, 0.0),
        pt(3, 50.0, 0.0),
        pt(4, 100.0, 0.0),
        pt(5, 100.0, 40.0),
        pt(6, 100.0, 80.0),
        pt(7, 150.0, 80.0),
    ];
    let reduced = reduce_points(&points);
    let xy: Vec<_> = reduced.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(xy, vec![(0.0, 0.0), (100.0, 0.0), (100.0, 80.0), (150.0, 80.0)]);
    let again = reduce_points(&reduced);
    assert_eq!(again.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(), xy);
}

#[test]
fn can_drag_requires_splittable_anchor_runs() {
    let mut d = Diagram::with_config(cfg());
    // min_handler_width = 60, split needs 60 + 2*20 = 100
    let short = d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, 0.0), (80.0, 0.0)]).unwrap();
    assert!(!d.can_drag(short, 0));
    assert!(!d.can_split(short, 0));
    let long = d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, 0.0), (200.0, 0.0)]).unwrap();
    assert!(d.can_drag(long, 0));
    assert!(d.can_split(long, 0));
}

#[test]
fn context_rejects_degenerate_paths() {
    let config = cfg();
    assert!(matches!(
        EdgeContext::new(vec![], &config, AnchorSide::Right, AnchorSide::Left),
        Err(RouteError::InvalidPath(0))
    ));
    assert!(matches!(
        EdgeContext::new(vec![pt(1, 0.0, 0.0)], &config, AnchorSide::Right, AnchorSide::Left),
        Err(RouteError::InvalidPath(1))
    ));
    let mut d = Diagram::with_config(config);
    assert!(d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, 0.0)]).is_err());
}

#[test]
fn non_finite_input_is_refused() {
    let mut d = Diagram::with_config(cfg());
    assert!(matches!(
        d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, f32::NAN), (10.0, 0.0)]),
        Err(RouteError::NonFinite)
    ));
    let e = d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, 0.0), (200.0, 0.0)]).unwrap();
    let from = seg_line(&d, e, 0);
    let mut to = shifted(from, 0.0, 15.0);
    to.start.y = f32::INFINITY;
    let committed = d.on_dragging(e, 0, &ev("g1", from, to)).unwrap();
    assert!(!committed);
    assert_eq!(coords(&d, e), vec![(0.0, 0.0), (200.0, 0.0)]);
}

#[test]
fn unknown_edge_or_segment_is_a_noop() {
    let mut d = Diagram::with_config(cfg());
    let e = d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, 0.0), (200.0, 0.0)]).unwrap();
    let from = seg_line(&d, e, 0);
    assert!(!d.on_dragging(99, 0, &ev("g1", from, shifted(from, 0.0, 15.0))).unwrap());
    assert!(!d.on_dragging(e, 5, &ev("g1", from, shifted(from, 0.0, 15.0))).unwrap());
}

#[test]
fn end_drag_clears_the_session_slot() {
    let mut d = Diagram::with_config(cfg());
    let e = d.add_edge(AnchorSide::Right, AnchorSide::Left, &[(0.0, 0.0), (200.0, 0.0)]).unwrap();
    let from = seg_line(&d, e, 0);
    d.on_dragging(e, 0, &ev("g1", from, shifted(from, 0.0, 5.0))).unwrap();
    assert!(d.session("g1").is_some());
    d.end_drag("g1");
    assert!(d.session("g1").is_none());
}

#[test]
fn json_ingest_skips_malformed_edges() {
    let mut d = Diagram::with_config(cfg());
    let doc = serde_json::json!({
        "version": 1,
        "edges": [
            { "source_side": "right", "target_side": "left",
              "points": [ {"x": 0.0, "y": 0.0}, {"x": 100.0, "y": 0.0} ] },
            { "source_side": "right", "target_side": "left",
              "points": [ {"x": 0.0, "y": 0.0} ] },
            { "source_side": "top", "target_side": "bottom",
              "points": [ {"x": 0.0, "y": 0.0}, {"x": 1.0e12, "y": 0.0} ] }
        ]
    });
    assert!(d.from_json_value(doc));
    assert_eq!(d.edge_count(), 1);
    assert_eq!(coords(&d, 0), vec![(0.0, 0.0), (100.0, 0.0)]);

    let out = d.to_json_value();
    let mut d2 = Diagram::with_config(cfg());
    assert!(d2.from_json_value(out));
    assert_eq!(d2.edge_count(), 1);
    assert_eq!(coords(&d2, 0), vec![(0.0, 0.0), (100.0, 0.0)]);
}
