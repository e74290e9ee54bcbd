use super::*;
use crate::problem::{BonusKind, Figure, ProblemId};
use nalgebra::vector;
use std::f64::consts::FRAC_PI_2;
use tempfile::tempdir;

/// 10x10 square hole and a 2x1 "L" placed off to the right.
fn session() -> Session {
    let hole = vec![
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
    ];
    let figure = Figure {
        vertices: vec![vector![12.0, 2.0], vector![14.0, 2.0], vector![14.0, 3.0]],
        edges: vec![(0, 1), (1, 2)],
    };
    Session::new(Problem::new(hole, figure, 0, Vec::new()).unwrap())
}

#[test]
fn new_session_starts_at_source() {
    let s = session();
    assert_eq!(s.pose(), s.problem().figure().vertices.as_slice());
    assert!(s.held().is_empty());
    assert!(!s.evaluate().verdict);
}

#[test]
fn tick_steps_then_evaluates() {
    let mut s = session();
    let cfg = StepCfg {
        stuff: true,
        ..StepCfg::default()
    };
    let (report, ev) = s.tick(&cfg);
    assert_eq!(report.stuffed, 3);
    assert_eq!(ev, s.evaluate());
}

#[test]
fn relax_brings_figure_inside() {
    let mut s = session();
    s.translate(vector![-8.0, 3.0]);
    s.set_vertex(0, vector![3.0, 5.0]);
    let cfg = StepCfg {
        unstretch: true,
        stuff: true,
        ..StepCfg::default()
    };
    let (ticks, ev) = s.relax(&cfg, 2000);
    assert!(ticks < 2000, "relaxation should settle");
    assert!(ev.verdict, "{ev:?}");
}

#[test]
fn relax_stops_when_nothing_moves() {
    let mut s = session();
    let (ticks, _) = s.relax(&StepCfg::default(), 50);
    assert_eq!(ticks, 1);
}

#[test]
fn relax_stops_once_stuffing_settles() {
    let hole = vec![vector![0.0, 0.0], vector![10.0, 0.0], vector![3.0, 7.0]];
    let figure = Figure {
        vertices: vec![vector![-9.7, 8.1], vector![4.0, 2.0]],
        edges: vec![(0, 1)],
    };
    let mut s = Session::new(Problem::new(hole, figure, 0, Vec::new()).unwrap());
    let cfg = StepCfg {
        stuff: true,
        ..StepCfg::default()
    };
    let (ticks, _) = s.relax(&cfg, 2000);
    assert!(ticks < 2000, "relax ran the whole budget");
    assert_eq!(s.tick(&cfg).0.stuffed, 0);
}

#[test]
fn rigid_edits_keep_edge_lengths() {
    let mut s = session();
    s.translate(vector![-10.0, 2.0]);
    assert_eq!(s.pose()[0], vector![2.0, 4.0]);
    s.rotate_about_pivot(s.pose()[0], FRAC_PI_2);
    assert!((s.pose()[1] - vector![2.0, 6.0]).norm() < 1e-12);
    s.snap_to_integer();
    assert_eq!(s.pose()[1], vector![2.0, 6.0]);
    assert_eq!(s.pose()[2], vector![1.0, 6.0]);
    let ev = s.evaluate();
    assert_eq!(ev.overstretched, 0);
    assert!(ev.verdict);
}

#[test]
fn rotate_about_nearest_uses_closest_vertex() {
    let mut s = session();
    assert_eq!(s.rotate_about_nearest(vector![14.2, 2.9], FRAC_PI_2), Some(2));
    assert_eq!(s.pose()[2], vector![14.0, 3.0]);
}

#[test]
fn mirror_reflects_about_hole_center() {
    let mut s = session();
    s.mirror();
    assert_eq!(s.pose()[0], vector![-2.0, 2.0]);
    assert_eq!(s.pose()[1], vector![-4.0, 2.0]);
    s.mirror();
    assert_eq!(s.pose(), s.problem().figure().vertices.as_slice());
}

#[test]
fn spread_centers_on_hole() {
    let mut s = session();
    s.spread(2.0);
    // Figure bbox center (13, 2.5) lands on (5, 5); offsets double.
    assert_eq!(s.pose()[0], vector![3.0, 4.0]);
    assert_eq!(s.pose()[2], vector![7.0, 6.0]);
}

#[test]
fn set_vertex_ignores_bad_index_and_reset_restores() {
    let mut s = session();
    assert!(s.set_vertex(1, vector![1.0, 1.0]));
    assert!(!s.set_vertex(9, vector![1.0, 1.0]));
    assert_eq!(s.pose()[1], vector![1.0, 1.0]);
    s.reset();
    assert_eq!(s.pose(), s.problem().figure().vertices.as_slice());
}

#[test]
fn held_bonuses_change_verdict() {
    let mut s = session();
    s.translate(vector![-10.0, 2.0]);
    s.set_vertex(2, vector![4.0, 6.0]);
    assert!(!s.evaluate().verdict);
    s.hold(HeldBonus {
        kind: BonusKind::Superflex,
        problem: ProblemId::Number(3),
    });
    assert!(s.evaluate().verdict);
    s.set_held(HeldBonuses::none());
    assert!(!s.evaluate().verdict);
}

#[test]
fn save_and_reopen() {
    let dir = tempdir().unwrap();
    let problem_path = dir.path().join("1.problem");
    let solution_path = dir.path().join("1.json");
    let mut s = session();
    std::fs::write(
        &problem_path,
        r#"{"hole": [[0, 0], [10, 0], [10, 10], [0, 10]], "epsilon": 0,
            "figure": {"vertices": [[12, 2], [14, 2], [14, 3]], "edges": [[0, 1], [1, 2]]}}"#,
    )
    .unwrap();
    s.translate(vector![-10.0, 2.0]);
    s.hold(HeldBonus {
        kind: BonusKind::Globalist,
        problem: ProblemId::Number(5),
    });
    s.save(&solution_path).unwrap();

    let reopened = Session::open(&problem_path, Some(&solution_path)).unwrap();
    assert_eq!(reopened.pose(), s.pose());
    assert_eq!(reopened.held(), s.held());

    let fresh = Session::open(&problem_path, Some(&dir.path().join("none.json"))).unwrap();
    assert_eq!(fresh.pose(), s.problem().figure().vertices.as_slice());
}
