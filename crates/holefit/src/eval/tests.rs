use super::*;
use crate::problem::{Bonus, Figure, HeldBonus, ProblemId};
use nalgebra::vector;

fn square_hole(side: f64) -> Vec<Point> {
    vec![
        vector![0.0, 0.0],
        vector![side, 0.0],
        vector![side, side],
        vector![0.0, side],
    ]
}

fn held(kinds: &[BonusKind]) -> HeldBonuses {
    kinds
        .iter()
        .map(|&kind| HeldBonus {
            kind,
            problem: ProblemId::Number(1),
        })
        .collect()
}

/// Path of three edges, each of squared length 4, along the bottom of a 10x10 hole.
fn path_problem(epsilon: u64) -> Problem {
    let figure = Figure {
        vertices: vec![
            vector![1.0, 1.0],
            vector![3.0, 1.0],
            vector![5.0, 1.0],
            vector![7.0, 1.0],
        ],
        edges: vec![(0, 1), (1, 2), (2, 3)],
    };
    Problem::new(square_hole(10.0), figure, epsilon, Vec::new()).unwrap()
}

#[test]
fn epsilon_zero_boundary() {
    assert!(within_epsilon(4.0, 4.0, 0));
    assert!(!within_epsilon(4.0, 5.0, 0));
    assert!((stretch_ppm(4.0, 5.0) - 250_000.0).abs() < 1e-6);
    assert!(within_epsilon(4.0, 5.0, 250_000));
    assert!(within_epsilon(4.0, 3.0, 250_000));
    assert!(!within_epsilon(4.0, 3.0, 249_999));
}

#[test]
fn source_pose_is_stretch_valid() {
    let p = path_problem(0);
    let pose = p.figure().vertices.clone();
    let ev = evaluate(&p, &pose, &HeldBonuses::none());
    assert!(ev.edges.iter().all(|e| e.stretch_ok && e.in_hole));
    assert!(ev.verdict);
    assert_eq!(ev.overstretched, 0);
    // Nearest pose vertex to each hole corner.
    let expected = 2.0 + 10.0 + 90.0 + 82.0;
    assert_eq!(ev.dislikes, expected);
    assert_eq!(ev.signed_dislikes(), expected);
}

#[test]
fn evaluate_is_idempotent() {
    let p = path_problem(1000);
    let mut pose = p.figure().vertices.clone();
    pose[3] = vector![12.0, 1.0];
    let a = evaluate(&p, &pose, &HeldBonuses::none());
    let b = evaluate(&p, &pose, &HeldBonuses::none());
    assert_eq!(a, b);
    assert!(!a.verdict);
    assert!(a.signed_dislikes() < 0.0);
}

#[test]
fn superflex_tolerates_one_overstretched_edge() {
    let p = path_problem(0);
    let mut pose = p.figure().vertices.clone();
    // Stretch the last edge only: squared length 9 instead of 4.
    pose[3] = vector![8.0, 1.0];
    let plain = evaluate(&p, &pose, &HeldBonuses::none());
    assert_eq!(plain.overstretched, 1);
    assert_eq!(plain.out_of_hole, 0);
    assert!(!plain.verdict);

    let flex = evaluate(&p, &pose, &held(&[BonusKind::Superflex]));
    assert!(flex.verdict);
    assert!(!flex.edges[2].stretch_ok);

    // Two stretched edges are too many.
    pose[0] = vector![0.0, 1.0];
    let flex2 = evaluate(&p, &pose, &held(&[BonusKind::Superflex]));
    assert_eq!(flex2.overstretched, 2);
    assert!(!flex2.verdict);
}

#[test]
fn globalist_shares_one_budget() {
    // epsilon 100000 over 3 edges: budget 300000 ppm in total.
    let p = path_problem(100_000);
    let mut pose = p.figure().vertices.clone();
    // Edge 2 squared length 4.84 → 210000 ppm; the others untouched.
    pose[3] = vector![7.2, 1.0];
    let plain = evaluate(&p, &pose, &HeldBonuses::none());
    assert!(!plain.verdict);
    assert!(!plain.edges[2].stretch_ok);

    let g = evaluate(&p, &pose, &held(&[BonusKind::Globalist]));
    assert!(g.verdict);
    assert!(g.edges.iter().all(|e| e.stretch_ok));
    assert_eq!(g.overstretched, 1);
    let total = g.global_deviation.unwrap();
    assert!((total - 210_000.0).abs() < 1e-3);

    // Over budget: every edge reports the shared failure.
    pose[3] = vector![8.0, 1.0];
    let g2 = evaluate(&p, &pose, &held(&[BonusKind::Globalist]));
    assert!(!g2.verdict);
    assert!(g2.edges.iter().all(|e| !e.stretch_ok));
}

#[test]
fn globalist_takes_precedence_over_superflex() {
    let p = path_problem(0);
    let mut pose = p.figure().vertices.clone();
    pose[3] = vector![8.0, 1.0];
    let both = evaluate(
        &p,
        &pose,
        &held(&[BonusKind::Globalist, BonusKind::Superflex]),
    );
    assert!(!both.verdict);
}

#[test]
fn wallhack_exempts_a_single_stray_vertex() {
    let figure = Figure {
        vertices: vec![vector![1.0, 1.0], vector![3.0, 1.0], vector![3.0, 3.0]],
        edges: vec![(0, 1), (1, 2)],
    };
    let p = Problem::new(square_hole(4.0), figure, 10_000_000, Vec::new()).unwrap();
    let mut pose = p.figure().vertices.clone();
    pose[2] = vector![3.0, 6.0];

    let plain = evaluate(&p, &pose, &HeldBonuses::none());
    assert_eq!(plain.out_of_hole, 1);
    assert!(!plain.verdict);

    let wh = evaluate(&p, &pose, &held(&[BonusKind::Wallhack]));
    assert_eq!(wh.wallhack_vertex, Some(2));
    assert_eq!(wh.out_of_hole, 0);
    assert!(wh.edges[1].in_hole);
    assert!(wh.verdict);

    // Two stray vertices: no exemption at all.
    pose[0] = vector![-2.0, 1.0];
    let wh2 = evaluate(&p, &pose, &held(&[BonusKind::Wallhack]));
    assert_eq!(wh2.wallhack_vertex, None);
    assert_eq!(wh2.out_of_hole, 2);
}

#[test]
fn collected_bonuses_need_exact_position() {
    let figure = Figure {
        vertices: vec![vector![1.0, 1.0], vector![3.0, 1.0]],
        edges: vec![(0, 1)],
    };
    let bonuses = vec![
        Bonus {
            kind: BonusKind::Globalist,
            position: vector![3.0, 1.0],
            problem: ProblemId::Number(9),
        },
        Bonus {
            kind: BonusKind::BreakALeg,
            position: vector![2.0, 2.0],
            problem: ProblemId::Number(10),
        },
    ];
    let p = Problem::new(square_hole(4.0), figure, 0, bonuses).unwrap();
    let mut pose = p.figure().vertices.clone();
    let ev = evaluate(&p, &pose, &HeldBonuses::none());
    assert_eq!(ev.collected, vec![0]);

    pose[1] = vector![3.0, 1.0 + 1e-9];
    let ev = evaluate(&p, &pose, &HeldBonuses::none());
    assert!(ev.collected.is_empty());
}

#[test]
fn dislikes_of_coincident_points_is_zero() {
    let hole = square_hole(4.0);
    assert_eq!(dislikes(&hole, &hole), 0.0);
    assert_eq!(dislikes(&hole, &[vector![2.0, 2.0]]), 32.0);
}
