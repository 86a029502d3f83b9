use std::collections::HashSet;

use nalgebra::Vector3;

use super::*;
use crate::cfg::{NO_RELATION_GRAM, SIGNATURE_EPS};
use crate::coxeter::Order;
use crate::registry::EdgeToken;
use crate::simplex::SimplexCfg;

fn config(diagram: &str) -> Config {
    Config::for_diagram(&diagram.parse::<CoxeterDiagram>().unwrap())
}

fn run(cfg: &Config) -> (GenerationContext, RunStats) {
    let mut ctx = GenerationContext::new();
    let stats = ctx.generate(cfg).unwrap();
    assert_clean(&ctx);
    (ctx, stats)
}

/// Unique vertex tokens, unique edge tokens, no self-loops.
fn assert_clean(ctx: &GenerationContext) {
    let tokens: HashSet<_> = ctx.vertices().iter().map(|v| v.token.clone()).collect();
    assert_eq!(tokens.len(), ctx.vertices().len());
    let mut edges = HashSet::new();
    for e in ctx.edges().iter() {
        assert_ne!(e.a, e.b);
        let t = EdgeToken::new(&ctx.vertices().get(e.a).token, &ctx.vertices().get(e.b).token);
        assert_eq!(t, e.token);
        assert!(edges.insert(t));
    }
}

fn lattice(p: &Vector3<f64>) -> (i64, i64) {
    let (x, y) = (p.x.round(), p.y.round());
    assert!((p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9, "{p:?} off the lattice");
    (x as i64, y as i64)
}

#[test]
fn finite_groups_close_up() {
    for (diagram, vertices, edges, chambers) in [
        ("3,3", 14, 24, 24),
        ("3,4", 26, 48, 48),
        ("3,3,3", 30, 80, 120),
    ] {
        let (ctx, stats) = run(&config(diagram));
        assert_eq!(stats.kind, GeometryKind::Spherical);
        assert_eq!((stats.vertices, stats.edges), (vertices, edges), "{diagram}");
        assert_eq!(stats.chambers, chambers, "{diagram}");
        assert_eq!(ctx.vertices().len(), vertices);
        assert!(!stats.bound_hit);
        assert!(stats.skipped_classes.is_empty());
        for v in ctx.vertices().iter() {
            assert!((v.ambient.norm() - 1.0).abs() < 1e-9);
            assert!(v.position.norm() <= 1.0 + 1e-9);
        }
    }
}

#[test]
fn square_grid_patch_within_radius_two() {
    let (ctx, stats) = run(&config("4,4").with_max_radius(2.0));
    assert_eq!(stats.kind, GeometryKind::Euclidean);
    assert_eq!((stats.vertices, stats.edges, stats.chambers), (33, 36, 24));
    assert!(stats.bound_hit);

    let points: HashSet<(i64, i64)> = ctx.vertices().iter().map(|v| lattice(&v.position)).collect();
    assert_eq!(points.len(), 33);
    assert!(points.contains(&(0, 0)));
    for p in [(1, 1), (1, -1), (-1, 1), (-1, -1), (1, 0), (-1, 0), (0, 1), (0, -1)] {
        assert!(points.contains(&p), "missing {p:?}");
    }
    for &(x, y) in &points {
        assert!(points.contains(&(-x, y)) && points.contains(&(y, x)));
    }
    // Orbit classes sit on distinct sublattices.
    for v in ctx.vertices().iter() {
        let (x, y) = lattice(&v.position);
        let parity = match (x.rem_euclid(2), y.rem_euclid(2)) {
            (1, 1) => 0,
            (0, 0) => 2,
            _ => 1,
        };
        assert_eq!(parity, v.class);
    }
}

#[test]
fn euclidean_edges_have_one_length_per_mirror() {
    let (ctx, _) = run(&config("4,4").with_max_radius(2.0));
    let mut lengths = [None; 3];
    for e in ctx.edges().iter() {
        let len = (ctx.vertices().get(e.a).position - ctx.vertices().get(e.b).position).norm();
        let expected = *lengths[e.mirror].get_or_insert(len);
        assert!((len - expected).abs() < 1e-9);
        assert_eq!(ctx.vertices().get(e.a).class, e.mirror);
        assert_eq!(ctx.vertices().get(e.b).class, e.mirror);
    }
    assert!((lengths[0].unwrap() - 2.0).abs() < 1e-9);
    assert!((lengths[1].unwrap() - 2f64.sqrt()).abs() < 1e-9);
    assert!((lengths[2].unwrap() - 2.0).abs() < 1e-9);
}

#[test]
fn depth_bound_on_the_square_grid() {
    let (_, stats) = run(&config("4,4").with_max_depth(0));
    assert_eq!((stats.vertices, stats.edges, stats.chambers), (6, 3, 1));
    assert_eq!(stats.max_depth_reached, 0);
    let (_, stats) = run(&config("4,4").with_max_depth(1));
    assert_eq!((stats.vertices, stats.edges, stats.chambers), (10, 7, 4));
    assert_eq!(stats.max_depth_reached, 1);
}

#[test]
fn affine_line_grows_linearly() {
    let inf = Order::Infinite;
    let one = Order::Finite(1);
    for depth in 0..6 {
        let cfg = Config::new(vec![vec![one, inf], vec![inf, one]]).with_max_depth(depth);
        let (ctx, stats) = run(&cfg);
        assert_eq!(stats.vertices, 2 * depth + 4);
        assert_eq!(stats.edges, 2 * depth + 2);
        assert!(stats.bound_hit);
        for v in ctx.vertices().iter() {
            assert_eq!(v.position.y, 0.0);
        }
    }
}

#[test]
fn affine_line_keeps_growing_far_from_the_origin() {
    let inf = Order::Infinite;
    let one = Order::Finite(1);
    let depth = 2500;
    let cfg = Config::new(vec![vec![one, inf], vec![inf, one]]).with_max_depth(depth);
    let (ctx, stats) = run(&cfg);
    assert_eq!(stats.vertices, 2 * depth + 4);
    assert_eq!(stats.edges, 2 * depth + 2);
    assert_eq!(stats.max_depth_reached, depth);
    let far = ctx
        .vertices()
        .iter()
        .map(|v| v.position.x.abs())
        .fold(0.0, f64::max);
    assert!(far > depth as f64, "expansion stalled at |x| = {far}");
}

#[test]
fn hyperbolic_with_parallel_mirrors_stays_in_the_ball() {
    let cfg = config("inf,3,3").with_max_depth(3);
    let (ctx, stats) = run(&cfg);
    assert_eq!(stats.kind, GeometryKind::Hyperbolic);
    assert_eq!(stats.skipped_classes, vec![2, 3]);
    assert_eq!(stats.max_depth_reached, 3);
    assert!(stats.bound_hit);
    assert!(!ctx.vertices().is_empty());
    for v in ctx.vertices().iter() {
        assert!(v.class < 2);
        assert!(v.position.norm() < 1.0, "{:?} escaped the ball", v.position);
    }
}

#[test]
fn ultraparallel_sentinel_is_configurable() {
    let mut cfg = config("inf,3").with_max_depth(3);
    cfg.no_relation_gram = -1.5;
    let (ctx, stats) = run(&cfg);
    assert_eq!(stats.kind, GeometryKind::Hyperbolic);
    assert_eq!(stats.skipped_classes, vec![2]);
    assert!(ctx.vertices().iter().all(|v| v.position.norm() < 1.0));
}

#[test]
fn hyperbolic_edges_have_one_length_per_mirror() {
    let (ctx, stats) = run(&config("7,3").with_max_depth(4));
    assert!(stats.skipped_classes.is_empty());
    let kind = GeometryKind::Hyperbolic;
    let mut lengths = [None; 3];
    for e in ctx.edges().iter() {
        let (a, b) = (&ctx.vertices().get(e.a).ambient, &ctx.vertices().get(e.b).ambient);
        let d = (-kind.inner(a, b)).max(1.0).acosh();
        let expected = *lengths[e.mirror].get_or_insert(d);
        assert!((d - expected).abs() < 1e-6 * expected.max(1.0));
    }
    for v in ctx.vertices().iter() {
        assert!((kind.inner(&v.ambient, &v.ambient) + 1.0).abs() < 1e-6);
        assert!(v.position.norm() < 1.0);
    }
}

#[test]
fn malformed_diagram_registers_nothing() {
    let rows = vec![
        vec![Order::Finite(1), Order::Finite(3), Order::Finite(2)],
        vec![Order::Finite(4), Order::Finite(1), Order::Finite(3)],
        vec![Order::Finite(2), Order::Finite(3), Order::Finite(1)],
    ];
    let mut ctx = GenerationContext::new();
    let err = ctx.generate(&Config::new(rows.clone()).with_max_depth(2)).unwrap_err();
    assert!(matches!(err, Error::InvalidDiagram { .. }));
    assert!(ctx.vertices().is_empty());
    assert!(ctx.edges().is_empty());

    // A failing run after a successful one leaves the earlier output alone.
    let stats = ctx.generate(&config("3,3")).unwrap();
    assert!(ctx.generate(&Config::new(rows)).is_err());
    assert_eq!(ctx.vertices().len(), stats.vertices);
    assert_eq!(ctx.edges().len(), stats.edges);
}

#[test]
fn degenerate_diagram_is_reported() {
    let cfg = config("1 inf 2 2; inf 1 2 2; 2 2 1 inf; 2 2 inf 1").with_max_depth(2);
    let mut ctx = GenerationContext::new();
    assert!(matches!(ctx.generate(&cfg), Err(Error::DegenerateDiagram { .. })));
    assert!(ctx.vertices().is_empty());
}

#[test]
fn double_reflection_adds_a_single_edge() {
    let diagram: CoxeterDiagram = "4,3,5".parse().unwrap();
    let gram = diagram.gram(NO_RELATION_GRAM);
    let kind = classify(&gram, SIGNATURE_EPS).unwrap();
    let simplex = Simplex::from_gram(&gram, kind, &SimplexCfg::default()).unwrap();
    let mut vertices = VertexStore::new(1e-6);
    let mut edges = EdgeStore::new();
    let v = simplex.vertices[0].clone();
    let mirror = &simplex.mirrors[0];
    let once = mirror.reflect(&v);
    let twice = mirror.reflect(&once);

    let a = vertices.register(v.clone(), kind.project(&v), Color::WHITE, 0, 0);
    let b = vertices.register(once.clone(), kind.project(&once), Color::WHITE, 0, 1);
    assert!(b.accepted);
    assert!(edges.register(&vertices, a.id, b.id, Color::WHITE, 0));
    let c = vertices.register(twice.clone(), kind.project(&twice), Color::WHITE, 0, 2);
    assert!(!c.accepted);
    assert_eq!(c.id, a.id);
    assert_eq!(vertices.get(c.id).token, vertices.get(a.id).token);
    assert!(!edges.register(&vertices, b.id, c.id, Color::WHITE, 0));
    assert_eq!(edges.len(), 1);
    assert_eq!(vertices.len(), 2);
}

#[test]
fn runs_are_deterministic() {
    let cfg = config("5,3,4").with_max_depth(2);
    let (a, sa) = run(&cfg);
    let (b, sb) = run(&cfg);
    assert_eq!(sa, sb);
    assert_eq!(a.honeycomb(), b.honeycomb());
}

#[test]
fn reset_and_regenerate_reproduce_a_fresh_run() {
    let cfg = config("6,3").with_max_radius(3.0);
    let (fresh, _) = run(&cfg);

    let mut ctx = GenerationContext::new();
    ctx.generate(&config("3,4")).unwrap();
    ctx.reset();
    assert!(ctx.vertices().is_empty() && ctx.edges().is_empty());
    ctx.generate(&cfg).unwrap();
    assert_eq!(ctx.honeycomb(), fresh.honeycomb());

    ctx.regenerate(&cfg).unwrap();
    assert_eq!(ctx.honeycomb(), fresh.honeycomb());
}

#[test]
fn repeated_generate_adds_nothing() {
    let cfg = config("4,3,4").with_max_depth(2);
    let (mut ctx, first) = run(&cfg);
    let second = ctx.generate(&cfg).unwrap();
    assert_eq!(first.vertices, second.vertices);
    assert_eq!(first.edges, second.edges);
    assert_eq!(first.chambers, second.chambers);
    assert_clean(&ctx);
}

#[test]
fn vertex_cap_stops_enqueuing() {
    let (_, small) = run(&config("7,3").with_max_vertices(50));
    let (_, large) = run(&config("7,3").with_max_vertices(500));
    assert!(small.bound_hit && large.bound_hit);
    assert!(small.vertices >= 50);
    assert!(small.vertices < large.vertices);
    assert!(large.vertices >= 500);
}

#[test]
fn vertex_cap_counts_the_whole_registry() {
    let mut ctx = GenerationContext::new();
    let first = ctx.generate(&config("4,4").with_max_depth(1)).unwrap();
    assert_eq!(first.vertices, 10);
    // The registry already holds the cap: only the fundamental chamber runs.
    let second = ctx
        .generate(&config("4,4").with_max_depth(3).with_max_vertices(10))
        .unwrap();
    assert_eq!(second.chambers, 1);
    assert_eq!(second.vertices, 10);
    assert!(second.bound_hit);
}

#[test]
fn orbit_colors_follow_class_and_mirror() {
    let (ctx, _) = run(&config("3,4"));
    for v in ctx.vertices().iter() {
        assert_eq!(v.color, Color::categorical(v.class, 3));
    }
    for e in ctx.edges().iter() {
        assert_eq!(e.color, Color::categorical(e.mirror, 3));
    }
}

#[test]
fn depth_colors_follow_discovery_depth() {
    let cfg = config("4,4").with_max_depth(4).with_color(ColorPolicy::Depth);
    let (ctx, _) = run(&cfg);
    let mut depths = HashSet::new();
    for v in ctx.vertices().iter() {
        assert_eq!(v.color, Color::gradient(v.depth as f32 / 4.0));
        depths.insert(v.depth);
    }
    assert!(depths.contains(&0) && depths.contains(&5));
    for e in ctx.edges().iter() {
        let (a, b) = (ctx.vertices().get(e.a), ctx.vertices().get(e.b));
        assert_eq!(e.color, a.color.mix(b.color));
    }
}

#[test]
fn rejects_invalid_configurations() {
    let mut ctx = GenerationContext::new();
    let unbounded = ctx.generate(&config("4,4"));
    assert!(matches!(unbounded, Err(Error::InvalidConfig { .. })));
    let unbounded = ctx.generate(&config("7,3"));
    assert!(matches!(unbounded, Err(Error::InvalidConfig { .. })));
    for tol in [0.0, -1e-6, 1.5, f64::NAN] {
        let cfg = config("3,3").with_tolerance(tol);
        assert!(matches!(ctx.generate(&cfg), Err(Error::InvalidConfig { .. })));
    }
    let mut cfg = config("inf,3").with_max_depth(2);
    cfg.no_relation_gram = -0.5;
    assert!(matches!(ctx.generate(&cfg), Err(Error::InvalidConfig { .. })));
    assert!(matches!(
        ctx.generate(&config("4,4").with_max_radius(-1.0)),
        Err(Error::InvalidConfig { .. })
    ));
    assert!(ctx.vertices().is_empty());
}

#[test]
fn tolerance_change_needs_a_reset() {
    let mut ctx = GenerationContext::new();
    let stats = ctx.generate(&config("3,3")).unwrap();
    let err = ctx.generate(&config("3,3").with_tolerance(1e-8)).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert_eq!(ctx.vertices().len(), stats.vertices);
    let again = ctx.regenerate(&config("3,3").with_tolerance(1e-8)).unwrap();
    assert_eq!(again.vertices, stats.vertices);
    assert_eq!(ctx.vertices().tolerance(), 1e-8);
}

#[test]
fn honeycomb_indices_point_into_vertices() {
    let (ctx, stats) = run(&config("5,3,4").with_max_depth(2));
    let hc = ctx.honeycomb();
    assert_eq!(hc.vertices.len(), stats.vertices);
    assert_eq!(hc.edges.len(), stats.edges);
    for e in &hc.edges {
        assert!(e.a < hc.vertices.len() && e.b < hc.vertices.len());
        assert_eq!(hc.vertices[e.a].class, e.mirror);
    }
    assert_eq!(hc.vertices[0].depth, 0);
}
