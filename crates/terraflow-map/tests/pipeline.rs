use std::f64::consts::SQRT_2;

use terraflow_core::{Direction, Grid, INFINITE_COST};
use terraflow_gen::Filter;
use terraflow_map::{
    FilterConfig, Neighborhood, Path, Point, TerrainAlgorithm, TerrainConfig, derive_cost_grid,
    generate_map, solve_path,
};
use terraflow_paths::FlowSolver;

fn configs() -> Vec<TerrainConfig> {
    vec![
        TerrainConfig::default(),
        TerrainConfig {
            algorithm: TerrainAlgorithm::DiamondSquare,
            ..Default::default()
        },
        TerrainConfig {
            median_radius: 2,
            ..Default::default()
        },
    ]
}

#[test]
fn generation_is_deterministic() {
    for cfg in configs() {
        for seed in [0, 1, 99, u64::MAX] {
            let a = generate_map(33, 21, seed, &cfg).unwrap();
            let b = generate_map(33, 21, seed, &cfg).unwrap();
            assert_eq!(a, b, "{cfg:?} seed {seed}");
        }
    }
}

#[test]
fn filters_preserve_dimensions() {
    let terrain = generate_map(17, 9, 5, &TerrainConfig::default()).unwrap();
    let filters = [
        Filter::Threshold { cutoff: 0.4 },
        Filter::Smoothing {
            center_weight: 1.0,
            neighborhood: Neighborhood::Four,
        },
        Filter::Normalize {
            min_cost: 2.0,
            max_cost: 3.0,
        },
        Filter::Median { radius: 1 },
    ];
    for f in &filters {
        assert_eq!(f.apply(&terrain).unwrap().size(), terrain.size(), "{}", f.name());
    }
    let cost = terraflow_gen::apply(&filters, &terrain).unwrap();
    assert_eq!(cost.size(), terrain.size());
}

#[test]
fn threshold_then_normalize_keeps_order() {
    let terrain = generate_map(40, 30, 8, &TerrainConfig::default()).unwrap();
    let cfg = FilterConfig {
        water_level: 0.35,
        smoothing_passes: 0,
        min_cost: 2.0,
        max_cost: 9.0,
        ..Default::default()
    };
    let cost = derive_cost_grid(&terrain, &cfg).unwrap();
    let mut kept = Vec::new();
    for ((p, &c), &t) in cost.iter().zip(terrain.values()) {
        if t < cfg.water_level {
            assert_eq!(c, INFINITE_COST, "{p} should be water");
        } else {
            assert!(c >= cfg.min_cost && c <= cfg.max_cost, "{p}: {c}");
            kept.push((t, c));
        }
    }
    kept.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert!(kept.windows(2).all(|w| w[0].1 <= w[1].1));
}

#[test]
fn open_grid_costs_follow_neighborhood() {
    let cost = Grid::new(5, 5, 1.0).unwrap();
    let goal = Point::new(2, 2);
    let corner = Point::ZERO;

    let four = FlowSolver::new(Neighborhood::Four).solve(&cost, goal).unwrap();
    assert_eq!(four.cost_at(corner).unwrap(), 4.0);
    let eight = FlowSolver::new(Neighborhood::Eight).solve(&cost, goal).unwrap();
    assert!((eight.cost_at(corner).unwrap() - 2.0 * SQRT_2).abs() < 1e-12);

    for field in [&four, &eight] {
        let dir = field.direction_at(corner).unwrap().unwrap();
        let next = dir.step(corner);
        assert!(field.cost_at(next).unwrap() < field.cost_at(corner).unwrap());
    }
    assert_eq!(eight.direction_at(corner).unwrap(), Some(Direction::SE));
}

#[test]
fn wall_makes_goal_unreachable() {
    let cost = Grid::from_fn(7, 5, |p| if p.x == 3 { INFINITE_COST } else { 1.0 }).unwrap();
    for nb in [Neighborhood::Four, Neighborhood::Eight] {
        let path = solve_path(&cost, Point::new(0, 2), Point::new(6, 2), nb).unwrap();
        assert!(path.is_empty());
    }
}

#[test]
fn generated_paths_are_valid() {
    let cfg = FilterConfig {
        water_level: 0.0,
        ..Default::default()
    };
    for seed in [3, 4, 5] {
        let terrain = generate_map(48, 32, seed, &TerrainConfig::default()).unwrap();
        let cost = derive_cost_grid(&terrain, &cfg).unwrap();
        let (start, goal) = (Point::new(1, 30), Point::new(46, 1));
        for nb in [Neighborhood::Four, Neighborhood::Eight] {
            let path = solve_path(&cost, start, goal, nb).unwrap();
            assert_eq!(path.start(), Some(start));
            assert_eq!(path.goal(), Some(goal));
            assert!(path.is_valid(nb), "seed {seed} {nb:?}");
        }
    }
}

#[test]
fn resolving_gives_identical_fields() {
    let terrain = generate_map(30, 30, 21, &TerrainConfig::default()).unwrap();
    let cost = derive_cost_grid(&terrain, &FilterConfig::default()).unwrap();
    let goal = cost
        .iter()
        .find(|(_, c)| c.is_finite())
        .map(|(p, _)| p)
        .unwrap();
    let mut solver = FlowSolver::new(Neighborhood::Eight);
    let a = solver.solve(&cost, goal).unwrap();
    let b = solver.solve(&cost, goal).unwrap();
    assert_eq!(a.costs(), b.costs());
    assert_eq!(a.directions(), b.directions());
}

#[test]
fn three_by_three_scenario() {
    let cost = Grid::new(3, 3, 1.0).unwrap();
    let path = solve_path(&cost, Point::new(0, 0), Point::new(1, 1), Neighborhood::Eight).unwrap();
    assert_eq!(path, Path::new(vec![Point::new(0, 0), Point::new(1, 1)]));

    let path = solve_path(&cost, Point::new(0, 0), Point::new(1, 1), Neighborhood::Four).unwrap();
    assert_eq!(path.len(), 3);
    assert!(path.is_valid(Neighborhood::Four));
    assert!(matches!(path.points()[1], Point { x: 1, y: 0 } | Point { x: 0, y: 1 }));

    let single = solve_path(&cost, Point::new(1, 1), Point::new(1, 1), Neighborhood::Eight).unwrap();
    assert_eq!(single.points(), [Point::new(1, 1)]);
}
