//! Generate a map, drop flags on opposite corners and print the solved route.
//!
//! Usage: `flowmap [seed] [block]`. A random seed is used when none is given;
//! `block` additionally runs a coarse solve on `block`-averaged costs.

use std::env;
use std::error::Error;

use rand::RngExt;
use terraflow_core::{CostGrid, Point, is_passable};
use terraflow_map::{FlagKind, MapConfig, Session, StatusSink, TextSurface};

struct Stdout;

impl StatusSink for Stdout {
    fn status(&mut self, message: &str) {
        println!("> {message}");
    }
}

/// First passable cell met when scanning `points` in order.
fn first_passable(cost: &CostGrid, mut points: impl Iterator<Item = Point>) -> Option<Point> {
    points.find(|&p| cost.get(p).is_some_and(|&c| is_passable(c)))
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse()?,
        None => rand::rng().random::<u64>(),
    };
    let block = args.next().map(|s| s.parse::<u32>()).transpose()?;

    let config = MapConfig {
        seed,
        ..Default::default()
    };
    let mut session = Session::with_sink(config, Stdout)?;
    println!("seed {seed}");

    let cost = session.cost();
    let points: Vec<Point> = cost.bounds().iter().collect();
    let start = first_passable(cost, points.iter().copied());
    let goal = first_passable(cost, points.iter().rev().copied());
    let (Some(start), Some(goal)) = (start, goal) else {
        println!("seed {seed}: map is all water");
        return Ok(());
    };
    session.place_flag(FlagKind::Start, start)?;
    session.place_flag(FlagKind::Goal, goal)?;

    let size = session.terrain().size();
    session.solve()?;
    let mut surface = TextSurface::new(size.x, size.y)?;
    session.render(&mut surface);
    println!("{surface}");

    if let Some(block) = block {
        session.solve_coarse(block)?;
        let mut surface = TextSurface::new(size.x, size.y)?;
        session.render(&mut surface);
        println!("{surface}");
    }
    Ok(())
}
