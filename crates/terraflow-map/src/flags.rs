//! Start/goal markers placed by the user.

use std::fmt;

use terraflow_core::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlagKind {
    Start,
    Goal,
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// A labeled marker bound to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flag {
    pub kind: FlagKind,
    pub pos: Point,
}

/// At most one active flag of each kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    start: Option<Point>,
    goal: Option<Point>,
    clicks: u32,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a flag, returning the one of the same kind it replaced.
    pub fn place(&mut self, kind: FlagKind, pos: Point) -> Option<Flag> {
        let slot = match kind {
            FlagKind::Start => &mut self.start,
            FlagKind::Goal => &mut self.goal,
        };
        slot.replace(pos).map(|pos| Flag { kind, pos })
    }

    /// Alternate placements: odd clicks place the start and clear the goal,
    /// even clicks place the goal. Returns the kind placed.
    pub fn place_next(&mut self, pos: Point) -> FlagKind {
        let kind = if self.clicks % 2 == 0 {
            self.goal = None;
            FlagKind::Start
        } else {
            FlagKind::Goal
        };
        self.place(kind, pos);
        self.clicks = self.clicks.wrapping_add(1);
        kind
    }

    pub fn remove(&mut self, kind: FlagKind) -> Option<Flag> {
        let slot = match kind {
            FlagKind::Start => &mut self.start,
            FlagKind::Goal => &mut self.goal,
        };
        slot.take().map(|pos| Flag { kind, pos })
    }

    /// Remove both flags and restart click alternation.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, kind: FlagKind) -> Option<Point> {
        match kind {
            FlagKind::Start => self.start,
            FlagKind::Goal => self.goal,
        }
    }

    /// `(start, goal)` once both are placed.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((self.start?, self.goal?))
    }

    /// Active flags, start first.
    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        [
            self.start.map(|pos| Flag {
                kind: FlagKind::Start,
                pos,
            }),
            self.goal.map(|pos| Flag {
                kind: FlagKind::Goal,
                pos,
            }),
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placing_replaces_same_kind() {
        let mut flags = FlagSet::new();
        assert_eq!(flags.place(FlagKind::Goal, Point::new(1, 1)), None);
        let old = flags.place(FlagKind::Goal, Point::new(2, 2));
        assert_eq!(
            old,
            Some(Flag {
                kind: FlagKind::Goal,
                pos: Point::new(1, 1)
            })
        );
        assert_eq!(flags.get(FlagKind::Goal), Some(Point::new(2, 2)));
        assert_eq!(flags.get(FlagKind::Start), None);
        assert_eq!(flags.endpoints(), None);
    }

    #[test]
    fn clicks_alternate_start_and_goal() {
        let mut flags = FlagSet::new();
        assert_eq!(flags.place_next(Point::new(0, 0)), FlagKind::Start);
        assert_eq!(flags.place_next(Point::new(5, 5)), FlagKind::Goal);
        assert_eq!(flags.endpoints(), Some((Point::new(0, 0), Point::new(5, 5))));
        // Third click starts over: new start, goal cleared.
        assert_eq!(flags.place_next(Point::new(3, 3)), FlagKind::Start);
        assert_eq!(flags.get(FlagKind::Start), Some(Point::new(3, 3)));
        assert_eq!(flags.get(FlagKind::Goal), None);
    }

    #[test]
    fn clear_and_iter() {
        let mut flags = FlagSet::new();
        flags.place(FlagKind::Goal, Point::new(4, 0));
        flags.place(FlagKind::Start, Point::new(0, 4));
        let kinds: Vec<_> = flags.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, [FlagKind::Start, FlagKind::Goal]);
        assert!(flags.remove(FlagKind::Start).is_some());
        assert_eq!(flags.iter().count(), 1);
        flags.clear();
        assert_eq!(flags.iter().count(), 0);
        assert_eq!(flags.place_next(Point::ZERO), FlagKind::Start);
    }
}
