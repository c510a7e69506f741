//! Drawing maps onto character surfaces.
//!
//! Rendering is split into independent layers ([`CellFeature`]) drawn in
//! order onto anything implementing [`Surface`]: terrain first, then the
//! path, then flags.

use std::fmt;

use terraflow_core::{Grid, Point, Result, TerrainGrid};
use terraflow_paths::Path;

use crate::flags::{Flag, FlagKind};

/// Elevation bands used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TerrainBand {
    DeepWater,
    Water,
    Shallows,
    Plains,
    Hills,
    Mountains,
    Peaks,
}

impl TerrainBand {
    /// Upper elevation bound of each band except the last.
    const CUTS: [(f64, TerrainBand); 6] = [
        (0.15, TerrainBand::DeepWater),
        (0.30, TerrainBand::Water),
        (0.38, TerrainBand::Shallows),
        (0.60, TerrainBand::Plains),
        (0.75, TerrainBand::Hills),
        (0.90, TerrainBand::Mountains),
    ];

    /// Band for an elevation in `[0, 1]`. Values outside clamp to the
    /// outermost bands; NaN counts as deep water.
    pub fn classify(elevation: f64) -> Self {
        Self::CUTS
            .iter()
            .find(|&&(cut, _)| elevation.is_nan() || elevation < cut)
            .map_or(Self::Peaks, |&(_, band)| band)
    }

    pub fn glyph(self) -> char {
        match self {
            Self::DeepWater => '~',
            Self::Water => '=',
            Self::Shallows => '-',
            Self::Plains => '.',
            Self::Hills => ',',
            Self::Mountains => '^',
            Self::Peaks => 'A',
        }
    }

    pub fn is_water(self) -> bool {
        matches!(self, Self::DeepWater | Self::Water)
    }
}

pub const PATH_GLYPH: char = '*';

impl FlagKind {
    pub fn glyph(self) -> char {
        match self {
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }
}

// ---------------------------------------------------------------------------
// Surfaces
// ---------------------------------------------------------------------------

/// Something cells can be drawn onto.
pub trait Surface {
    fn size(&self) -> Point;

    /// Draw `glyph` at `p`. Positions outside the surface are ignored.
    fn put(&mut self, p: Point, glyph: char);
}

/// A plain character buffer. `Display` prints it one row per line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSurface {
    cells: Grid<char>,
}

impl TextSurface {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Ok(Self {
            cells: Grid::new(width, height, ' ')?,
        })
    }

    pub fn glyph(&self, p: Point) -> Option<char> {
        self.cells.get(p).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.cells.height()).map(|y| {
            self.cells
                .row(y)
                .map(|r| r.iter().collect())
                .unwrap_or_default()
        })
    }
}

impl Surface for TextSurface {
    fn size(&self) -> Point {
        self.cells.size()
    }

    fn put(&mut self, p: Point, glyph: char) {
        if let Some(cell) = self.cells.get_mut(p) {
            *cell = glyph;
        }
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

/// One drawable layer of a map view.
#[derive(Debug, Clone, Copy)]
pub enum CellFeature<'a> {
    Terrain(&'a TerrainGrid),
    Flag(Flag),
    PathOverlay(&'a Path),
}

impl CellFeature<'_> {
    pub fn draw(&self, surface: &mut dyn Surface) {
        match *self {
            Self::Terrain(terrain) => {
                for (p, &v) in terrain.iter() {
                    surface.put(p, TerrainBand::classify(v).glyph());
                }
            }
            Self::Flag(flag) => surface.put(flag.pos, flag.kind.glyph()),
            Self::PathOverlay(path) => {
                for &p in path {
                    surface.put(p, PATH_GLYPH);
                }
            }
        }
    }
}

/// Draw `features` in order; later layers overwrite earlier ones.
pub fn render<'a>(features: impl IntoIterator<Item = CellFeature<'a>>, surface: &mut dyn Surface) {
    for feature in features {
        feature.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_unit_interval() {
        assert_eq!(TerrainBand::classify(0.0), TerrainBand::DeepWater);
        assert_eq!(TerrainBand::classify(0.2), TerrainBand::Water);
        assert_eq!(TerrainBand::classify(0.3), TerrainBand::Shallows);
        assert_eq!(TerrainBand::classify(0.5), TerrainBand::Plains);
        assert_eq!(TerrainBand::classify(0.8), TerrainBand::Mountains);
        assert_eq!(TerrainBand::classify(1.0), TerrainBand::Peaks);
        assert_eq!(TerrainBand::classify(f64::NAN), TerrainBand::DeepWater);
        assert!(TerrainBand::classify(0.1).is_water());
        assert!(!TerrainBand::classify(0.35).is_water());
    }

    #[test]
    fn layers_draw_in_order() {
        let terrain = Grid::new(3, 2, 0.5).unwrap();
        let path = Path::new(vec![Point::new(0, 0), Point::new(1, 1)]);
        let flag = Flag {
            kind: FlagKind::Start,
            pos: Point::new(0, 0),
        };
        let mut s = TextSurface::new(3, 2).unwrap();
        render(
            [
                CellFeature::Terrain(&terrain),
                CellFeature::PathOverlay(&path),
                CellFeature::Flag(flag),
            ],
            &mut s,
        );
        assert_eq!(s.to_string(), "S..\n.*.");
    }

    #[test]
    fn out_of_range_puts_are_clipped() {
        let mut s = TextSurface::new(2, 1).unwrap();
        s.put(Point::new(5, 0), 'x');
        s.put(Point::new(-1, 0), 'x');
        assert_eq!(s.to_string(), "  ");
        s.put(Point::new(1, 0), 'x');
        assert_eq!(s.to_string(), " x");
        assert_eq!(s.size(), Point::new(2, 1));
        assert_eq!(s.glyph(Point::new(9, 9)), None);
    }
}
