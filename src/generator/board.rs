//! Circuit-board hole layouts.
//!
//! Places four mounting holes at the board corners, then drops standard
//! component footprints at random offsets, rejecting placements that leave
//! the board margin or come closer than the footprint's pitch to an existing
//! hole. Hole 0 (the first mounting hole) serves as the depot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::CostMatrix;
use crate::error::{Error, Result};

/// Placement attempts per component before it is skipped.
const MAX_PLACEMENT_ATTEMPTS: usize = 100;

const DIP14_HOLES: [(f64, f64); 14] = [
    (0.0, 0.0),
    (0.0, 2.54),
    (0.0, 5.08),
    (0.0, 7.62),
    (0.0, 10.16),
    (0.0, 12.7),
    (0.0, 15.24),
    (7.62, 0.0),
    (7.62, 2.54),
    (7.62, 5.08),
    (7.62, 7.62),
    (7.62, 10.16),
    (7.62, 12.7),
    (7.62, 15.24),
];

const SOIC8_HOLES: [(f64, f64); 8] = [
    (0.0, 0.0),
    (0.0, 1.27),
    (0.0, 2.54),
    (0.0, 3.81),
    (5.08, 0.0),
    (5.08, 1.27),
    (5.08, 2.54),
    (5.08, 3.81),
];

const CONNECTOR5_HOLES: [(f64, f64); 5] = [
    (0.0, 0.0),
    (2.54, 0.0),
    (5.08, 0.0),
    (7.62, 0.0),
    (10.16, 0.0),
];

/// Standard component footprints, in millimetres relative to pin 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Footprint {
    /// 14-pin dual in-line package.
    Dip14,
    /// 8-pin small-outline package.
    Soic8,
    /// 5-pin edge connector.
    Connector5,
}

impl Footprint {
    pub const ALL: [Footprint; 3] = [Footprint::Dip14, Footprint::Soic8, Footprint::Connector5];

    pub fn holes(self) -> &'static [(f64, f64)] {
        match self {
            Footprint::Dip14 => &DIP14_HOLES,
            Footprint::Soic8 => &SOIC8_HOLES,
            Footprint::Connector5 => &CONNECTOR5_HOLES,
        }
    }

    /// Minimum distance between a new hole and any existing one.
    pub fn min_spacing(self) -> f64 {
        match self {
            Footprint::Dip14 | Footprint::Connector5 => 2.54,
            Footprint::Soic8 => 1.27,
        }
    }
}

/// Board dimensions and population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: f64,
    pub height: f64,
    /// Components to attempt to place.
    pub components: usize,
    /// Keep-out distance from the board edge.
    pub edge_margin: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            components: 5,
            edge_margin: 5.0,
        }
    }
}

impl BoardConfig {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_components(mut self, n: usize) -> Self {
        self.components = n;
        self
    }

    fn validate(&self) -> Result<()> {
        let m = self.edge_margin;
        let ok = m.is_finite()
            && m >= 0.0
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 2.0 * m
            && self.height > 2.0 * m;
        if ok {
            Ok(())
        } else {
            Err(Error::invalid_config(format!(
                "board {}x{} has no room inside margin {}",
                self.width, self.height, m
            )))
        }
    }
}

/// A sampled board: hole coordinates plus the components that fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub holes: Vec<(f64, f64)>,
    /// Placed footprints and their pin-1 offsets.
    pub placements: Vec<(Footprint, (f64, f64))>,
}

impl BoardLayout {
    /// Euclidean travel costs between holes.
    pub fn costs(&self) -> CostMatrix {
        CostMatrix::from_points(&self.holes)
    }
}

/// Samples a board layout.
///
/// Components that find no valid position within a bounded number of
/// attempts are skipped, so the layout may hold fewer than
/// `config.components` footprints.
pub fn sample_board<R: Rng>(config: &BoardConfig, rng: &mut R) -> Result<BoardLayout> {
    config.validate()?;
    let m = config.edge_margin;
    let (x_max, y_max) = (config.width - m, config.height - m);

    let mut holes = vec![(m, m), (x_max, m), (m, y_max), (x_max, y_max)];
    let mut placements = Vec::new();

    for _ in 0..config.components {
        let pick = rng.random_range(0..Footprint::ALL.len() as u64) as usize;
        let footprint = Footprint::ALL[pick];
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let offset = (rng.random_range(m..=x_max), rng.random_range(m..=y_max));
            if fits(footprint, offset, &holes, config) {
                holes.extend(
                    footprint
                        .holes()
                        .iter()
                        .map(|&(dx, dy)| (offset.0 + dx, offset.1 + dy)),
                );
                placements.push((footprint, offset));
                break;
            }
        }
    }

    log::debug!(
        "generator.board: placed={}/{} holes={}",
        placements.len(),
        config.components,
        holes.len()
    );
    Ok(BoardLayout { holes, placements })
}

fn fits(
    footprint: Footprint,
    offset: (f64, f64),
    holes: &[(f64, f64)],
    config: &BoardConfig,
) -> bool {
    let m = config.edge_margin;
    footprint.holes().iter().all(|&(dx, dy)| {
        let (x, y) = (offset.0 + dx, offset.1 + dy);
        let inside = x >= m && x <= config.width - m && y >= m && y <= config.height - m;
        inside
            && holes.iter().all(|&(hx, hy)| {
                let d = ((x - hx).powi(2) + (y - hy).powi(2)).sqrt();
                d >= footprint.min_spacing()
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mounting_holes_first() {
        let mut rng = u_numflow::random::create_rng(42);
        let layout = sample_board(&BoardConfig::default(), &mut rng).expect("layout");
        assert_eq!(
            &layout.holes[..4],
            &[(5.0, 5.0), (95.0, 5.0), (5.0, 95.0), (95.0, 95.0)]
        );
        let expected: usize = 4 + layout
            .placements
            .iter()
            .map(|(f, _)| f.holes().len())
            .sum::<usize>();
        assert_eq!(layout.holes.len(), expected);
    }

    #[test]
    fn test_holes_respect_margin() {
        let mut rng = u_numflow::random::create_rng(9);
        let config = BoardConfig::default().with_components(12);
        let layout = sample_board(&config, &mut rng).expect("layout");
        for &(x, y) in &layout.holes {
            assert!((5.0..=95.0).contains(&x) && (5.0..=95.0).contains(&y));
        }
    }

    #[test]
    fn test_costs_are_euclidean() {
        let mut rng = u_numflow::random::create_rng(4);
        let layout = sample_board(&BoardConfig::default(), &mut rng).expect("layout");
        let costs = layout.costs();
        assert_eq!(costs.size(), layout.holes.len());
        assert!(costs.is_symmetric(0.0));
        assert!((costs.get(0, 1) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_board_keeps_only_mounting_holes() {
        // Half a millimetre of usable span; every footprint is wider.
        let config = BoardConfig {
            width: 10.5,
            height: 10.5,
            components: 20,
            edge_margin: 5.0,
        };
        let mut rng = u_numflow::random::create_rng(1);
        let layout = sample_board(&config, &mut rng).expect("layout");
        assert!(layout.placements.is_empty());
        assert_eq!(layout.holes.len(), 4);
    }

    #[test]
    fn test_no_room_rejected() {
        let config = BoardConfig::default().with_size(10.0, 50.0);
        let mut rng = u_numflow::random::create_rng(0);
        assert!(sample_board(&config, &mut rng).is_err());
    }
}
