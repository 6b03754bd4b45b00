use ndarray::Array2;

use super::*;

/// Uniform placement by rejection sampling: cell indices are drawn over the whole grid and redrawn when they land on
/// the safe cell or on an already placed mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig, safe: Coord2) -> Result<MineLayout> {
        use rand::prelude::*;

        let safe = config.validate_coords(safe)?;
        let total_cells = config.total_cells();

        // the safe cell must stay free or the loop below never ends
        if config.mines >= total_cells {
            log::warn!(
                "Cannot keep a safe cell, requested {} mines but only {} cells",
                config.mines,
                total_cells
            );
            return Err(GameError::TooManyMines);
        }

        let safe_index = linear_index(safe, config.size);
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut redraws: u32 = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while mines_placed < config.mines {
            let place: CellCount = rng.random_range(0..total_cells);
            if place == safe_index {
                redraws += 1;
                continue;
            }
            let cell = &mut mines[from_linear_index(place, config.size).to_nd_index()];
            if *cell {
                redraws += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {:?} around safe cell {:?} with {} redraws",
            mines_placed,
            config.size,
            safe,
            redraws
        );
        Ok(MineLayout::from_mine_mask(mines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn config(width: usize, height: usize, mines: usize) -> GameConfig {
        GameConfig::new(width, height, mines).unwrap()
    }

    #[test]
    fn places_exact_mine_count_and_keeps_start_safe() {
        let config = config(30, 16, 99);
        for seed in 0..200 {
            let start = ((seed % 16) as Coord, (seed % 30) as Coord);
            let layout = RandomMinefieldGenerator::new(seed).generate(config, start).unwrap();

            assert_eq!(layout.mine_count(), 99);
            assert_eq!(layout.iter_mines().count(), 99);
            assert!(!layout.contains_mine(start), "seed {seed} mined the start cell");
        }
    }

    #[test]
    fn adjacency_matches_a_direct_recount() {
        let config = config(30, 16, 99);
        for seed in 0..50 {
            let layout = RandomMinefieldGenerator::new(seed).generate(config, (8, 15)).unwrap();
            let mines: Vec<Coord2> = layout.iter_mines().collect();

            for row in 0..16u8 {
                for col in 0..30u8 {
                    if layout.contains_mine((row, col)) {
                        continue;
                    }
                    let expected = mines
                        .iter()
                        .filter(|&&(r, c)| r.abs_diff(row) <= 1 && c.abs_diff(col) <= 1)
                        .count() as u8;
                    assert_eq!(
                        layout.adjacent_mine_count((row, col)),
                        expected,
                        "seed {seed} at {:?}",
                        (row, col)
                    );
                }
            }
        }
    }

    #[test]
    fn fills_every_cell_but_the_start() {
        let config = config(3, 3, 8);
        let layout = RandomMinefieldGenerator::new(7).generate(config, (1, 1)).unwrap();

        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 1)));
        assert_eq!(layout.adjacent_mine_count((1, 1)), 8);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = config(9, 9, 10);
        let a = RandomMinefieldGenerator::new(42).generate(config, (4, 4)).unwrap();
        let b = RandomMinefieldGenerator::new(42).generate(config, (4, 4)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_start_outside_board() {
        let result = RandomMinefieldGenerator::new(1).generate(config(4, 4, 3), (4, 0));
        assert_eq!(result, Err(GameError::InvalidCoords));
    }

    #[test]
    fn rejects_full_board() {
        let full = GameConfig::new_unchecked((2, 2), 4);
        let result = RandomMinefieldGenerator::new(1).generate(full, (0, 0));
        assert_eq!(result, Err(GameError::TooManyMines));
    }
}
