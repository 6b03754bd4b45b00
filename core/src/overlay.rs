use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Display marks laid over the board after a loss. Never read by win/loss logic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LossOverlay {
    triggered: Coord2,
    marks: Array2<Option<LossMark>>,
}

impl LossOverlay {
    /// Marks every unflagged mine, the detonated one distinctly, and every flag that is not on a mine.
    pub fn build(layout: &MineLayout, cells: &Array2<CellState>, triggered: Coord2) -> Self {
        let marks = Array2::from_shape_fn(cells.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let flagged = cells[coords.to_nd_index()].is_flagged();
            match (layout[coords], flagged) {
                (true, true) => None,
                (true, false) if coords == triggered => Some(LossMark::Mine(MineMark::Detonated)),
                (true, false) => Some(LossMark::Mine(MineMark::Undetonated)),
                (false, true) => Some(LossMark::WrongFlag),
                (false, false) => None,
            }
        });
        log::debug!("Loss reveal triggered at {:?}", triggered);
        Self { triggered, marks }
    }

    pub fn triggered(&self) -> Coord2 {
        self.triggered
    }

    pub fn mark_at(&self, coords: Coord2) -> Option<LossMark> {
        self.marks[coords.to_nd_index()]
    }

    pub fn wrong_flag_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|&&mark| mark == Some(LossMark::WrongFlag))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_mines_trigger_and_wrong_flags() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0), (0, 2), (1, 2)]).unwrap();
        let mut cells: Array2<CellState> = Array2::default((2, 3));
        cells[[0, 2]] = CellState::Flagged;
        cells[[1, 0]] = CellState::Flagged;
        cells[[1, 1]] = CellState::Revealed(3);

        let overlay = LossOverlay::build(&layout, &cells, (0, 0));

        assert_eq!(overlay.triggered(), (0, 0));
        assert_eq!(overlay.mark_at((0, 0)), Some(LossMark::Mine(MineMark::Detonated)));
        assert_eq!(overlay.mark_at((1, 2)), Some(LossMark::Mine(MineMark::Undetonated)));
        // correct flag left alone
        assert_eq!(overlay.mark_at((0, 2)), None);
        assert_eq!(overlay.mark_at((1, 0)), Some(LossMark::WrongFlag));
        assert_eq!(overlay.mark_at((1, 1)), None);
        assert_eq!(overlay.wrong_flag_count(), 1);
    }
}
