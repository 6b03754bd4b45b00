use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Render-ready snapshot of a board, everything a presentation layer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub state: GameState,
    pub size: Coord2,
    pub mines_left: i32,
    pub elapsed_secs: u32,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_board(board: &Board) -> Self {
        let size = board.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            board.cell_view((row as Coord, col as Coord))
        });

        Self {
            state: board.state(),
            size,
            mines_left: board.mines_left(),
            elapsed_secs: board.elapsed_secs(),
            triggered_mine: board.triggered_mine(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }

    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, CellView>> {
        self.cells.rows().into_iter()
    }
}
