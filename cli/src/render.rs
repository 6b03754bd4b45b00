use sweeper_core::{Board, BoardView, CellView, Coord, Coord2, GameState, MineMark};

/// Status indicator above the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Face {
    Neutral,
    Losing,
    Winning,
}

impl Face {
    pub(crate) fn for_state(state: GameState) -> Self {
        match state {
            GameState::NotStarted | GameState::InProgress => Self::Neutral,
            GameState::Lost => Self::Losing,
            GameState::Won => Self::Winning,
        }
    }

    pub(crate) fn glyph(self) -> &'static str {
        match self {
            Self::Neutral => "😊",
            Self::Losing => "😵",
            Self::Winning => "😎",
        }
    }
}

/// Three character counter, clamped to what fits.
pub(crate) fn format_for_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

fn glyph(cell: CellView, pressed: bool) -> char {
    match cell {
        CellView {
            mine: Some(MineMark::Detonated),
            ..
        } => 'X',
        CellView {
            mine: Some(MineMark::Undetonated),
            ..
        } => '*',
        CellView {
            wrong_flag: true, ..
        } => 'x',
        CellView { flagged: true, .. } => 'F',
        CellView {
            mine_adjacent: Some(0),
            ..
        } => ' ',
        CellView {
            mine_adjacent: Some(count),
            ..
        } => char::from_digit(count.into(), 10).unwrap_or('?'),
        _ if pressed => '_',
        _ => '.',
    }
}

pub(crate) fn render_header(view: &BoardView) -> String {
    format!(
        "{}  {}  {}",
        format_for_counter(view.mines_left),
        Face::for_state(view.state).glyph(),
        format_for_counter(view.elapsed_secs.try_into().unwrap_or(i32::MAX)),
    )
}

/// Header plus the grid, with row and column indices for typing coordinates.
pub(crate) fn render_board(view: &BoardView, pressed: &[Coord2]) -> String {
    let (_, cols) = view.size;
    let mut out = render_header(view);
    out.push('\n');

    out.push_str("    ");
    for col in 0..cols {
        out.push_str(&format!("{col:>3}"));
    }
    out.push('\n');

    for (row, cells) in view.rows().enumerate() {
        out.push_str(&format!("{row:>3} "));
        for (col, &cell) in cells.iter().enumerate() {
            let coords = (row as Coord, col as Coord);
            out.push_str(&format!("{:>3}", glyph(cell, pressed.contains(&coords))));
        }
        out.push('\n');
    }
    out
}

pub(crate) fn banner(board: &Board) -> String {
    let (rows, cols) = board.size();
    format!("{cols}x{rows} board, {} mines", board.total_mines())
}

/// Closing line once the game is over, counting wrong flags after a loss.
pub(crate) fn status_line(board: &Board) -> Option<String> {
    match board.state() {
        GameState::Won => Some("Cleared! Type n for a new game.".to_string()),
        GameState::Lost => {
            let wrong = board
                .loss_overlay()
                .map_or(0, |overlay| overlay.wrong_flag_count());
            Some(match wrong {
                0 => "Boom. Type n for a new game.".to_string(),
                1 => "Boom, 1 wrong flag. Type n for a new game.".to_string(),
                n => format!("Boom, {n} wrong flags. Type n for a new game."),
            })
        }
        GameState::NotStarted | GameState::InProgress => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::MineLayout;

    #[test]
    fn counter_is_zero_padded_and_clamped() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(7), "007");
        assert_eq!(format_for_counter(99), "099");
        assert_eq!(format_for_counter(1234), "999");
        assert_eq!(format_for_counter(-3), "-03");
        assert_eq!(format_for_counter(-150), "-99");
    }

    #[test]
    fn face_follows_game_state() {
        assert_eq!(Face::for_state(GameState::NotStarted), Face::Neutral);
        assert_eq!(Face::for_state(GameState::InProgress), Face::Neutral);
        assert_eq!(Face::for_state(GameState::Lost), Face::Losing);
        assert_eq!(Face::for_state(GameState::Won), Face::Winning);
    }

    #[test]
    fn glyphs_cover_every_cell_kind() {
        let hidden = CellView::default();
        assert_eq!(glyph(hidden, false), '.');
        assert_eq!(glyph(hidden, true), '_');
        assert_eq!(glyph(CellView { flagged: true, ..hidden }, false), 'F');
        assert_eq!(
            glyph(CellView { flagged: true, wrong_flag: true, ..hidden }, false),
            'x'
        );
        assert_eq!(
            glyph(CellView { revealed: true, mine_adjacent: Some(3), ..hidden }, false),
            '3'
        );
        assert_eq!(
            glyph(CellView { revealed: true, mine_adjacent: Some(0), ..hidden }, false),
            ' '
        );
        assert_eq!(
            glyph(CellView { mine: Some(MineMark::Detonated), ..hidden }, false),
            'X'
        );
        assert_eq!(
            glyph(CellView { mine: Some(MineMark::Undetonated), ..hidden }, false),
            '*'
        );
    }

    #[test]
    fn renders_lost_board() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0), (1, 2)]).unwrap();
        let mut board = Board::with_layout(layout).unwrap();
        board.reveal((0, 1)).unwrap();
        board.reveal((0, 0)).unwrap();

        let rendered = render_board(&board.snapshot(), &[]);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("002  😵  "));
        assert_eq!(lines[1], "      0  1  2");
        assert_eq!(lines[2], "  0   X  2  .");
        assert_eq!(lines[3], "  1   .  .  *");
        assert_eq!(
            status_line(&board).as_deref(),
            Some("Boom. Type n for a new game.")
        );
    }

    #[test]
    fn banner_and_status_count_mines_and_wrong_flags() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0), (1, 2)]).unwrap();
        let mut board = Board::with_layout(layout).unwrap();
        assert_eq!(banner(&board), "3x2 board, 2 mines");
        assert_eq!(status_line(&board), None);

        board.reveal((0, 1)).unwrap();
        board.toggle_flag((1, 0)).unwrap();
        board.toggle_flag((1, 1)).unwrap();
        board.reveal((0, 0)).unwrap();

        assert_eq!(
            status_line(&board).as_deref(),
            Some("Boom, 2 wrong flags. Type n for a new game.")
        );
    }
}
