use crate::*;
pub use random::*;

mod random;

/// Produces the mine layout for a game once the first revealed cell is known.
pub trait MinefieldGenerator {
    /// Places `config.mines` mines, never on `safe`.
    fn generate(self, config: GameConfig, safe: Coord2) -> Result<MineLayout>;
}
