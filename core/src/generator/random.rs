use rand::Rng;

use super::*;

/// Draws uniformly random cells until `mine_count` distinct ones are picked.
///
/// Fails with [`GameError::TooManyMines`] unless at least one cell stays safe, which also keeps the
/// draw loop from spinning forever.
pub fn generate_mines<R: Rng>(
    total_cells: CellCount,
    mine_count: CellCount,
    rng: &mut R,
) -> Result<MineSet> {
    if mine_count >= total_cells {
        log::warn!(
            "Refusing to place {} mines on {} cells",
            mine_count,
            total_cells
        );
        return Err(GameError::TooManyMines);
    }

    let mut mines = MineSet::default();
    while (mines.len() as CellCount) < mine_count {
        let index: CellIndex = rng.random_range(0..total_cells);
        if !mines.insert(index) {
            log::trace!("Cell {} already mined, drawing again", index);
        }
    }
    Ok(mines)
}

/// Seeded, otherwise purely random mine placement.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield> {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mines = generate_mines(config.total_cells(), config.mines, &mut rng)?;
        log::debug!(
            "Generated {}x{} minefield with {} mines (seed {})",
            config.board.width(),
            config.board.height(),
            mines.len(),
            self.seed
        );
        Minefield::new(config.board, mines)
    }
}
