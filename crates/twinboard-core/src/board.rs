use crate::rules::RulesEngine;
use crate::types::{BoardId, Piece, Square};

/// Derived 8x8 grid, addressed `[rank][file]` with rank 0 = rank 1.
pub type Projection = [[Option<Piece>; 8]; 8];

/// One side's board: a rules-engine instance plus a cached projection
/// the renderer reads. The projection is recomputed in full after every
/// engine mutation and never hand-patched.
#[derive(Debug, Clone)]
pub struct BoardSession<R> {
    id: BoardId,
    rules: R,
    projection: Projection,
}

impl<R: RulesEngine> BoardSession<R> {
    pub fn new(id: BoardId, rules: R) -> Self {
        let mut session = Self {
            id,
            rules,
            projection: [[None; 8]; 8],
        };
        session.refresh_projection();
        session
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.projection[usize::from(square.rank)][usize::from(square.file)]
    }

    pub fn piece_count(&self) -> usize {
        self.projection.iter().flatten().flatten().count()
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Callers that mutate the engine must call [`refresh_projection`]
    /// afterwards.
    ///
    /// [`refresh_projection`]: Self::refresh_projection
    pub fn rules_mut(&mut self) -> &mut R {
        &mut self.rules
    }

    /// Recompute the full grid by querying the engine at every square.
    /// No incremental updates: the board is small and fixed-size, so
    /// correctness wins over efficiency.
    pub fn refresh_projection(&mut self) {
        for square in Square::all() {
            self.projection[usize::from(square.rank)][usize::from(square.file)] =
                self.rules.get(square);
        }
    }
}
