//! Board: static cell catalog plus per-cell ownership state.
//!
//! Construction normalizes the definition's four directional arrays into
//! one linear sequence indexed by cell id and seeds an [`OwnershipRecord`]
//! for every property and railroad cell. Non-ownable cells have no
//! ownership entry. The catalog is validated up front so the rest of the
//! engine can index positions without re-checking.

pub mod cell;
pub mod definition;
pub mod ownership;

pub use cell::{Card, Cell, CellCategory, CellEffect, ForcedDestination, RentTable};
pub use definition::BoardDefinition;
pub use ownership::OwnershipRecord;

use rustc_hash::FxHashMap;

use crate::core::{CellId, LoadError};

/// Runtime board state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Cells in linear perimeter order; index equals cell id.
    cells: Vec<Cell>,

    /// Ownership state keyed by cell id, ownable cells only.
    ownership: FxHashMap<CellId, OwnershipRecord>,

    chance: Vec<Card>,
    community_chest: Vec<Card>,
}

impl Board {
    /// Build and validate a board from its external definition.
    ///
    /// Fails if cell ids are not a contiguous `0..n` range or an ownable
    /// cell lacks the market data (price, mortgage value, rent) the engine
    /// needs. The classic board has n = 40.
    pub fn from_definition(definition: &BoardDefinition) -> Result<Self, LoadError> {
        let linear = definition.linearize();
        if linear.is_empty() {
            return Err(LoadError::EmptyBoard);
        }

        let count = linear.len();
        let mut slots: Vec<Option<Cell>> = vec![None; count];
        for cell in linear {
            let index = cell.id.index();
            if index >= count {
                return Err(LoadError::CellOutOfRange {
                    id: cell.id.0,
                    expected: count,
                });
            }
            if slots[index].is_some() {
                return Err(LoadError::DuplicateCell { cell: cell.id });
            }
            slots[index] = Some(cell);
        }

        // Contiguity: count slots and count cells match, so every slot is
        // filled once the two checks above pass.
        let cells: Vec<Cell> = slots.into_iter().map(|slot| slot.expect("slot filled")).collect();

        let mut ownership = FxHashMap::default();
        for cell in &cells {
            if !cell.is_ownable() {
                continue;
            }
            if cell.price.is_none() {
                return Err(LoadError::IncompleteCell { cell: cell.id, field: "price" });
            }
            if cell.mortgage_value.is_none() {
                return Err(LoadError::IncompleteCell { cell: cell.id, field: "mortgage" });
            }
            if cell.rent.is_none() {
                return Err(LoadError::IncompleteCell { cell: cell.id, field: "rent" });
            }
            if cell.category == CellCategory::Property && cell.color.is_none() {
                return Err(LoadError::IncompleteCell { cell: cell.id, field: "color" });
            }
            ownership.insert(cell.id, OwnershipRecord::default());
        }

        // Relocation targets (card and cell effects) must stay on the board.
        let card_effects = definition
            .chance
            .iter()
            .chain(&definition.community_chest)
            .filter_map(|card| card.action.as_ref());
        let cell_effects = cells.iter().filter_map(|cell| cell.action.as_ref());
        for effect in cell_effects.chain(card_effects) {
            if let Some(target) = effect.move_to {
                if target.index() >= count {
                    return Err(LoadError::RelocationOutOfRange {
                        cell: target,
                        expected: count,
                    });
                }
            }
        }

        Ok(Self {
            cells,
            ownership,
            chance: definition.chance.clone(),
            community_chest: definition.community_chest.clone(),
        })
    }

    /// Number of cells on the perimeter.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Look up a cell by id.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// Look up a cell known to be on the board (positions are always
    /// wrapped modulo the cell count before use).
    pub(crate) fn cell_at(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// All property cells of a color group, in linear order.
    pub fn group_cells<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Cell> + 'a {
        self.cells
            .iter()
            .filter(move |c| c.group() == Some(group))
    }

    /// Ownership state of an ownable cell.
    #[must_use]
    pub fn ownership(&self, id: CellId) -> Option<&OwnershipRecord> {
        self.ownership.get(&id)
    }

    /// Mutable ownership state of an ownable cell.
    pub fn ownership_mut(&mut self, id: CellId) -> Option<&mut OwnershipRecord> {
        self.ownership.get_mut(&id)
    }

    /// The full ownership map, for snapshots.
    #[must_use]
    pub fn ownership_state(&self) -> &FxHashMap<CellId, OwnershipRecord> {
        &self.ownership
    }

    /// Replace the ownership map from a snapshot.
    ///
    /// Every snapshot key must name an ownable cell of the loaded board;
    /// ownable cells absent from the snapshot reset to unowned.
    pub fn restore_ownership(
        &mut self,
        state: &FxHashMap<CellId, OwnershipRecord>,
    ) -> Result<(), LoadError> {
        for cell in state.keys() {
            if !self.ownership.contains_key(cell) {
                return Err(LoadError::SnapshotUnknownCell { cell: *cell });
            }
        }
        for (cell, record) in self.ownership.iter_mut() {
            *record = state.get(cell).copied().unwrap_or_default();
        }
        Ok(())
    }

    /// The chance deck.
    #[must_use]
    pub fn chance_deck(&self) -> &[Card] {
        &self.chance
    }

    /// The community-chest deck.
    #[must_use]
    pub fn community_chest_deck(&self) -> &[Card] {
        &self.community_chest
    }
}
