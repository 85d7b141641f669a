//! Per-cell ownership state.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Mutable ownership state for one property or railroad cell.
///
/// Building levels are mutually exclusive: 0 houses, 1-4 houses, or one
/// hotel (`hotel` implies `houses == 0`). An unowned record is always at
/// its default (no buildings, not mortgaged).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    pub owner: Option<PlayerId>,
    pub houses: u8,
    pub hotel: bool,
    pub mortgaged: bool,
}

impl OwnershipRecord {
    /// Reset to the unowned state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unowned() {
        let record = OwnershipRecord::default();
        assert_eq!(record.owner, None);
        assert_eq!(record.houses, 0);
        assert!(!record.hotel);
        assert!(!record.mortgaged);
    }

    #[test]
    fn test_clear() {
        let mut record = OwnershipRecord {
            owner: Some(PlayerId::new(1)),
            houses: 3,
            hotel: false,
            mortgaged: true,
        };
        record.clear();
        assert_eq!(record, OwnershipRecord::default());
    }
}
