use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DICE_STORAGE_KEY, MINES_STORAGE_KEY, PLINKO_STORAGE_KEY,
    SPIN_WHEEL_NO_WIN_STORAGE_KEY, SPIN_WHEEL_STORAGE_KEY,
};
use crate::prize::Catalog;

/// Standard ten-segment wheel: every segment is a win. 153 prizes total.
/// The dice game draws from the same table, on its own storage key.
pub static SPIN_WHEEL: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_rows(&[
        ("AAPL", "900", 1),
        ("GOOG", "787.5", 1),
        ("NVDA", "450", 2),
        ("SABIC", "20", 34),
        ("SSA", "114.125", 25),
        ("STC", "84", 18),
        ("SNAP", "86.25", 18),
        ("ARAMCO", "58", 30),
        ("LCID", "21.75", 22),
        ("LSA", "107.875", 2),
    ])
});

/// Secondary wheel skin with "Lost" placeholder segments. The placeholders
/// are ordinary catalog entries so the draw math stays uniform; only the
/// presentation treats them as a miss. 698 outcomes total.
pub static SPIN_WHEEL_NO_WIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_rows(&[
        ("AAPL", "900", 2),
        ("GOOG", "787.5", 2),
        ("NVDA", "450", 5),
        ("SABIC", "68", 25),
        ("Lost", "0", 70),
        ("STC", "42", 125),
        ("SNAP", "43.0", 125),
        ("ARAMCO", "29", 175),
        ("LCID", "10.875", 100),
        ("Lost", "0", 69),
    ])
});

/// Capacity table shared by the plinko board and the mines matching game.
/// The two games draw from the same distribution but never the same pool.
pub static PLINKO: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_rows(&[
        ("AAPL", "900", 1),
        ("GOOG", "787.5", 1),
        ("NVDA", "450", 3),
        ("SABIC", "20", 40),
        ("SSA", "114.125", 30),
        ("STC", "84", 25),
        ("SNAP", "86.25", 25),
        ("ARAMCO", "58", 40),
        ("LCID", "21.75", 30),
        ("LSA", "107.875", 5),
    ])
});

/// The kiosk's game families. Each maps to the catalog it draws from and
/// the storage key its session persists under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameKind {
    SpinWheel,
    SpinWheelNoWin,
    Plinko,
    Mines,
    Dice,
}

impl GameKind {
    pub fn catalog(&self) -> &'static Catalog {
        match self {
            Self::SpinWheel | Self::Dice => &SPIN_WHEEL,
            Self::SpinWheelNoWin => &SPIN_WHEEL_NO_WIN,
            Self::Plinko | Self::Mines => &PLINKO,
        }
    }

    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::SpinWheel => SPIN_WHEEL_STORAGE_KEY,
            Self::SpinWheelNoWin => SPIN_WHEEL_NO_WIN_STORAGE_KEY,
            Self::Plinko => PLINKO_STORAGE_KEY,
            Self::Mines => MINES_STORAGE_KEY,
            Self::Dice => DICE_STORAGE_KEY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [GameKind; 5] = [
        GameKind::SpinWheel,
        GameKind::SpinWheelNoWin,
        GameKind::Plinko,
        GameKind::Mines,
        GameKind::Dice,
    ];

    #[test]
    fn test_catalog_totals() {
        assert_eq!(SPIN_WHEEL.total_capacity(), 153);
        assert_eq!(SPIN_WHEEL_NO_WIN.total_capacity(), 698);
        assert_eq!(PLINKO.total_capacity(), 200);
    }

    #[test]
    fn test_catalog_ids_are_positional() {
        for kind in ALL_KINDS {
            for (position, entry) in kind.catalog().entries().iter().enumerate() {
                assert_eq!(entry.id, position);
            }
        }
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        for a in ALL_KINDS {
            for b in ALL_KINDS {
                if a != b {
                    assert_ne!(a.storage_key(), b.storage_key());
                }
            }
        }
    }

    #[test]
    fn test_no_win_segments_present_on_secondary_skin() {
        let lost = SPIN_WHEEL_NO_WIN
            .entries()
            .iter()
            .filter(|e| e.label == "Lost")
            .count();
        assert_eq!(lost, 2);
        assert!(SPIN_WHEEL.entries().iter().all(|e| e.label != "Lost"));
    }
}
