/// Maximum age of a persisted draw session. Anything older is discarded
/// and a fresh pool is shuffled from scratch.
pub const SESSION_TTL_MS: i64 = 20 * 60 * 60 * 1000; // 20 hours

// One storage key per catalog identity. Two games may share a capacity
// table, but they never share a key: a stale cursor from one game must
// not be able to corrupt another game's pool.
pub const SPIN_WHEEL_STORAGE_KEY: &str = "spinWheelData";
pub const SPIN_WHEEL_NO_WIN_STORAGE_KEY: &str = "spinWheelNoWinData";
pub const PLINKO_STORAGE_KEY: &str = "plinkoData";
pub const MINES_STORAGE_KEY: &str = "minesData";
pub const DICE_STORAGE_KEY: &str = "diceData";
