//! Engine-wide constants (constant.h)

/// Dungeon height in cells
pub const MAX_HEIGHT: usize = 66;

/// Dungeon width in cells
pub const MAX_WIDTH: usize = 198;

/// Maximum range of bolts and balls
pub const OBJ_BOLT_RANGE: u32 = 18;

/// Default radius of a player-cast ball
pub const BALL_RADIUS: u32 = 2;

/// Ceiling on breath damage delivered to the player
pub const BREATH_DAMAGE_CAP: i32 = 1600;

/// Largest raw damage an effect accepts; bigger hits are clamped to it
pub const MAX_RAW_DAMAGE: i32 = i16::MAX as i32;

/// Immune targets take 1/IMMUNE_DIVISOR of the damage
pub const IMMUNE_DIVISOR: i32 = 9;

/// Cells a gravity hit hurls its target
pub const GRAVITY_DISPLACEMENT: u32 = 5;

/// Half-width of the level band a polymorph draws from
pub const POLYMORPH_BAND: u8 = 5;

/// Unit of the player's fractional experience counter
pub const EXP_FRACTION_UNIT: u32 = 0x10000;

/// Highest value a player stat can be drained down to
pub const MIN_STAT: u8 = 3;
