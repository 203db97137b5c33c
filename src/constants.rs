/// Game configuration constants.
///
/// Everything here is expressed in virtual-canvas units (an 800×600 world
/// the display layer scales to the terminal) and in frames of the fixed
/// ~60 FPS step, so "60 frames" reads as roughly one second.

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 40.0;

/// Horizontal movement per frame while a direction key is held.
pub const PLAYER_SPEED: f32 = 5.0;

/// Distance from the bottom of the world to the player's ground line.
pub const PLAYER_GROUND_OFFSET: f32 = 100.0;

/// Downward acceleration applied every airborne frame.
pub const GRAVITY: f32 = 0.5;

/// Initial vertical velocity of a jump (negative = up).
pub const JUMP_SPEED: f32 = -12.0;

/// Frames of immunity after an obstacle hit.
pub const INVINCIBILITY_FRAMES: u32 = 60;

/// Min frames between shots.
pub const SHOOT_COOLDOWN_FRAMES: u32 = 15;

// ── Projectiles & falling numbers ─────────────────────────────────────────────

pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = 10.0;
pub const BULLET_SPEED: f32 = 8.0;

pub const NUMBER_WIDTH: f32 = 40.0;
pub const NUMBER_HEIGHT: f32 = 40.0;

// ── Obstacles ─────────────────────────────────────────────────────────────────

pub const OBSTACLE_WIDTH: f32 = 40.0;
pub const OBSTACLE_HEIGHT: f32 = 40.0;

/// Patrol speed once an obstacle has picked its direction.
pub const OBSTACLE_SPEED: f32 = 1.5;

/// Minimum horizontal gap between obstacles; a grounded number will not
/// spawn a new obstacle closer than this to an existing one.
pub const OBSTACLE_SPACING_MIN: f32 = 50.0;

/// Concurrent obstacle cap on tiers 2+ (tier 1 spawns none).
pub const MAX_OBSTACLES: usize = 8;

// ── Economy ───────────────────────────────────────────────────────────────────

/// Stars needed to buy one shield.
pub const SHIELD_COST: u32 = 15;

/// Stars needed to buy one extra life (shown on the HUD; lives are only
/// actually gained through shield conversion).
pub const LIFE_COST: u32 = 40;

/// Shield purchases consumed by one shields-to-life conversion.
pub const SHIELDS_FOR_LIFE_CONVERSION: u32 = 20;

/// Lives at the start of a session.
pub const STARTING_LIVES: u32 = 5;

// ── HUD layout ────────────────────────────────────────────────────────────────

pub const HUD_LEFT_MARGIN: f32 = 30.0;
pub const HUD_LIVES_Y: f32 = 50.0;
pub const HUD_STARS_Y: f32 = 90.0;
pub const HUD_SHIELD_BUTTON_Y: f32 = 120.0;
pub const HUD_CONVERSION_BUTTON_Y: f32 = 170.0;

/// Y position of the equation box.
pub const EQUATION_Y: f32 = 50.0;
