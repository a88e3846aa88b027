/// Parsecs to world units.
pub const WORLD_SCALE: f32 = 100.0;

/// Star render size is `STAR_SIZE_PIVOT - magnitude`, clamped to these bounds.
pub const STAR_SIZE_PIVOT: f32 = 10.0;
pub const STAR_SIZE_MIN: f32 = 2.0;
pub const STAR_SIZE_MAX: f32 = 12.0;
pub const HIGHLIGHT_SIZE_FACTOR: f32 = 1.5;
pub const HIGHLIGHT_LIGHTNESS_BOOST: f32 = 0.3;

pub const CONSTELLATION_LINE_COLOUR: u32 = 0x4444ff;
pub const CONSTELLATION_SELECTED_LINE_COLOUR: u32 = 0x8888ff;
pub const CONSTELLATION_LINE_OPACITY: f32 = 0.6;

pub const ORBIT_RING_COLOUR: u32 = 0x444444;
pub const ORBIT_RING_OPACITY: f32 = 0.3;
pub const ORBIT_RING_SEGMENTS: usize = 64;

pub const AMBIENT_LIGHT_COLOUR: u32 = 0x404040;

/// Screen-space radius, in pixels, within which a star counts as picked.
pub const STAR_PICK_THRESHOLD_PX: f32 = 10.0;

/// Minimum interval between pointer-move picks.
pub const PICK_DEBOUNCE_SECS: f32 = 0.05;

/// Split a `0xRRGGBB` value into normalised channels.
pub const fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
