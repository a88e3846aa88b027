/// Kilometres to world units for the solar-system model.
pub const SOLAR_SYSTEM_SCALE: f32 = 2e-6;
/// Extra radius multiplier so the reference body stays visible.
pub const REFERENCE_RADIUS_BOOST: f32 = 20.0;
/// Extra radius multiplier so orbiters stay visible next to their orbits.
pub const ORBITER_RADIUS_BOOST: f32 = 2000.0;
/// Simulated seconds per orbital day at speed factor 1.
pub const SECONDS_PER_ORBITAL_DAY: f32 = 60.0;
/// Self-rotation turns per orbital revolution.
pub const SELF_ROTATION_RATIO: f32 = 10.0;
pub const ORBITAL_SPEED_FACTOR_MAX: f32 = 10.0;

/// Star id of the catalog record that mirrors the reference body.
pub const REFERENCE_STAR_ID: u32 = 0;

pub struct BodyInfo {
    pub name: &'static str,
    /// Kilometres.
    pub radius: f32,
    /// Kilometres from the reference body.
    pub distance: f32,
    pub colour: u32,
    /// Kelvin.
    pub temperature: f32,
    /// Reference body: solar masses. Orbiters: Earth masses.
    pub mass: f32,
    /// Days; `None` for the reference body.
    pub orbital_period: Option<f32>,
    pub moons: u32,
    pub spectral_type: Option<&'static str>,
}

pub const REFERENCE_BODY: BodyInfo = BodyInfo {
    name: "Sun",
    radius: 696_340.0,
    distance: 0.0,
    colour: 0xffff00,
    temperature: 5778.0,
    mass: 1.0,
    orbital_period: None,
    moons: 0,
    spectral_type: Some("G2V"),
};

pub const ORBITERS: &[BodyInfo] = &[
    orbiter("Mercury", 2440.0, 57.9e6, 0x8c8c8c, 440.0, 0.055, 88.0, 0),
    orbiter("Venus", 6052.0, 108.2e6, 0xe6b800, 737.0, 0.815, 225.0, 0),
    orbiter("Earth", 6371.0, 149.6e6, 0x0066ff, 288.0, 1.0, 365.0, 1),
    orbiter("Mars", 3390.0, 227.9e6, 0xff4d4d, 210.0, 0.107, 687.0, 2),
    orbiter("Jupiter", 69911.0, 778.5e6, 0xffad33, 165.0, 317.8, 4333.0, 79),
    orbiter("Saturn", 58232.0, 1.434e9, 0xffcc00, 134.0, 95.2, 10759.0, 82),
    orbiter("Uranus", 25362.0, 2.871e9, 0x00ffff, 76.0, 14.5, 30687.0, 27),
    orbiter("Neptune", 24622.0, 4.495e9, 0x0000ff, 72.0, 17.1, 60190.0, 14),
];

#[allow(clippy::too_many_arguments)]
const fn orbiter(
    name: &'static str,
    radius: f32,
    distance: f32,
    colour: u32,
    temperature: f32,
    mass: f32,
    orbital_period: f32,
    moons: u32,
) -> BodyInfo {
    BodyInfo {
        name,
        radius,
        distance,
        colour,
        temperature,
        mass,
        orbital_period: Some(orbital_period),
        moons,
        spectral_type: None,
    }
}
