/// Temperature used by the numeric filters when the class is unknown.
pub const DEFAULT_TEMPERATURE: f32 = 5000.0;

/// Temperature the `hottest` ranking gives to an unknown class.
pub const UNRANKED_TEMPERATURE: f32 = 0.0;

pub struct SpectralClassInfo {
    pub letter: char,
    /// Representative surface temperature in kelvin.
    pub temperature: f32,
    /// Hue (0..1), saturation, lightness.
    pub hsl: (f32, f32, f32),
}

pub const SPECTRAL_CLASSES: &[SpectralClassInfo] = &[
    SpectralClassInfo {
        letter: 'O',
        temperature: 30000.0,
        hsl: (0.6, 1.0, 0.9),
    },
    SpectralClassInfo {
        letter: 'B',
        temperature: 20000.0,
        hsl: (0.55, 1.0, 0.8),
    },
    SpectralClassInfo {
        letter: 'A',
        temperature: 9000.0,
        hsl: (0.5, 1.0, 0.7),
    },
    SpectralClassInfo {
        letter: 'F',
        temperature: 7000.0,
        hsl: (0.45, 1.0, 0.6),
    },
    SpectralClassInfo {
        letter: 'G',
        temperature: 5500.0,
        hsl: (0.4, 1.0, 0.5),
    },
    SpectralClassInfo {
        letter: 'K',
        temperature: 4000.0,
        hsl: (0.35, 1.0, 0.4),
    },
    SpectralClassInfo {
        letter: 'M',
        temperature: 3000.0,
        hsl: (0.3, 1.0, 0.3),
    },
];

/// Palette entry for stars without a recognised class (white).
pub const UNKNOWN_CLASS_HSL: (f32, f32, f32) = (0.0, 0.0, 1.0);

pub fn spectral_class(letter: char) -> Option<&'static SpectralClassInfo> {
    SPECTRAL_CLASSES.iter().find(|c| c.letter == letter)
}
