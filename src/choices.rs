//! The fixed catalogs offered by the form.
//!
//! Labels double as form values and as the text that lands in the prompt, so
//! they must not change.

use std::fmt;

/// A value picked from one of the fixed catalogs.
pub trait Choice: Copy + Eq + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// Human readable label, also used as the form value.
    fn label(self) -> &'static str;

    /// Looks up an option by its label.
    fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.iter().copied().find(|choice| choice.label() == value)
    }
}

/// Preset color schemes, plus the sentinel that switches to free text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    /// Vibrant and colorful
    #[default]
    Vibrant,
    /// Pastel colors
    Pastel,
    /// Earth tones
    EarthTones,
    /// Ocean blues
    OceanBlues,
    /// Galaxy purples and blues
    Galaxy,
    /// Golden and royal
    GoldenRoyal,
    /// Black and white
    BlackAndWhite,
    /// Monochromatic
    Monochromatic,
    /// Sentinel, the user types their own scheme
    Custom,
}

impl Choice for ColorScheme {
    const ALL: &'static [Self] = &[
        Self::Vibrant,
        Self::Pastel,
        Self::EarthTones,
        Self::OceanBlues,
        Self::Galaxy,
        Self::GoldenRoyal,
        Self::BlackAndWhite,
        Self::Monochromatic,
        Self::Custom,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Vibrant => "Vibrant and colorful",
            Self::Pastel => "Pastel colors",
            Self::EarthTones => "Earth tones",
            Self::OceanBlues => "Ocean blues",
            Self::Galaxy => "Galaxy purples and blues",
            Self::GoldenRoyal => "Golden and royal",
            Self::BlackAndWhite => "Black and white",
            Self::Monochromatic => "Monochromatic",
            Self::Custom => "Custom color scheme",
        }
    }
}

/// Overall art style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArtStyle {
    /// Traditional mandala
    #[default]
    Traditional,
    /// Modern geometric
    ModernGeometric,
    /// Floral and organic
    FloralOrganic,
    /// Abstract
    Abstract,
    /// Celestial/cosmic
    Celestial,
    /// Tribal/ethnic
    Tribal,
    /// Psychedelic
    Psychedelic,
    /// Minimalist
    Minimalist,
}

impl Choice for ArtStyle {
    const ALL: &'static [Self] = &[
        Self::Traditional,
        Self::ModernGeometric,
        Self::FloralOrganic,
        Self::Abstract,
        Self::Celestial,
        Self::Tribal,
        Self::Psychedelic,
        Self::Minimalist,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Traditional => "Traditional mandala",
            Self::ModernGeometric => "Modern geometric",
            Self::FloralOrganic => "Floral and organic",
            Self::Abstract => "Abstract",
            Self::Celestial => "Celestial/cosmic",
            Self::Tribal => "Tribal/ethnic",
            Self::Psychedelic => "Psychedelic",
            Self::Minimalist => "Minimalist",
        }
    }
}

/// Optional elements to weave into the design
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialElement {
    /// Animals or creatures
    Animals,
    /// Plants and flowers
    Plants,
    /// Crystals and gems
    Crystals,
    /// Sacred symbols
    SacredSymbols,
    /// Celestial bodies
    CelestialBodies,
    /// Water elements
    Water,
    /// Fire elements
    Fire,
    /// Geometric patterns
    GeometricPatterns,
}

impl Choice for SpecialElement {
    const ALL: &'static [Self] = &[
        Self::Animals,
        Self::Plants,
        Self::Crystals,
        Self::SacredSymbols,
        Self::CelestialBodies,
        Self::Water,
        Self::Fire,
        Self::GeometricPatterns,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Animals => "Animals or creatures",
            Self::Plants => "Plants and flowers",
            Self::Crystals => "Crystals and gems",
            Self::SacredSymbols => "Sacred symbols",
            Self::CelestialBodies => "Celestial bodies",
            Self::Water => "Water elements",
            Self::Fire => "Fire elements",
            Self::GeometricPatterns => "Geometric patterns",
        }
    }
}

/// Three point scale of visual density, ordered from least to most detailed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Complexity {
    /// Simple and elegant
    #[default]
    Simple,
    /// Moderately detailed
    Moderate,
    /// Highly intricate and complex
    Intricate,
}

impl Choice for Complexity {
    const ALL: &'static [Self] = &[Self::Simple, Self::Moderate, Self::Intricate];

    fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple and elegant",
            Self::Moderate => "Moderately detailed",
            Self::Intricate => "Highly intricate and complex",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })+
    };
}

display_label!(ColorScheme, ArtStyle, SpecialElement, Complexity);

/// Joins the picked elements for display, `None` when nothing was picked.
pub fn elements_text(elements: &[SpecialElement]) -> String {
    if elements.is_empty() {
        return "None".to_string();
    }
    elements
        .iter()
        .map(|element| element.label())
        .collect::<Vec<_>>()
        .join(", ")
}
