//! Built-in named palettes.
//!
//! Each palette is a 256-entry ramp interpolated from a short list of
//! control stops. Ramps are computed once on first use and cached.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use surface_common::Color;
use tracing::warn;

use crate::colormap::Palette;

/// Palette used when none is requested or the requested one is unknown.
pub const DEFAULT_PALETTE: &str = "Turbo256";

/// Number of entries in every built-in ramp.
pub const RAMP_SIZE: usize = 256;

/// Source of named palettes.
pub trait PaletteRegistry {
    /// Palette by name, or `None` if the registry does not know it.
    fn get(&self, name: &str) -> Option<Palette>;

    /// Names this registry can resolve.
    fn names(&self) -> Vec<String>;
}

const TURBO: &[&str] = &[
    "#30123b", "#4145ab", "#4675ed", "#39a2fc", "#1bcfd4", "#24eca6", "#61fc6c", "#a4fc3b",
    "#d1e834", "#f3c63a", "#fe9b2d", "#f36315", "#d93806", "#b11901", "#7a0403",
];

const VIRIDIS: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

const CIVIDIS: &[&str] = &[
    "#00224e", "#123570", "#3b496c", "#575d6d", "#707173", "#8a8678", "#a59c74", "#c3b369",
    "#e1cc55", "#fee838",
];

const GIST_EARTH: &[&str] = &[
    "#000000", "#0d2a73", "#1f5f8b", "#2f8a7c", "#48a060", "#7cb04e", "#a9b651", "#c2a95d",
    "#d5a98b", "#fdfbfb",
];

const TERRAIN: &[&str] = &[
    "#333399", "#0294fa", "#00cc66", "#99e600", "#fefe98", "#ccbe7d", "#997c5b", "#b8a19d",
    "#ffffff",
];

const COOL: &[&str] = &["#00ffff", "#ff00ff"];

const BWR: &[&str] = &["#0000ff", "#ffffff", "#ff0000"];

const GREYS: &[&str] = &["#000000", "#ffffff"];

/// Canonical name and control stops of every built-in palette.
const BUILTIN_STOPS: &[(&str, &[&str])] = &[
    ("Turbo256", TURBO),
    ("Viridis256", VIRIDIS),
    ("viridis", VIRIDIS),
    ("cividis", CIVIDIS),
    ("gist_earth", GIST_EARTH),
    ("terrain", TERRAIN),
    ("cool", COOL),
    ("bwr", BWR),
    ("Greys256", GREYS),
];

/// Built ramps keyed by lowercase name.
static BUILTIN_CACHE: Lazy<HashMap<String, Palette>> = Lazy::new(|| {
    let mut cache = HashMap::with_capacity(BUILTIN_STOPS.len());
    for (name, hex) in BUILTIN_STOPS {
        let stops: Vec<Color> = hex.iter().filter_map(|h| Color::from_hex(h)).collect();
        match Palette::from_stops(*name, &stops, RAMP_SIZE) {
            Ok(palette) => {
                cache.insert(name.to_lowercase(), palette);
            }
            Err(e) => warn!(palette = name, error = %e, "Skipping malformed built-in palette"),
        }
    }
    cache
});

/// Registry of the compiled-in palettes. Lookup ignores case.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPalettes;

impl PaletteRegistry for BuiltinPalettes {
    fn get(&self, name: &str) -> Option<Palette> {
        BUILTIN_CACHE.get(&name.to_lowercase()).cloned()
    }

    fn names(&self) -> Vec<String> {
        BUILTIN_STOPS.iter().map(|(n, _)| n.to_string()).collect()
    }
}

/// Resolve `name` in `registry`, falling back to [`DEFAULT_PALETTE`].
///
/// Returns `None` only when the registry knows neither the requested name nor
/// the default.
pub fn resolve_in<R: PaletteRegistry + ?Sized>(registry: &R, name: &str) -> Option<Palette> {
    if let Some(palette) = registry.get(name) {
        return Some(palette);
    }
    warn!(palette = name, fallback = DEFAULT_PALETTE, "Unknown palette, using default");
    registry.get(DEFAULT_PALETTE)
}

/// Resolve a built-in palette by name, falling back to the default.
pub fn resolve_palette(name: &str) -> Palette {
    resolve_in(&BuiltinPalettes, name).unwrap_or_else(Palette::greyscale)
}
