//! Common test fixtures for surface rendering tests.

/// Small palettes as `#rrggbb` strings.
pub mod palettes {
    /// Five well-separated colors, dark to bright.
    pub const FIVE_STEP: [&str; 5] = ["#30123b", "#4686fb", "#1be5b5", "#fb8022", "#7a0403"];

    /// Black to white in three steps.
    pub const GREYS_3: [&str; 3] = ["#000000", "#808080", "#ffffff"];

    /// A single-entry palette.
    pub const SINGLE: [&str; 1] = ["#ff0000"];
}

/// Canvas sizes used across renderer tests.
pub mod canvas {
    /// Small square canvas that keeps pixel tests fast.
    pub const SMALL: (u32, u32) = (64, 64);

    /// Non-square canvas for scale tests.
    pub const WIDE: (u32, u32) = (320, 200);

    /// The widget default.
    pub const DEFAULT: (u32, u32) = (800, 800);
}

/// Background used by the widget by default.
pub const DARK_BACKGROUND: &str = "#0a0a0a";
