//! Chart colors shared by every visualization.

use crate::ports::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub gradient1: &'static str,
    pub gradient2: &'static str,
}

impl Palette {
    pub const SITE: Palette = Palette {
        primary: "#2563eb",
        secondary: "#64748b",
        accent: "#f59e0b",
        success: "#10b981",
        warning: "#f59e0b",
        error: "#ef4444",
        gradient1: "#8b5cf6",
        gradient2: "#06b6d4",
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::SITE
    }
}

/// Append a two-digit hex alpha, e.g. `with_alpha("#2563eb", "20")`.
pub fn with_alpha(color: &str, alpha: &str) -> Color {
    format!("{color}{alpha}")
}
