pub use kurbo::{Insets, Size};

/// Stable identity of a host element across selections.
///
/// In-flight work (deferred composition, debounced persistence) is tagged with the id so results
/// computed for one element are never applied to another.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "el{}", self.0)
    }
}

/// Clamp an arbitrary opacity-like input into the integer percentage range `[0, 100]`.
///
/// Non-finite input maps to `0`.
pub fn clamp_percent(v: f64) -> u8 {
    if !v.is_finite() {
        return 0;
    }
    v.round().clamp(0.0, 100.0) as u8
}

/// Format a number for markup and style output with at most `decimals` fractional digits and no
/// trailing zeros (`2.0 -> "2"`, `0.50 -> "0.5"`).
pub fn fmt_num(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.decimals$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    };
    if s == "-0" { "0".to_owned() } else { s }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
