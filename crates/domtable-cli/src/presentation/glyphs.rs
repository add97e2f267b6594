//! Icon identifiers to terminal glyphs.
//!
//! The engine emits freedesktop-style icon names (`media-playback-start`,
//! `appvm-red`, ...). Terminals get a single glyph instead; label icons keep
//! their color so both renderers can paint them.

use domtable_engine::{CellKind, ColumnDef};

const LABEL_PREFIX: &str = "appvm-";
pub const LABEL_DOT: &str = "●";

/// Qubes label colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColor {
    Red,
    Orange,
    Yellow,
    Green,
    Gray,
    Blue,
    Purple,
    Black,
}

impl LabelColor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "red" => Some(LabelColor::Red),
            "orange" => Some(LabelColor::Orange),
            "yellow" => Some(LabelColor::Yellow),
            "green" => Some(LabelColor::Green),
            "gray" | "grey" => Some(LabelColor::Gray),
            "blue" => Some(LabelColor::Blue),
            "purple" => Some(LabelColor::Purple),
            "black" => Some(LabelColor::Black),
            _ => None,
        }
    }
}

/// How one cell should be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glyph<'a> {
    Symbol(&'static str),
    /// Label dot; color is `None` for label names outside the standard palette
    Label(Option<LabelColor>),
    Text(&'a str),
}

impl Glyph<'_> {
    /// Uncolored rendering, also used for width computation
    pub fn plain(&self) -> &str {
        match self {
            Glyph::Symbol(symbol) => symbol,
            Glyph::Label(_) => LABEL_DOT,
            Glyph::Text(text) => text,
        }
    }
}

/// Glyph for a known icon identifier
pub fn icon_glyph(icon: &str) -> Option<Glyph<'static>> {
    match icon {
        "media-playback-start" => Some(Glyph::Symbol("▶")),
        "system-run" => Some(Glyph::Symbol("⚙")),
        "media-playback-stop" => Some(Glyph::Symbol("■")),
        "process-stop" => Some(Glyph::Symbol("✕")),
        _ => icon
            .strip_prefix(LABEL_PREFIX)
            .map(|color| Glyph::Label(LabelColor::from_name(color))),
    }
}

/// Glyph for a cell of `column`; unknown icons fall back to their text
pub fn cell_glyph<'a>(column: &ColumnDef, value: &'a str) -> Glyph<'a> {
    match column.cell_kind() {
        CellKind::Icon => icon_glyph(value).unwrap_or(Glyph::Text(value)),
        CellKind::Text => Glyph::Text(value),
    }
}

/// Icon columns are drawn without a header
pub fn column_header(column: &ColumnDef) -> &str {
    match column.cell_kind() {
        CellKind::Icon => "",
        CellKind::Text => column.header(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domtable_engine::ColumnRegistry;

    #[test]
    fn test_state_and_netvm_icons() {
        assert_eq!(icon_glyph("media-playback-start"), Some(Glyph::Symbol("▶")));
        assert_eq!(icon_glyph("system-run"), Some(Glyph::Symbol("⚙")));
        assert_eq!(icon_glyph("media-playback-stop"), Some(Glyph::Symbol("■")));
        assert_eq!(icon_glyph("process-stop"), Some(Glyph::Symbol("✕")));
        assert_eq!(icon_glyph("network-idle"), None);
    }

    #[test]
    fn test_label_icons_keep_color() {
        assert_eq!(
            icon_glyph("appvm-purple"),
            Some(Glyph::Label(Some(LabelColor::Purple)))
        );
        assert_eq!(icon_glyph("appvm-teal"), Some(Glyph::Label(None)));
        assert_eq!(Glyph::Label(None).plain(), LABEL_DOT);
    }

    #[test]
    fn test_icon_columns_have_blank_headers() {
        let mut registry = ColumnRegistry::new();
        let columns = registry.resolve_all(["state", "label", "netvm_label", "name"]);
        let headers: Vec<_> = columns.iter().map(column_header).collect();
        assert_eq!(headers, vec!["", "", "", "NAME"]);

        assert_eq!(cell_glyph(&columns[3], "system-run"), Glyph::Text("system-run"));
        assert_eq!(cell_glyph(&columns[0], "weird"), Glyph::Text("weird"));
    }
}
