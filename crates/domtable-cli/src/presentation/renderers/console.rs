use domtable_engine::{ColumnDef, Row};
use owo_colors::OwoColorize;
use std::fmt;

use crate::presentation::glyphs::{Glyph, LabelColor, cell_glyph, column_header};

const COLUMN_GAP: &str = "  ";

/// Aligned plain-text table; label dots are colored when `color` is set.
pub struct TableView<'a> {
    columns: &'a [ColumnDef],
    rows: Vec<&'a Row>,
    color: bool,
}

impl<'a> TableView<'a> {
    pub fn new(columns: &'a [ColumnDef], rows: impl IntoIterator<Item = &'a Row>) -> Self {
        Self {
            columns,
            rows: rows.into_iter().collect(),
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let header = column_header(column).chars().count();
                self.rows
                    .iter()
                    .filter_map(|row| row.cell(i))
                    .map(|value| cell_glyph(column, value).plain().chars().count())
                    .fold(header, usize::max)
            })
            .collect()
    }

    fn paint(&self, glyph: &Glyph<'_>) -> String {
        if !self.color {
            return glyph.plain().to_string();
        }
        match glyph {
            Glyph::Label(Some(color)) => paint_label(*color, glyph.plain()),
            Glyph::Label(None) | Glyph::Symbol(_) | Glyph::Text(_) => glyph.plain().to_string(),
        }
    }
}

fn paint_label(color: LabelColor, dot: &str) -> String {
    match color {
        LabelColor::Red => dot.red().to_string(),
        LabelColor::Orange => dot.bright_red().to_string(),
        LabelColor::Yellow => dot.yellow().to_string(),
        LabelColor::Green => dot.green().to_string(),
        LabelColor::Gray => dot.bright_black().to_string(),
        LabelColor::Blue => dot.blue().to_string(),
        LabelColor::Purple => dot.magenta().to_string(),
        LabelColor::Black => dot.black().on_white().to_string(),
    }
}

impl fmt::Display for TableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();

        let mut header = String::new();
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                header.push_str(COLUMN_GAP);
            }
            let title = column_header(column);
            let pad = widths[i].saturating_sub(title.chars().count());
            if self.color {
                header.push_str(&title.bold().to_string());
            } else {
                header.push_str(title);
            }
            header.push_str(&" ".repeat(pad));
        }
        writeln!(f, "{}", header.trim_end())?;

        for row in &self.rows {
            let mut line = String::new();
            for (i, column) in self.columns.iter().enumerate() {
                if i > 0 {
                    line.push_str(COLUMN_GAP);
                }
                let glyph = cell_glyph(column, row.cell(i).unwrap_or_default());
                let pad = widths[i].saturating_sub(glyph.plain().chars().count());
                line.push_str(&self.paint(&glyph));
                line.push_str(&" ".repeat(pad));
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domtable_engine::{ColumnRegistry, DomainTable, FilterState};
    use domtable_types::{Domains, Label, PowerState, VmRecord};

    fn table(fields: &[&str]) -> DomainTable {
        let domains = Domains::new(vec![
            VmRecord::new("dom0", "AdminVM", PowerState::Running, Label::new("black")),
            VmRecord::new("work", "AppVM", PowerState::Running, Label::new("blue"))
                .with_netvm("sys-net"),
            VmRecord::new("sys-net", "AppVM", PowerState::Running, Label::new("red")),
            VmRecord::new("vault", "AppVM", PowerState::Halted, Label::new("black")),
        ]);
        let columns = ColumnRegistry::new().resolve_all(fields);
        DomainTable::build(&domains, &columns).unwrap()
    }

    #[test]
    fn test_plain_table_alignment() {
        let table = table(&["name", "class", "state", "netvm"]);
        let filter = FilterState::default();
        let rendered = TableView::new(table.columns(), filter.visible_rows(&table)).to_string();

        insta::assert_snapshot!(rendered, @r"
        NAME     CLASS     NETVM
        work     AppVM  ▶  sys-net
        sys-net  AppVM  ▶  -
        ");
    }

    #[test]
    fn test_icon_columns_render_glyphs() {
        let table = table(&["name", "label", "netvm_label"]);
        let rendered = TableView::new(table.columns(), table.rows()).to_string();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "NAME");
        assert_eq!(lines[1], "work     ●  ●");
        assert_eq!(lines[2], "sys-net  ●  ✕");
        assert_eq!(lines[3], "vault    ●  ✕");
    }

    #[test]
    fn test_color_only_touches_label_dots() {
        let table = table(&["name", "label"]);
        let plain = TableView::new(table.columns(), table.rows()).to_string();
        let colored = TableView::new(table.columns(), table.rows())
            .with_color(true)
            .to_string();

        assert!(!plain.contains('\u{1b}'));
        assert!(colored.contains('\u{1b}'));
        assert!(colored.contains("work"));
    }
}
