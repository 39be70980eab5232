use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement,
    Table, TableComponent,
};

/// Builder for consistently styled terminal tables
#[derive(Clone)]
pub struct TableBuilder {
    table: Table,
}

/// Table styling presets
#[derive(Debug, Clone, PartialEq)]
pub enum TableStyle {
    /// Full borders, one row per record
    Grid,
    /// Key/value listing without horizontal separators
    Compact,
}

impl TableBuilder {
    /// Create a new table builder with default styling
    pub fn new() -> Self {
        let mut table = Table::new();

        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);

        Self { table }
    }

    pub fn with_style(style: TableStyle) -> Self {
        let mut builder = Self::new();
        builder.apply_style(style);
        builder
    }

    pub fn apply_style(&mut self, style: TableStyle) -> &mut Self {
        match style {
            TableStyle::Grid => {}
            TableStyle::Compact => {
                self.table
                    .remove_style(TableComponent::HorizontalLines)
                    .remove_style(TableComponent::LeftBorderIntersections)
                    .remove_style(TableComponent::RightBorderIntersections)
                    .remove_style(TableComponent::MiddleIntersections);
            }
        }
        self
    }

    /// Set bold table headers
    pub fn headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header_cells: Vec<Cell> = headers
            .into_iter()
            .map(|h| Cell::new(h.into()).add_attribute(Attribute::Bold))
            .collect();

        self.table.set_header(header_cells);
        self
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row_cells: Vec<Cell> = cells.into_iter().map(|cell| Cell::new(cell.into())).collect();

        self.table.add_row(row_cells);
        self
    }

    /// Key/value row whose value is drawn in the given colour
    pub fn colored_row<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V, color: Color) -> &mut Self {
        self.table.add_row(vec![
            Cell::new(key.into()),
            Cell::new(value.into()).fg(color).add_attribute(Attribute::Bold),
        ]);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.table.row_iter().next().is_none()
    }

    /// Build and return the formatted table as a string
    pub fn build(self) -> String {
        self.table.to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_contains_headers_and_rows() {
        let mut builder = TableBuilder::new();
        builder.headers(vec!["Field", "Value"]);
        builder.row(vec!["age", "45"]);
        assert!(!builder.is_empty());

        let table = builder.build();
        assert!(table.contains("Field"));
        assert!(table.contains("45"));
    }

    #[test]
    fn test_compact_style_builds() {
        let mut builder = TableBuilder::with_style(TableStyle::Compact);
        assert!(builder.is_empty());
        builder.colored_row("Diagnosis", "DIABETIC", Color::Red);
        assert!(builder.build().contains("DIABETIC"));
    }
}
