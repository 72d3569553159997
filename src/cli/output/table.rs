//! Table output for retrieved sources using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use super::{truncate, SourceOutput};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<usize>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<usize>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format retrieved sources, closest first
    pub fn format_sources(&self, sources: &[SourceOutput]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Distance").add_attribute(Attribute::Bold),
            Cell::new("Preview").add_attribute(Attribute::Bold),
        ]);

        for (rank, source) in sources.iter().enumerate() {
            let label = source.title.as_deref().unwrap_or(&source.source);
            let distance = format!("{:.4}", source.distance);
            let distance_cell = if self.use_colors {
                Cell::new(distance).fg(Color::Cyan)
            } else {
                Cell::new(distance)
            };

            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(format!("{}\n{}", truncate(label, 60), source.source)),
                distance_cell,
                Cell::new(source.preview.replace('\n', " ")),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width as u16);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
