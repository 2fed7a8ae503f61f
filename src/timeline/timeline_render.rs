//! Plain-text rendering of a packed timeline.

use std::fmt::Write;

use crate::timeline::timeline_layout::RowAssignment;

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
const CELL_WIDTH: usize = 4;
const GUTTER: &str = "        ";

/// Draw each category as a band of rows on a 12-month grid, with event
/// titles listed after the bars of their row.
pub fn render_timeline(layout: &RowAssignment<'_>) -> String {
    let mut out = String::new();
    let header: String = MONTHS.iter().map(|m| format!("{:<width$}", m, width = CELL_WIDTH)).collect();
    let _ = writeln!(out, "{}{}", GUTTER, header.trim_end());

    for (category, rows) in layout.iter() {
        let _ = writeln!(out, "{}", category);
        for (index, row) in rows.iter().enumerate() {
            let mut cells = vec!['.'; 12 * CELL_WIDTH];
            let mut legend = Vec::with_capacity(row.len());
            for event in row {
                match event.month_span() {
                    Some(span) => {
                        let (column, width) = span.grid_columns();
                        let from = column * CELL_WIDTH;
                        let to = (column + width) * CELL_WIDTH;
                        cells[from..to].fill('#');
                        legend.push(event.title.clone());
                    }
                    None => legend.push(format!("{} (no dates)", event.title)),
                }
            }
            let bar: String = cells.into_iter().collect();
            let label = format!("  row {}", index + 1);
            if legend.is_empty() {
                let _ = writeln!(out, "{:<gutter$}{}", label, bar, gutter = GUTTER.len());
            } else {
                let _ = writeln!(out, "{:<gutter$}{}  {}", label, bar, legend.join(", "), gutter = GUTTER.len());
            }
        }
    }
    out
}
