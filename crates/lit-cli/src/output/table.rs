/// Cells wider than this are truncated when no terminal width is known.
const DEFAULT_MAX_CELL: usize = 60;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_cell_width: usize,
}

impl TableOptions {
    /// Read `COLUMNS` when the shell exports it.
    #[must_use]
    pub fn from_env() -> Self {
        let max_cell_width = std::env::var("COLUMNS")
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .map_or(DEFAULT_MAX_CELL, |columns| (columns / 2).max(12));
        Self { max_cell_width }
    }
}

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .min(options.max_cell_width.max(header.len()))
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(header, *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.trim_end().chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                format_cell(&truncated, *width, looks_numeric(&truncated))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.'))
}

fn format_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = width.saturating_sub(value.chars().count());
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}
