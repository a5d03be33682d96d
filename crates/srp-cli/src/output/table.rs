//! Plain aligned tables for `--format table`.

/// Columns never shrink below this width when fitting the terminal.
const MIN_COLUMN: usize = 6;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render `rows` under `headers`, two spaces between columns.
///
/// Numeric cells are right-aligned. With a `max_width` the widest columns
/// are narrowed first and long cells end in `…`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN])
                .max()
                .unwrap_or(MIN_COLUMN)
        })
        .collect();
    if let Some(max_width) = options.max_width {
        shrink_to(&mut widths, max_width);
    }

    let header_line = join_cells(
        headers
            .iter()
            .zip(&widths)
            .map(|(header, width)| pad(&clip(header, *width), *width, false)),
    );
    let mut lines = vec![header_line.clone(), "-".repeat(header_line.chars().count())];
    for row in rows {
        lines.push(join_cells(widths.iter().enumerate().map(|(index, width)| {
            let cell = clip(row.get(index).map_or("-", String::as_str), *width);
            let numeric = is_numeric(&cell);
            let padded = pad(&cell, *width, numeric);
            if options.color {
                colorize(&cell, padded)
            } else {
                padded
            }
        })));
    }
    lines.join("\n")
}

fn join_cells(cells: impl Iterator<Item = String>) -> String {
    cells.collect::<Vec<_>>().join("  ").trim_end().to_string()
}

/// Narrow the widest column one step at a time until the row fits.
fn shrink_to(widths: &mut [usize], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|width| **width > MIN_COLUMN)
            .max_by_key(|width| **width)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

/// Green/yellow/red for verdicts and activity flags.
fn colorize(cell: &str, padded: String) -> String {
    let code = match cell {
        "FIT_OK" | "true" => "32",
        "FIT_CLOSE" | "NO_DOCTRINE_FIT" => "33",
        "FIT_MISMATCH" | "false" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn aligns_mixed_widths() {
        let rows = vec![
            vec!["dft-1".to_string(), "Tackle".to_string(), "5".to_string()],
            vec!["dft-200".to_string(), "Long Range Kite".to_string(), "12".to_string()],
        ];
        let table = render_table(&["id", "name", "items"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "id       name             items");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "dft-1    Tackle                5");
        assert_eq!(lines[3], "dft-200  Long Range Kite      12");
    }

    #[test]
    fn narrow_terminal_clips_widest_column() {
        let rows = vec![vec!["dft-1".to_string(), "a very long doctrine fit title".to_string()]];
        let table = render_table(
            &["id", "name"],
            &rows,
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.ends_with('…'));
        assert_eq!(row.chars().count(), 20);
    }

    #[test]
    fn verdicts_are_colored() {
        let rows = vec![vec!["FIT_OK".to_string()], vec!["Rifter".to_string()]];
        let table = render_table(
            &["status"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[32mFIT_OK"));
        assert!(table.lines().nth(3).is_some_and(|line| line == "Rifter"));
    }
}
