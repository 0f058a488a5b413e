// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal padded-table renderer for `z3 status` and `z3 gc`.

/// Renders `headers` plus `rows` as a left-padded, space-separated
/// table: each column is as wide as its widest cell (header included),
/// with two spaces between columns. No box-drawing, matching the
/// teacher's preference for plain, greppable CLI tables over a heavier
/// terminal-table crate.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.len());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&render_row(headers.iter().map(|h| h.to_string()).collect::<Vec<_>>().as_slice(), &widths));
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row, &widths));
        out.push('\n');
    }
    out
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| format!("{:width$}", cell, width = widths.get(i).copied().unwrap_or(cell.len())))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_columns_to_widest_cell() {
        let headers = ["NAME", "SIZE"];
        let rows = vec![
            vec!["tank@snap_1".to_string(), "5.00M".to_string()],
            vec!["tank@s".to_string(), "1B".to_string()],
        ];
        let rendered = render(&headers, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "NAME         SIZE");
        assert_eq!(lines[1], "tank@snap_1  5.00M");
        assert_eq!(lines[2], "tank@s       1B");
    }

    #[test]
    fn empty_rows_render_just_the_header() {
        let rendered = render(&["A", "B"], &[]);
        assert_eq!(rendered, "A  B\n");
    }
}
