#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned text table for string rows.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = column_widths(headers, rows);
    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let cells = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let padded = pad(&clip(value, *width), *width);
                if options.color {
                    colorize(padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>();
        lines.push(cells.join("  "));
    }
    lines.join("\n")
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect()
}

/// Narrow the widest shrinkable column one character at a time until the
/// table fits. Columns never go below their header width (or 4).
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    if widths.is_empty() {
        return;
    }
    let separators = (widths.len() - 1) * 2;

    loop {
        let total = widths.iter().sum::<usize>() + separators;
        if total <= max_width {
            return;
        }

        let mut widest: Option<usize> = None;
        for (index, width) in widths.iter().enumerate() {
            let floor = headers[index].chars().count().max(4);
            if *width > floor && widest.is_none_or(|at: usize| *width > widths[at]) {
                widest = Some(index);
            }
        }
        let Some(index) = widest else {
            return;
        };
        widths[index] -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Pad by character count, so colorizing afterwards cannot skew alignment.
fn pad(value: &str, width: usize) -> String {
    let padding = width.saturating_sub(value.chars().count());
    format!("{value}{}", " ".repeat(padding))
}

fn colorize(cell: String) -> String {
    let code = match cell.trim_end() {
        "true" | "authenticated" | "synced" => "32",
        "false" | "expired" | "local" => "33",
        _ => return cell,
    };
    format!("\u{1b}[{code}m{cell}\u{1b}[0m")
}
