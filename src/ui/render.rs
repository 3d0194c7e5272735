//! Render outcomes as terminal text
//!
//! Widgets are drawn into an off-screen ratatui `Buffer` sized to the
//! content, then flattened to lines. With color on, cell colors are
//! re-applied with crossterm escape sequences.

use crate::chart::{coolwarm, Chart, Heatmap, Histogram, LineChart};
use crate::command::{Level, Outcome, ParamKind, ParamRequest};
use crate::core::config::AssistantConfig;
use crate::table::{ColumnStats, MissingCount, StatsSummary, Table};
use crate::ui::state::SessionLog;
use crossterm::style::{Color as TermColor, Stylize};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{
    Axis, BarChart, Block, Borders, Cell as TuiCell, Chart as TuiChart, Dataset, GraphType, Row,
    Table as TuiTable, Widget,
};

/// Rendering limits and switches
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub max_rows: usize,
    pub max_cell_width: usize,
    pub chart_width: u16,
    pub chart_height: u16,
    pub color: bool,
}

impl RenderOptions {
    pub fn from_config(config: &AssistantConfig, color: bool) -> Self {
        Self {
            max_rows: config.max_display_rows,
            max_cell_width: config.max_cell_width,
            chart_width: config.chart_width,
            chart_height: config.chart_height,
            color,
        }
    }
}

/// Banner styles for status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Success,
    Info,
    Warning,
    Error,
}

impl From<Level> for Banner {
    fn from(level: Level) -> Self {
        match level {
            Level::Info => Banner::Info,
            Level::Warning => Banner::Warning,
            Level::Error => Banner::Error,
        }
    }
}

/// One status line, colored when requested
pub fn banner(kind: Banner, message: &str, color: bool) -> String {
    let tag = match kind {
        Banner::Success => "[ok]",
        Banner::Info => "[info]",
        Banner::Warning => "[warn]",
        Banner::Error => "[error]",
    };
    let line = format!("{} {}", tag, message);
    if !color {
        return line;
    }
    match kind {
        Banner::Success => line.green().to_string(),
        Banner::Info => line.cyan().to_string(),
        Banner::Warning => line.yellow().to_string(),
        Banner::Error => line.red().bold().to_string(),
    }
}

/// Lines for any outcome
pub fn render_outcome(outcome: &Outcome, opts: &RenderOptions) -> Vec<String> {
    match outcome {
        Outcome::Columns(names) => render_columns(names, opts),
        Outcome::Statistics(summary) => render_statistics(summary, opts),
        Outcome::Missing(counts) => render_missing(counts, opts),
        Outcome::Rows(table) => render_rows(table, opts),
        Outcome::Chart(Chart::Line(line)) => render_line(line, opts),
        Outcome::Chart(Chart::Histogram(hist)) => render_histogram(hist, opts),
        Outcome::Chart(Chart::Heatmap(heatmap)) => render_heatmap(heatmap, opts),
        Outcome::NeedsInput(requests) => render_requests(requests),
        Outcome::Diagnostic(diag) => vec![banner(diag.level.into(), &diag.message, opts.color)],
    }
}

pub fn render_history(log: &SessionLog) -> Vec<String> {
    if log.is_empty() {
        return vec!["No commands yet.".to_string()];
    }
    log.entries()
        .map(|e| format!("{:>3}  {:<20} {:<22} {}", e.sequence, e.intent.name(), e.command, e.summary))
        .collect()
}

fn render_columns(names: &[String], opts: &RenderOptions) -> Vec<String> {
    let rows = names
        .iter()
        .enumerate()
        .map(|(i, n)| vec![i.to_string(), n.clone()])
        .collect();
    grid("Columns", vec!["#".into(), "column".into()], rows, Vec::new(), opts)
}

fn render_statistics(summary: &StatsSummary, opts: &RenderOptions) -> Vec<String> {
    let mut header = vec![String::new()];
    header.extend(summary.columns.iter().map(|c| match c {
        ColumnStats::Numeric(s) => s.column.clone(),
        ColumnStats::Text(s) => s.column.clone(),
    }));

    let numeric = matches!(summary.columns.first(), Some(ColumnStats::Numeric(_)));
    let labels: &[&str] = if numeric {
        &["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
    } else {
        &["count", "unique", "top", "freq"]
    };

    let rows = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![label.to_string()];
            row.extend(summary.columns.iter().map(|c| stat_cell(c, i)));
            row
        })
        .collect();

    grid("Summary Statistics", header, rows, Vec::new(), opts)
}

fn stat_cell(stats: &ColumnStats, row: usize) -> String {
    match stats {
        ColumnStats::Numeric(s) => {
            if row == 0 {
                return s.count.to_string();
            }
            let v = [s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max][row - 1];
            format_number(v)
        }
        ColumnStats::Text(s) => match row {
            0 => s.count.to_string(),
            1 => s.unique.to_string(),
            2 => s.top.clone().unwrap_or_else(|| "nan".into()),
            _ => s.freq.to_string(),
        },
    }
}

fn render_missing(counts: &[MissingCount], opts: &RenderOptions) -> Vec<String> {
    let rows = counts
        .iter()
        .map(|m| vec![m.column.clone(), m.missing.to_string()])
        .collect();
    grid("Missing Values", vec!["column".into(), "missing".into()], rows, Vec::new(), opts)
}

fn render_rows(table: &Table, opts: &RenderOptions) -> Vec<String> {
    let shown = table.row_count().min(opts.max_rows);
    let mut header = vec![String::new()];
    header.extend(table.column_names());

    let rows = (0..shown)
        .map(|i| {
            let mut row = vec![i.to_string()];
            row.extend(table.row(i).iter().map(|v| v.text_form()));
            row
        })
        .collect();

    let mut lines = grid("", header, rows, Vec::new(), opts);
    if shown < table.row_count() {
        lines.push(format!("... {} more rows", table.row_count() - shown));
    }
    lines.push(format!("[{} rows x {} columns]", table.row_count(), table.column_count()));
    lines
}

fn render_line(line: &LineChart, opts: &RenderOptions) -> Vec<String> {
    let points: Vec<(f64, f64)> = line
        .points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let (x_min, x_max) = span_of(points.iter().map(|p| p.0));
    let (y_min, y_max) = span_of(points.iter().map(|p| p.1));

    let x_labels = match &line.categories {
        Some(names) => vec![
            Span::raw(names.first().cloned().unwrap_or_default()),
            Span::raw(names.last().cloned().unwrap_or_default()),
        ],
        None => axis_labels(x_min, x_max),
    };

    let dataset = Dataset::default()
        .name(line.y_label.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = TuiChart::new(vec![dataset])
        .block(Block::default().title("Line Chart").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(line.x_label.clone())
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(line.y_label.clone())
                .bounds([y_min, y_max])
                .labels(axis_labels(y_min, y_max)),
        );

    draw(chart, opts.chart_width, opts.chart_height, opts.color)
}

fn render_histogram(hist: &Histogram, opts: &RenderOptions) -> Vec<String> {
    let bins = hist.counts.len().max(1) as u16;
    let inner = opts.chart_width.saturating_sub(2);
    let bar_width = (inner / bins).saturating_sub(1).max(1);

    let data: Vec<(&str, u64)> = hist.counts.iter().map(|&c| ("", c)).collect();
    let chart = BarChart::default()
        .block(Block::default().title(format!("Histogram of {}", hist.column)).borders(Borders::ALL))
        .data(data.as_slice())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().add_modifier(Modifier::BOLD));

    let mut lines = draw(chart, opts.chart_width, opts.chart_height, opts.color);
    let first = hist.edges.first().copied().unwrap_or(f64::NAN);
    let last = hist.edges.last().copied().unwrap_or(f64::NAN);
    lines.push(format!(
        " {} .. {}  ({} bins)",
        format_number(first),
        format_number(last),
        hist.counts.len()
    ));
    lines
}

fn render_heatmap(heatmap: &Heatmap, opts: &RenderOptions) -> Vec<String> {
    let labels = &heatmap.matrix.labels;
    let mut header = vec![String::new()];
    header.extend(labels.iter().cloned());

    let rows: Vec<Vec<String>> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![label.clone()];
            row.extend((0..labels.len()).map(|j| heatmap.annotation(i, j)));
            row
        })
        .collect();

    let styles = heatmap
        .matrix
        .values
        .iter()
        .map(|row| {
            let mut styles = vec![Style::default()];
            styles.extend(row.iter().map(|&v| {
                let (r, g, b) = coolwarm(v);
                Style::default().bg(Color::Rgb(r, g, b)).fg(Color::Rgb(0, 0, 0))
            }));
            styles
        })
        .collect();

    grid("Correlation Heatmap", header, rows, styles, opts)
}

fn render_requests(requests: &[ParamRequest]) -> Vec<String> {
    let mut lines = vec!["More input needed:".to_string()];
    for req in requests {
        let detail = match &req.kind {
            ParamKind::Column { choices } | ParamKind::Operator { choices } => {
                format!("one of: {}", choices.join(", "))
            }
            ParamKind::Text => "text".to_string(),
            ParamKind::Flag { default } => format!("yes/no, default {}", if *default { "yes" } else { "no" }),
        };
        lines.push(format!("  {} - {} ({})", req.key, req.prompt, detail));
    }
    lines
}

/// Bordered table sized to its content; `styles[r][c]` overrides body cells
fn grid(
    title: &str,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    styles: Vec<Vec<Style>>,
    opts: &RenderOptions,
) -> Vec<String> {
    let clip = |s: &str| truncate(s, opts.max_cell_width);
    let header: Vec<String> = header.iter().map(|h| clip(h)).collect();
    let rows: Vec<Vec<String>> = rows.iter().map(|r| r.iter().map(|c| clip(c)).collect()).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let widths: Vec<usize> = widths.into_iter().map(|w| w.max(1)).collect();

    let total_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) + 2;
    let total_width = total_width.max(title.chars().count() + 2);
    let height = rows.len() + 3;

    let body = rows.into_iter().enumerate().map(|(r, row)| {
        let cells: Vec<TuiCell> = row
            .into_iter()
            .enumerate()
            .map(|(c, text)| {
                let style = styles.get(r).and_then(|s| s.get(c)).copied().unwrap_or_default();
                TuiCell::from(text).style(style)
            })
            .collect();
        Row::new(cells)
    });

    let constraints: Vec<Constraint> = widths.iter().map(|&w| Constraint::Length(w as u16)).collect();
    let mut block = Block::default().borders(Borders::ALL);
    if !title.is_empty() {
        block = block.title(title.to_string());
    }
    let widget = TuiTable::new(body, constraints)
        .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .column_spacing(1)
        .block(block);

    draw(widget, clamp_u16(total_width), clamp_u16(height), opts.color)
}

/// Render a widget into a fresh buffer and flatten it to lines
fn draw<W: Widget>(widget: W, width: u16, height: u16, color: bool) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_lines(&buf, color)
}

/// Flatten a buffer to text lines, optionally with ANSI colors
pub fn buffer_lines(buf: &Buffer, color: bool) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::new();
            for x in area.left()..area.right() {
                let cell = buf.get(x, y);
                let symbol = cell.symbol();
                match (color, term_color(cell.fg), term_color(cell.bg)) {
                    (true, Some(fg), Some(bg)) => line.push_str(&symbol.with(fg).on(bg).to_string()),
                    (true, Some(fg), None) => line.push_str(&symbol.with(fg).to_string()),
                    (true, None, Some(bg)) => line.push_str(&symbol.on(bg).to_string()),
                    _ => line.push_str(symbol),
                }
            }
            if color {
                line
            } else {
                line.trim_end().to_string()
            }
        })
        .collect()
}

fn term_color(color: Color) -> Option<TermColor> {
    match color {
        Color::Rgb(r, g, b) => Some(TermColor::Rgb { r, g, b }),
        Color::Cyan => Some(TermColor::DarkCyan),
        Color::Yellow => Some(TermColor::DarkYellow),
        Color::Red => Some(TermColor::DarkRed),
        Color::Green => Some(TermColor::DarkGreen),
        _ => None,
    }
}

fn axis_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    vec![
        Span::raw(format_number(lo)),
        Span::raw(format_number((lo + hi) / 2.0)),
        Span::raw(format_number(hi)),
    ]
}

fn span_of(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.filter(|v| v.is_finite()).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// Up to six decimals, trailing zeros dropped ("37.2", "1", "NaN")
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    let s = format!("{:.6}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max || max < 2 {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

fn clamp_u16(n: usize) -> u16 {
    n.min(u16::MAX as usize) as u16
}
