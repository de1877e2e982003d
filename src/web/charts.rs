//! SVG chart markup
//!
//! Pure functions turning queried rows into self-contained SVG fragments
//! embedded in the dashboard pages. No scripting, no external assets: the
//! markup is complete when the string is built.

use std::fmt::Write;

/// Fill colors assigned to series/slices in order
const PALETTE: [&str; 6] = [
    "#4e79a7", "#e15759", "#76b7b2", "#f28e2b", "#59a14f", "#b07aa1",
];

const BAR_WIDTH: f64 = 16.0;
const BAR_GAP: f64 = 4.0;
const GROUP_GAP: f64 = 22.0;
const PLOT_HEIGHT: f64 = 240.0;
const TITLE_AREA: f64 = 48.0;
const LABEL_AREA: f64 = 96.0;

/// One named series of a grouped bar chart, aligned with the category list
#[derive(Debug)]
pub struct BarSeries<'a> {
    /// Legend label for the series
    pub label: &'a str,
    /// One value per category; missing entries count as zero
    pub values: &'a [u64],
}

/// Escapes text for embedding in markup (HTML and SVG alike).
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders a grouped bar chart for the given categories and series.
///
/// Bars are scaled against the largest value across all series; an all-zero
/// chart renders its frame and labels with zero-height bars.
pub fn bar_chart(title: &str, categories: &[String], series: &[BarSeries<'_>]) -> String {
    let group_width = series.len() as f64 * (BAR_WIDTH + BAR_GAP) + GROUP_GAP;
    let width = (categories.len() as f64 * group_width + 40.0).max(320.0);
    let height = TITLE_AREA + PLOT_HEIGHT + LABEL_AREA;
    let baseline = TITLE_AREA + PLOT_HEIGHT;

    let max_value = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    );
    let _ = write!(
        svg,
        r#"<text x="{x:.0}" y="20" text-anchor="middle" font-size="16">{title}</text>"#,
        x = width / 2.0,
        title = escape(title),
    );

    // Legend row under the title.
    for (i, s) in series.iter().enumerate() {
        let x = 20.0 + i as f64 * 140.0;
        let color = PALETTE[i % PALETTE.len()];
        let _ = write!(
            svg,
            r#"<rect x="{x:.0}" y="30" width="12" height="12" fill="{color}"/><text x="{tx:.0}" y="40" font-size="12">{label}</text>"#,
            tx = x + 16.0,
            label = escape(s.label),
        );
    }

    let _ = write!(
        svg,
        r##"<line x1="20" y1="{baseline:.0}" x2="{x2:.0}" y2="{baseline:.0}" stroke="#999"/>"##,
        x2 = width - 20.0,
    );

    for (ci, category) in categories.iter().enumerate() {
        let group_x = 20.0 + ci as f64 * group_width;
        for (si, s) in series.iter().enumerate() {
            let value = s.values.get(ci).copied().unwrap_or(0);
            let bar_height = value as f64 / max_value * PLOT_HEIGHT;
            let x = group_x + si as f64 * (BAR_WIDTH + BAR_GAP);
            let y = baseline - bar_height;
            let color = PALETTE[si % PALETTE.len()];
            let _ = write!(
                svg,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{BAR_WIDTH:.0}" height="{h:.1}" fill="{color}"><title>{cat}, {label}: {value}</title></rect>"#,
                h = bar_height,
                cat = escape(category),
                label = escape(s.label),
            );
        }
        let label_x = group_x + (group_width - GROUP_GAP) / 2.0;
        let label_y = baseline + 12.0;
        let _ = write!(
            svg,
            r#"<text x="{label_x:.1}" y="{label_y:.0}" font-size="11" text-anchor="end" transform="rotate(-40 {label_x:.1} {label_y:.0})">{cat}</text>"#,
            cat = escape(category),
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Renders a pie chart for the given labeled values.
///
/// Slices are proportional to each value's share of the total. A zero total
/// renders a placeholder message instead of an empty circle.
pub fn pie_chart(title: &str, slices: &[(String, u64)]) -> String {
    let radius = 110.0;
    let cx = 140.0;
    let cy = TITLE_AREA + radius;
    let legend_x = cx + radius + 30.0;
    let width = legend_x + 220.0;
    let height = (TITLE_AREA + 2.0 * radius + 20.0).max(TITLE_AREA + slices.len() as f64 * 18.0);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    );
    let _ = write!(
        svg,
        r#"<text x="{x:.0}" y="20" text-anchor="middle" font-size="16">{title}</text>"#,
        x = width / 2.0,
        title = escape(title),
    );

    let total: u64 = slices.iter().map(|(_, v)| v).sum();
    if total == 0 {
        let _ = write!(
            svg,
            r##"<text x="{cx:.0}" y="{cy:.0}" text-anchor="middle" font-size="14" fill="#666">No data</text>"##
        );
        svg.push_str("</svg>");
        return svg;
    }

    let mut start_angle = -std::f64::consts::FRAC_PI_2;
    for (i, (label, value)) in slices.iter().enumerate() {
        let fraction = *value as f64 / total as f64;
        let color = PALETTE[i % PALETTE.len()];
        let tooltip = format!(
            "{}: {} ({:.1}%)",
            escape(label),
            value,
            fraction * 100.0
        );

        if fraction > 0.9999 {
            // A single dominant slice degenerates into a full circle; an
            // arc whose endpoints coincide would render nothing.
            let _ = write!(
                svg,
                r#"<circle cx="{cx:.0}" cy="{cy:.0}" r="{radius:.0}" fill="{color}"><title>{tooltip}</title></circle>"#
            );
            start_angle += fraction * std::f64::consts::TAU;
            continue;
        }
        if fraction == 0.0 {
            continue;
        }

        let end_angle = start_angle + fraction * std::f64::consts::TAU;
        let (x1, y1) = (cx + radius * start_angle.cos(), cy + radius * start_angle.sin());
        let (x2, y2) = (cx + radius * end_angle.cos(), cy + radius * end_angle.sin());
        let large_arc = i32::from(fraction > 0.5);
        let _ = write!(
            svg,
            r#"<path d="M {cx:.1} {cy:.1} L {x1:.2} {y1:.2} A {radius:.0} {radius:.0} 0 {large_arc} 1 {x2:.2} {y2:.2} Z" fill="{color}"><title>{tooltip}</title></path>"#
        );
        start_angle = end_angle;
    }

    // Legend column to the right of the pie.
    for (i, (label, value)) in slices.iter().enumerate() {
        let y = TITLE_AREA + i as f64 * 18.0;
        let color = PALETTE[i % PALETTE.len()];
        let _ = write!(
            svg,
            r#"<rect x="{legend_x:.0}" y="{ry:.0}" width="12" height="12" fill="{color}"/><text x="{tx:.0}" y="{ty:.0}" font-size="12">{label}: {value}</text>"#,
            ry = y,
            tx = legend_x + 16.0,
            ty = y + 10.0,
            label = escape(label),
        );
    }

    svg.push_str("</svg>");
    svg
}
