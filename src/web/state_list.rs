//! Dashboard index page
//!
//! Lists every imported state with aggregate charts, the latest health
//! headlines, and the nationwide totals read back from the statistics cache.

use std::fmt::Write;

use crate::data::{Headline, NationalSummary};
use crate::db::StateRow;

use super::charts::{bar_chart, escape, pie_chart, BarSeries};
use super::PAGE_STYLE;

/// Percent-encodes a path segment so state names with spaces or other
/// reserved characters survive being placed in an href.
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

/// Renders the index page from the queried state rows.
pub fn render_state_list(
    national: Option<&NationalSummary>,
    headlines: &[Headline],
    states: &[StateRow],
) -> String {
    let names: Vec<String> = states.iter().map(|s| s.name.clone()).collect();
    let confirmed: Vec<u64> = states.iter().map(|s| s.total_confirmed).collect();
    let deaths: Vec<u64> = states.iter().map(|s| s.total_deaths).collect();

    let bar = bar_chart(
        "Confirmed Cases and Deaths by State",
        &names,
        &[
            BarSeries { label: "Confirmed Cases", values: &confirmed },
            BarSeries { label: "Confirmed Deaths", values: &deaths },
        ],
    );
    let cases_pie = pie_chart(
        "Share of Confirmed Cases",
        &names
            .iter()
            .cloned()
            .zip(confirmed.iter().copied())
            .collect::<Vec<_>>(),
    );
    let deaths_pie = pie_chart(
        "Share of Confirmed Deaths",
        &names
            .iter()
            .cloned()
            .zip(deaths.iter().copied())
            .collect::<Vec<_>>(),
    );

    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>COVID-19 Dashboard</title>");
    let _ = write!(html, "<style>{PAGE_STYLE}</style></head><body>");
    html.push_str("<h1>COVID-19 in the United States</h1>");

    match national {
        Some(summary) => {
            let _ = write!(
                html,
                "<p class=\"totals\">United States: <strong>{}</strong> confirmed cases, <strong>{}</strong> deaths</p>",
                summary.total_confirmed, summary.total_deaths
            );
        }
        None => {
            html.push_str(
                "<p class=\"totals\">National totals unavailable, run an import first.</p>",
            );
        }
    }

    if !headlines.is_empty() {
        html.push_str("<h2>Health Headlines</h2><ul class=\"headlines\">");
        for headline in headlines {
            let _ = write!(
                html,
                "<li><a href=\"{url}\">{title}</a></li>",
                url = escape(&headline.url),
                title = escape(&headline.title),
            );
        }
        html.push_str("</ul>");
    }

    html.push_str("<h2>States</h2>");
    html.push_str(
        "<table><thead><tr><th>State</th><th>Confirmed</th><th>Deaths</th></tr></thead><tbody>",
    );
    for state in states {
        let _ = write!(
            html,
            "<tr><td><a href=\"/{href}\">{name}</a></td><td>{confirmed}</td><td>{deaths}</td></tr>",
            href = encode_path_segment(&state.name),
            name = escape(&state.name),
            confirmed = state.total_confirmed,
            deaths = state.total_deaths,
        );
    }
    html.push_str("</tbody></table>");

    let _ = write!(html, "{bar}{cases_pie}{deaths_pie}");
    html.push_str("</body></html>");
    html
}
