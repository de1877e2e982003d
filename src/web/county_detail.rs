//! Per-state county page
//!
//! Lists the counties of one state with the same bar/pie breakdown the
//! index page gives the states. Counties without a reported death count
//! show a dash in the table and contribute zero to the death charts.

use std::fmt::Write;

use crate::db::CountyRow;

use super::charts::{bar_chart, escape, pie_chart, BarSeries};
use super::PAGE_STYLE;

/// Renders the county page for one state.
pub fn render_county_detail(
    state_name: &str,
    state_totals: (u64, u64),
    counties: &[CountyRow],
) -> String {
    let names: Vec<String> = counties.iter().map(|c| c.name.clone()).collect();
    let confirmed: Vec<u64> = counties.iter().map(|c| c.total_confirmed).collect();
    let deaths: Vec<u64> = counties
        .iter()
        .map(|c| c.total_deaths.unwrap_or(0))
        .collect();

    let bar = bar_chart(
        "Confirmed Cases and Deaths by County",
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

    let (state_confirmed, state_deaths) = state_totals;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    let _ = write!(html, "<title>{} - COVID-19 Dashboard</title>", escape(state_name));
    let _ = write!(html, "<style>{PAGE_STYLE}</style></head><body>");
    let _ = write!(html, "<h1>{}</h1>", escape(state_name));
    let _ = write!(
        html,
        "<p class=\"totals\"><strong>{state_confirmed}</strong> confirmed cases, <strong>{state_deaths}</strong> deaths statewide</p>",
    );
    html.push_str("<p><a href=\"/\">&larr; All states</a></p>");

    html.push_str("<h2>Counties</h2>");
    if counties.is_empty() {
        html.push_str("<p>No county-level data for this state.</p>");
    } else {
        html.push_str(
            "<table><thead><tr><th>County</th><th>Confirmed</th><th>Deaths</th></tr></thead><tbody>",
        );
        for county in counties {
            let deaths_cell = match county.total_deaths {
                Some(deaths) => deaths.to_string(),
                None => "&mdash;".to_string(),
            };
            let _ = write!(
                html,
                "<tr><td>{name}</td><td>{confirmed}</td><td>{deaths_cell}</td></tr>",
                name = escape(&county.name),
                confirmed = county.total_confirmed,
            );
        }
        html.push_str("</tbody></table>");
        let _ = write!(html, "{bar}{cases_pie}{deaths_pie}");
    }

    html.push_str("</body></html>");
    html
}
