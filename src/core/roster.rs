//! Roster link discovery and team page extraction.
//!
//! Parsing is kept in synchronous functions that take the raw document, so the
//! non-`Send` HTML tree never lives across an `.await`.

use crate::domain::model::{League, RosterRow, RosterTable, TeamRoster};
use crate::domain::ports::Fetcher;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::ProcessingError {
        message: format!("invalid selector '{}': {}", css, e),
    })
}

/// Collapse whitespace inside a cell the same way the roster pages render it.
/// Adjacent text nodes are joined without a separator.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hyperlink targets on a league's teams page that point at a team roster.
/// Document order, first occurrence wins.
pub fn find_roster_links(html: &str, league: League) -> Result<Vec<String>> {
    let pattern = Regex::new(&format!(
        r"/.*{}/team/roster/_/.*",
        regex::escape(league.as_str())
    ))
    .map_err(|e| EtlError::ProcessingError {
        message: format!("invalid roster link pattern: {}", e),
    })?;
    let anchors = selector("a[href]")?;

    let document = Html::parse_document(html);
    let mut links: Vec<String> = Vec::new();
    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if pattern.is_match(href) && !links.iter().any(|seen| seen == href) {
            links.push(href.to_string());
        }
    }
    Ok(links)
}

pub async fn discover_roster_links<F: Fetcher + ?Sized>(
    fetcher: &F,
    league: League,
) -> Result<Vec<String>> {
    let locator = league.teams_locator();
    tracing::debug!("Discovering {} rosters from {}", league, locator);

    let html = fetcher.fetch(&locator).await?;
    let links = find_roster_links(&html, league)?;

    if links.is_empty() {
        tracing::warn!("No roster links found for {}", league);
    } else {
        tracing::info!("🔗 Found {} {} roster links", links.len(), league);
    }
    Ok(links)
}

const MAX_COLSPAN: usize = 1000;
const MAX_ROWSPAN: usize = 65534;

fn span(cell: ElementRef<'_>, attr: &str, max: usize) -> usize {
    cell.value()
        .attr(attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map_or(1, |n| n.min(max))
}

/// Lay one row out column by column. A `colspan` cell fills every column it
/// covers, and columns still covered by an earlier `rowspan` take that
/// cell's text before any new cell is placed.
fn spread_row(
    tr: ElementRef<'_>,
    cells: &Selector,
    carried: &mut Vec<Option<(String, usize)>>,
) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    let mut pending = tr.select(cells);

    loop {
        let column = values.len();
        if let Some(slot) = carried.get_mut(column) {
            if let Some((text, rows_left)) = slot.take() {
                if rows_left > 1 {
                    *slot = Some((text.clone(), rows_left - 1));
                }
                values.push(text);
                continue;
            }
        }

        let Some(cell) = pending.next() else {
            if carried.iter().skip(column).any(Option::is_some) {
                values.push(String::new());
                continue;
            }
            break;
        };

        let text = cell_text(cell);
        let rowspan = span(cell, "rowspan", MAX_ROWSPAN);
        for _ in 0..span(cell, "colspan", MAX_COLSPAN) {
            if rowspan > 1 {
                let column = values.len();
                if carried.len() <= column {
                    carried.resize(column + 1, None);
                }
                carried[column] = Some((text.clone(), rowspan - 1));
            }
            values.push(text.clone());
        }
    }

    values
}

/// Every `<table>` in the document as header-keyed rows.
///
/// Headers come from the first row holding `<th>` cells. Rows holding at
/// least one `<td>` are data rows. Spanned cells are repeated into each
/// column they cover; cells beyond the header width are dropped and missing
/// trailing cells are simply absent from the row.
pub fn extract_tables(html: &str) -> Result<Vec<RosterTable>> {
    let tables = selector("table")?;
    let rows = selector("tr")?;
    let header_cells = selector("th")?;
    let data_marker = selector("td")?;
    let any_cell = selector("th, td")?;

    let document = Html::parse_document(html);
    let mut out = Vec::new();

    for table in document.select(&tables) {
        let mut headers: Vec<String> = Vec::new();
        let mut roster_rows = Vec::new();
        let mut carried = Vec::new();

        for tr in table.select(&rows) {
            if tr.select(&data_marker).next().is_some() {
                let cells = headers
                    .iter()
                    .cloned()
                    .zip(spread_row(tr, &any_cell, &mut carried))
                    .collect();
                roster_rows.push(RosterRow { cells });
            } else if headers.is_empty() {
                headers = spread_row(tr, &header_cells, &mut Vec::new());
            }
        }

        out.push(RosterTable {
            headers,
            rows: roster_rows,
        });
    }

    Ok(out)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `".../name/lar/los-angeles-rams"` -> `"Los Angeles Rams"`.
pub fn format_team_name(locator: &str) -> String {
    let path = locator.split(['?', '#']).next().unwrap_or_default();
    let segment = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    segment
        .replace('-', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn extract_team<F: Fetcher + ?Sized>(fetcher: &F, locator: &str) -> Result<TeamRoster> {
    let team_name = format_team_name(locator);
    tracing::debug!("Extracting roster for {} from {}", team_name, locator);

    let html = fetcher.fetch(locator).await?;
    let tables = extract_tables(&html)?;
    tracing::debug!("{}: {} tables", team_name, tables.len());

    Ok(TeamRoster {
        locator: locator.to_string(),
        team_name,
        tables,
    })
}
