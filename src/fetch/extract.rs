// src/fetch/extract.rs

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::normalize::RawMatrix;

/// What counts as "the widget has rendered something" inside its region.
const POPULATED: &str = "table, tbody tr, .fixtures, .results";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e:?}"))
}

fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

fn rows_of(scope: ElementRef<'_>, rows: &Selector, cells: &Selector) -> RawMatrix {
    scope
        .select(rows)
        .map(|row| row.select(cells).map(cell_text).collect())
        .collect()
}

/// Pull the cell matrix out of the widget region `region` in `html`.
///
/// `Ok(None)` when the region is missing or holds nothing table-like yet.
/// With a `<table>` in the region its `tr` rows and `th`/`td` cells are used;
/// otherwise `tr`/`.row`/`li` rows with `td`/`th`/`div`/`span` cells.
pub fn extract_matrix(html: &str, region: &str) -> Result<Option<RawMatrix>> {
    let region_sel = selector(region)?;
    let populated = selector(POPULATED)?;
    let doc = Html::parse_document(html);

    let Some(region_el) = doc.select(&region_sel).next() else {
        debug!(region, "widget region not found");
        return Ok(None);
    };
    if region_el.select(&populated).next().is_none() {
        debug!(region, "widget region present but empty");
        return Ok(None);
    }

    let table_sel = selector("table")?;
    let matrix = match region_el.select(&table_sel).next() {
        Some(table) => rows_of(table, &selector("tr")?, &selector("th, td")?),
        None => rows_of(
            region_el,
            &selector("tr, .row, li")?,
            &selector("td, th, div, span")?,
        ),
    };
    trace!(rows = matrix.len(), "extracted widget matrix");
    Ok(Some(matrix))
}
