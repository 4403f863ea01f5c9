use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::TableError;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("valid selector"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("valid selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));

/// The first table of a listing page, reduced to text: one ordered row of header cells and the
/// ordered data rows below the configured number of header rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTable {
    /// The `<th>` cells of the table's first row.
    pub headers: Vec<String>,
    /// The `<td>` cells of each data row, in document order.
    pub rows: Vec<Vec<String>>,
}

/// The first data row containing a cell equal to the target value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The row's first cell, by listing-page convention the file's name.
    pub file_name: String,
    /// All cells of the matched row, for reporting.
    pub cells: Vec<String>,
}

impl ListingTable {
    /// Parses the first `<table>` of an HTML document. The table's first row supplies the
    /// headers; the first `header_rows` rows are not treated as data.
    pub fn parse(html: &str, header_rows: usize) -> Result<Self, TableError> {
        let document = Html::parse_document(html);
        let table = document.select(&TABLE).next().ok_or(TableError::NoTable)?;

        let headers = table
            .select(&TR)
            .next()
            .map(|row| row.select(&TH).map(cell_text).collect())
            .unwrap_or_default();

        let rows = table
            .select(&TR)
            .skip(header_rows)
            .map(|row| row.select(&TD).map(cell_text).collect())
            .collect();

        Ok(Self { headers, rows })
    }

    /// Scans the data rows in order and returns the first row containing a cell equal to
    /// `target`.
    pub fn find(&self, target: &str) -> Option<Match> {
        let row = self
            .rows
            .iter()
            .find(|row| row.iter().any(|cell| cell == target))?;
        let file_name = row.first()?.clone();
        Some(Match {
            file_name,
            cells: row.clone(),
        })
    }
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
