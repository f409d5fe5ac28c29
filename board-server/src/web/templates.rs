//! Askama templates for the web frontend.

use askama::Template;

use crate::board::{BoardRow, StationBoard};
use crate::domain::{BoardKind, Station};

// ============================================================================
// Page Templates
// ============================================================================

/// Home page: station search form and matches.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Station Boards</title></head>
<body>
<h1>Station Boards</h1>
<form method="get" action="/">
  <label for="q">Search for your station:</label>
  <input id="q" name="q" placeholder="Search by name, city, or code" value="{{ query }}">
  <button type="submit">Search</button>
</form>
{% if !stations.is_empty() %}
<ul class="stations">
{% for s in stations %}  <li><a href="/board/{{ s.code }}">{{ s.label }}</a></li>
{% endfor %}</ul>
{% else if !query.is_empty() %}
<p>No stations match "{{ query }}".</p>
{% endif %}
<p>This website is experimental and not associated with any railroad. Use at your own risk.</p>
</body>
</html>"#
)]
pub struct IndexTemplate {
    pub query: String,
    pub stations: Vec<StationLink>,
}

/// A station's departures and arrivals.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><meta http-equiv="refresh" content="{{ refresh_secs }}"><title>{{ station_name }} Station</title></head>
<body>
<p><a href="/">Search stations</a></p>
<h1>{{ station_name }} Station</h1>
{% for table in tables %}{% if !table.rows.is_empty() %}
<h2>{{ table.title }}</h2>
<table>
  <thead><tr><th>Time</th><th>No.</th><th>Train</th><th>{{ table.counterpart_label }}</th><th>Status</th></tr></thead>
  <tbody>
{% for row in table.rows %}    <tr><td>{{ row.time }}</td><td>{{ row.number }}</td><td>{{ row.route }}</td><td>{{ row.counterpart }}</td><td>{{ row.status }}</td></tr>
{% endfor %}  </tbody>
</table>
{% endif %}{% endfor %}
{% if is_empty %}<p>No trains listed in the next {{ lookahead_hours }} hours.</p>{% endif %}
{% if feed_error %}<p class="error">Train data could not be refreshed; showing the last good data.</p>{% endif %}
{% if let Some(updated) = last_updated %}<div>Last Updated: {{ updated }}</div>{% endif %}
</body>
</html>"#
)]
pub struct BoardTemplate {
    pub station_name: String,
    pub tables: Vec<TableView>,
    pub is_empty: bool,
    pub lookahead_hours: f64,
    /// How often the page reloads itself
    pub refresh_secs: u64,
    pub last_updated: Option<String>,
    pub feed_error: bool,
}

impl BoardTemplate {
    pub fn from_board(
        board: &StationBoard,
        lookahead_hours: f64,
        refresh_secs: u64,
        last_updated: Option<String>,
        feed_error: bool,
    ) -> Self {
        Self {
            station_name: board.station_name.clone(),
            tables: vec![
                TableView::new(BoardKind::Departure, &board.departures),
                TableView::new(BoardKind::Arrival, &board.arrivals),
            ],
            is_empty: board.is_empty(),
            lookahead_hours,
            refresh_secs,
            last_updated,
            feed_error,
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A link to a station's board.
#[derive(Debug, Clone)]
pub struct StationLink {
    pub code: String,
    pub label: String,
}

impl StationLink {
    pub fn from_station(station: &Station) -> Self {
        Self {
            code: station.code.to_string(),
            label: station.label(),
        }
    }
}

/// One table (departures or arrivals) on a board page.
#[derive(Debug, Clone)]
pub struct TableView {
    pub title: &'static str,
    pub counterpart_label: &'static str,
    pub rows: Vec<BoardRow>,
}

impl TableView {
    pub fn new(kind: BoardKind, rows: &[BoardRow]) -> Self {
        Self {
            title: kind.title(),
            counterpart_label: kind.counterpart_label(),
            rows: rows.to_vec(),
        }
    }
}
