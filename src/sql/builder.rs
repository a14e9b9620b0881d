//! Builds the free-text search queries. Identifiers come from a fixed allow-list; the search text is a parameter.

use crate::error::AppError;

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new(sql: impl Into<String>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: String) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Station columns a search may be scoped to via `attribute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationColumn {
    Id,
    Naziv,
    Adresa,
    Kapacitet,
    GeoLat,
    GeoLon,
    Aktivna,
    DatumPosljednjeAktivnosti,
}

impl StationColumn {
    pub const ALL: [StationColumn; 8] = [
        StationColumn::Id,
        StationColumn::Naziv,
        StationColumn::Adresa,
        StationColumn::Kapacitet,
        StationColumn::GeoLat,
        StationColumn::GeoLon,
        StationColumn::Aktivna,
        StationColumn::DatumPosljednjeAktivnosti,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StationColumn::Id => "id",
            StationColumn::Naziv => "naziv",
            StationColumn::Adresa => "adresa",
            StationColumn::Kapacitet => "kapacitet",
            StationColumn::GeoLat => "geo_lat",
            StationColumn::GeoLon => "geo_lon",
            StationColumn::Aktivna => "aktivna",
            StationColumn::DatumPosljednjeAktivnosti => "datum_posljednje_aktivnosti",
        }
    }

    /// Column qualified with the station alias `s`.
    fn qualified(self) -> &'static str {
        match self {
            StationColumn::Id => "s.id",
            StationColumn::Naziv => "s.naziv",
            StationColumn::Adresa => "s.adresa",
            StationColumn::Kapacitet => "s.kapacitet",
            StationColumn::GeoLat => "s.geo_lat",
            StationColumn::GeoLon => "s.geo_lon",
            StationColumn::Aktivna => "s.aktivna",
            StationColumn::DatumPosljednjeAktivnosti => "s.datum_posljednje_aktivnosti",
        }
    }

    pub fn from_attribute(attribute: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == attribute)
    }
}

/// Columns matched when no `attribute` is given, over the station/bike join.
const JOINED_WILDCARD: &[&str] = &["s.id", "s.naziv", "s.adresa", "s.kapacitet", "b.id", "b.status", "b.tip"];

/// Station-side subset of the wildcard, used when bikes are not joined.
const STATION_WILDCARD: &[&str] = &["s.id", "s.naziv", "s.adresa", "s.kapacitet"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    Column(StationColumn),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub pattern: String,
    pub target: SearchTarget,
}

impl SearchFilter {
    /// `None` when `search` is absent or blank. `attribute` of `all` (or empty) means the wildcard match;
    /// any other value must name a station column.
    pub fn parse(search: Option<&str>, attribute: Option<&str>) -> Result<Option<Self>, AppError> {
        let target = match attribute.map(str::trim) {
            None | Some("") | Some("all") => SearchTarget::Wildcard,
            Some(name) => SearchTarget::Column(
                StationColumn::from_attribute(name)
                    .ok_or_else(|| AppError::BadRequest(format!("Invalid search attribute: {}", name)))?,
            ),
        };
        Ok(match search {
            Some(s) if !s.trim().is_empty() => Some(SearchFilter {
                pattern: like_pattern(s),
                target,
            }),
            _ => None,
        })
    }

    fn where_clause(&self, wildcard: &[&str], q: &mut QueryBuf) -> String {
        let n = q.push_param(self.pattern.clone());
        match self.target {
            SearchTarget::Column(col) => format!(" WHERE CAST({} AS TEXT) ILIKE ${}", col.qualified(), n),
            SearchTarget::Wildcard => {
                let parts: Vec<String> = wildcard
                    .iter()
                    .map(|c| format!("CAST({} AS TEXT) ILIKE ${}", c, n))
                    .collect();
                format!(" WHERE {}", parts.join(" OR "))
            }
        }
    }
}

/// `%text%` with LIKE metacharacters escaped, so the match is a literal substring.
pub fn like_pattern(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

const JOINED_SELECT: &str = "SELECT s.id AS stanica_id, s.naziv, s.adresa, s.kapacitet, s.geo_lat, s.geo_lon, \
     s.aktivna, s.datum_posljednje_aktivnosti, b.id AS bicikl_id, b.status, b.tip, b.zadnje_koristenje \
     FROM stanice s LEFT JOIN bicikli b ON s.id = b.stanica_id";

const STATION_SELECT: &str = "SELECT s.id, s.naziv, s.adresa, s.kapacitet, s.geo_lat, s.geo_lon, \
     s.aktivna, s.datum_posljednje_aktivnosti FROM stanice s";

/// Stations left-joined to bikes, one row per bike (or per bike-less station), ordered by station then bike.
pub fn joined_search(filter: Option<&SearchFilter>) -> QueryBuf {
    let mut q = QueryBuf::new(JOINED_SELECT);
    if let Some(f) = filter {
        let clause = f.where_clause(JOINED_WILDCARD, &mut q);
        q.sql.push_str(&clause);
    }
    q.sql.push_str(" ORDER BY s.id, b.id");
    q
}

/// Stations only, ordered by id.
pub fn station_search(filter: Option<&SearchFilter>) -> QueryBuf {
    let mut q = QueryBuf::new(STATION_SELECT);
    if let Some(f) = filter {
        let clause = f.where_clause(STATION_WILDCARD, &mut q);
        q.sql.push_str(&clause);
    }
    q.sql.push_str(" ORDER BY s.id");
    q
}
