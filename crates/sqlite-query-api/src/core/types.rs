use serde::{ser::SerializeMap, Serialize, Serializer};

/// One row of `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub ordinal: i64,
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub is_primary_key: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Accepts exactly `asc` or `desc`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Everything the query builder needs for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub table: String,
    pub columns: Vec<String>,
    /// Raw query-string pairs in arrival order; the builder decides which
    /// of them become predicates.
    pub filters: Vec<(String, String)>,
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    /// `None` means unbounded.
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<String>,
}

/// A JSON-safe scalar produced by the row mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Bool(bool),
    Text(String),
    /// Textual rendering of anything without a natural JSON form.
    Other(String),
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_none(),
            CellValue::Integer(v) => serializer.serialize_i64(*v),
            CellValue::Real(v) => serializer.serialize_f64(*v),
            CellValue::Bool(v) => serializer.serialize_bool(*v),
            CellValue::Text(v) | CellValue::Other(v) => serializer.serialize_str(v),
        }
    }
}

/// Serializes as a JSON object with keys in select-list order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub cells: Vec<(String, CellValue)>,
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
