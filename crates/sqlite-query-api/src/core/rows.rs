use rusqlite::{types::ValueRef, Row, Rows};

use crate::core::{
    ident::eq_fold,
    types::{CellValue, ColumnInfo, ResultRow},
};
use crate::error::AppResult;

/// Drains a result cursor into JSON-ready rows, keeping the engine's order.
///
/// `columns` carries the declared types used to recognise boolean columns.
pub fn map_rows(mut rows: Rows<'_>, columns: &[ColumnInfo]) -> AppResult<Vec<ResultRow>> {
    let names: Vec<String> = rows
        .as_ref()
        .map(|stmt| stmt.column_names().iter().map(|s| s.to_string()).collect())
        .unwrap_or_default();
    let boolean: Vec<bool> = names
        .iter()
        .map(|name| {
            columns
                .iter()
                .find(|c| eq_fold(&c.name, name))
                .is_some_and(|c| is_boolean_decl(&c.decl_type))
        })
        .collect();

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(map_row(row, &names, &boolean)?);
    }
    Ok(out)
}

fn map_row(row: &Row<'_>, names: &[String], boolean: &[bool]) -> AppResult<ResultRow> {
    let mut cells = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        cells.push((name.clone(), to_cell(row.get_ref(i)?, boolean[i])));
    }
    Ok(ResultRow { cells })
}

pub fn to_cell(value: ValueRef<'_>, boolean: bool) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(x) if boolean => CellValue::Bool(x != 0),
        ValueRef::Integer(x) => CellValue::Integer(x),
        ValueRef::Real(x) if x.is_finite() => CellValue::Real(x),
        ValueRef::Real(x) => CellValue::Other(x.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            CellValue::Text(String::from_utf8_lossy(t).into_owned())
        }
    }
}

fn is_boolean_decl(decl: &str) -> bool {
    eq_fold(decl, "boolean") || eq_fold(decl, "bool")
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;
    use crate::core::schema::list_columns;

    #[test]
    fn scalar_conversions() {
        assert_eq!(to_cell(ValueRef::Null, false), CellValue::Null);
        assert_eq!(to_cell(ValueRef::Integer(42), false), CellValue::Integer(42));
        assert_eq!(to_cell(ValueRef::Integer(0), true), CellValue::Bool(false));
        assert_eq!(to_cell(ValueRef::Integer(3), true), CellValue::Bool(true));
        assert_eq!(to_cell(ValueRef::Real(2.5), false), CellValue::Real(2.5));
        assert_eq!(
            to_cell(ValueRef::Real(f64::INFINITY), false),
            CellValue::Other("inf".into())
        );
        assert_eq!(
            to_cell(ValueRef::Text(b"hello"), false),
            CellValue::Text("hello".into())
        );
        assert_eq!(
            to_cell(ValueRef::Blob(b"raw bytes"), false),
            CellValue::Text("raw bytes".into())
        );
    }

    #[test]
    fn maps_rows_in_engine_order() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE items (label TEXT, qty INTEGER, active BOOLEAN, payload BLOB, note TEXT);
             INSERT INTO items VALUES ('b', 2, 1, X'6869', NULL);
             INSERT INTO items VALUES ('a', 1, 0, NULL, 'x');",
        )
        .unwrap();
        let columns = list_columns(&conn, "items").unwrap();

        let mut stmt = conn
            .prepare("SELECT label, qty, active, payload, note FROM items ORDER BY rowid")
            .unwrap();
        let rows = map_rows(stmt.query([]).unwrap(), &columns).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            serde_json::to_value(&rows).unwrap(),
            serde_json::json!([
                { "label": "b", "qty": 2, "active": true, "payload": "hi", "note": null },
                { "label": "a", "qty": 1, "active": false, "payload": null, "note": "x" }
            ])
        );
    }

    #[test]
    fn empty_cursor_yields_empty_vec() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (a TEXT);").unwrap();
        let columns = list_columns(&conn, "t").unwrap();
        let mut stmt = conn.prepare("SELECT a FROM t").unwrap();
        let rows = map_rows(stmt.query([]).unwrap(), &columns).unwrap();
        assert!(rows.is_empty());
        assert_eq!(serde_json::to_string(&rows).unwrap(), "[]");
    }
}
