use std::{
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
    time::Duration,
};

use rusqlite::{Connection, OpenFlags};
use tokio::sync::oneshot;

use crate::{
    core::{
        query, schema,
        types::{BuiltQuery, ColumnInfo, ResultRow},
    },
    error::{AppError, AppResult},
};

const BUSY_TIMEOUT_MS: u64 = 2_000;

/// Cloneable handle to the single read-only connection, which lives on its
/// own worker thread.
#[derive(Debug, Clone)]
pub struct Database {
    tx: mpsc::Sender<DbTask>,
    pub db_path: PathBuf,
}

impl Database {
    /// Opens `db_path` read-only and starts the worker. Fails immediately if
    /// the file cannot be opened. The path is used as given; configuration
    /// has already made it absolute.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        let db_path = db_path.to_path_buf();
        let conn = open_conn(&db_path)?;
        let (tx, rx) = mpsc::channel::<DbTask>();
        thread::Builder::new()
            .name("sqlite-worker".into())
            .spawn(move || db_worker_main(conn, rx))?;
        Ok(Self { tx, db_path })
    }

    pub async fn table_exists(&self, table: String) -> AppResult<bool> {
        let (tx, rx) = oneshot::channel();
        self.send(DbTask::TableExists { table, respond_to: tx })?;
        rx.await.map_err(|_| AppError::Internal("db worker dropped response".into()))?
    }

    pub async fn columns(&self, table: String) -> AppResult<Vec<ColumnInfo>> {
        let (tx, rx) = oneshot::channel();
        self.send(DbTask::Columns { table, respond_to: tx })?;
        rx.await.map_err(|_| AppError::Internal("db worker dropped response".into()))?
    }

    pub async fn select(&self, query: BuiltQuery, columns: Vec<ColumnInfo>) -> AppResult<Vec<ResultRow>> {
        let (tx, rx) = oneshot::channel();
        self.send(DbTask::Select {
            query,
            columns,
            respond_to: tx,
        })?;
        rx.await.map_err(|_| AppError::Internal("db worker dropped response".into()))?
    }

    fn send(&self, task: DbTask) -> AppResult<()> {
        self.tx
            .send(task)
            .map_err(|_| AppError::Internal("db worker unavailable".into()))
    }
}

enum DbTask {
    TableExists {
        table: String,
        respond_to: oneshot::Sender<AppResult<bool>>,
    },
    Columns {
        table: String,
        respond_to: oneshot::Sender<AppResult<Vec<ColumnInfo>>>,
    },
    Select {
        query: BuiltQuery,
        columns: Vec<ColumnInfo>,
        respond_to: oneshot::Sender<AppResult<Vec<ResultRow>>>,
    },
}

fn db_worker_main(conn: Connection, rx: mpsc::Receiver<DbTask>) {
    // Runs until every handle is dropped.
    while let Ok(task) = rx.recv() {
        match task {
            DbTask::TableExists { table, respond_to } => {
                let _ = respond_to.send(schema::table_exists(&conn, &table));
            }
            DbTask::Columns { table, respond_to } => {
                let _ = respond_to.send(schema::list_columns(&conn, &table));
            }
            DbTask::Select {
                query: built,
                columns,
                respond_to,
            } => {
                let res = query::run_select(&conn, &built, &columns);
                if let Err(e) = &res {
                    tracing::debug!(error = %e, sql = %built.sql, "query failed");
                }
                let _ = respond_to.send(res);
            }
        }
    }
    tracing::debug!("db worker exiting");
}

fn open_conn(path: &Path) -> AppResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(|source| AppError::DbOpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let _ = conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS));
    Ok(conn)
}

pub fn absolute_path(path: &Path) -> AppResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir()?;
        Ok(cwd.join(path))
    }
}
