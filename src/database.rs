use crate::errors::AppError;
use crate::models::ClientRecord;
use std::collections::HashMap;
use std::path::Path;

/// Columns the sample database must provide. `TARGET` may be present but is
/// dropped on load.
const REQUIRED_COLUMNS: [&str; 8] = [
    "SK_ID_CURR",
    "EXT_SOURCE_1",
    "EXT_SOURCE_2",
    "EXT_SOURCE_3",
    "AMT_ANNUITY",
    "AMT_CREDIT",
    "NAME_FAMILY_STATUS",
    "CODE_GENDER",
];

/// In-memory client sample database.
///
/// Loaded once at startup, read-only thereafter. Row order is preserved
/// because the explanation file is aligned to it; lookups by id go through an
/// explicit id -> position index built at load time.
#[derive(Debug, Clone)]
pub struct ClientDatabase {
    records: Vec<ClientRecord>,
    index: HashMap<u64, usize>,
}

impl ClientDatabase {
    /// Loads the database from a CSV file with a header row.
    ///
    /// Fails on missing required columns, unparseable rows, or duplicate
    /// `SK_ID_CURR` values (the id must identify exactly one row).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            AppError::NotFound(format!(
                "client database '{}' could not be opened: {}",
                path.display(),
                e
            ))
        })?;

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(AppError::InternalError(format!(
                    "client database '{}' is missing required column '{}'",
                    path.display(),
                    column
                )));
            }
        }

        let mut records: Vec<ClientRecord> = Vec::new();
        let mut index: HashMap<u64, usize> = HashMap::new();
        for (row, result) in reader.deserialize::<ClientRecord>().enumerate() {
            let record = result.map_err(|e| {
                AppError::InternalError(format!(
                    "client database '{}' row {}: {}",
                    path.display(),
                    row + 1,
                    e
                ))
            })?;
            if let Some(previous) = index.insert(record.sk_id_curr, records.len()) {
                return Err(AppError::InternalError(format!(
                    "duplicate SK_ID_CURR {} at rows {} and {}",
                    record.sk_id_curr,
                    previous + 1,
                    records.len() + 1
                )));
            }
            records.push(record);
        }

        tracing::info!(
            "Loaded {} client records from {}",
            records.len(),
            path.display()
        );

        Ok(Self { records, index })
    }

    /// All client ids in database row order.
    pub fn client_ids(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.sk_id_curr).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up the unique record for a client id.
    pub fn find_by_id(&self, sk_id_curr: u64) -> Result<&ClientRecord, AppError> {
        self.index
            .get(&sk_id_curr)
            .map(|&pos| &self.records[pos])
            .ok_or_else(|| AppError::NotFound(format!("client {} not in database", sk_id_curr)))
    }

    /// Row position of a client id, for explanation selection.
    pub fn position_of(&self, sk_id_curr: u64) -> Result<usize, AppError> {
        self.index
            .get(&sk_id_curr)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("client {} not in database", sk_id_curr)))
    }

    /// Checks that a row-aligned companion collection covers every row.
    ///
    /// The explanation file carries one entry per database row in the same
    /// order; a count mismatch means the two files were produced from
    /// different snapshots and position lookups would silently pick the wrong
    /// client.
    pub fn validate_alignment(&self, explanation_count: usize) -> Result<(), AppError> {
        if explanation_count != self.records.len() {
            return Err(AppError::InternalError(format!(
                "explanation collection has {} entries but database has {} rows",
                explanation_count,
                self.records.len()
            )));
        }
        Ok(())
    }
}
