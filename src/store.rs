//! Card store: the upsert seam and its DuckDB implementation.
//!
//! List and image columns are stored as JSON text. Each call to
//! [`CardStore::upsert_cards`] is one transaction; nothing spans calls.

use crate::error::Result;
use crate::models::CardRow;
use duckdb::{params, types::ValueRef, Connection as DuckDbConnection};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Insert-or-update sink for transformed cards, keyed on `scryfall_id`.
pub trait CardStore {
    /// Write one batch atomically, updating rows whose `scryfall_id`
    /// already exists. Returns the number of rows written.
    fn upsert_cards(&mut self, batch: &[CardRow]) -> Result<usize>;
}

const SCHEMA: &str = "
    CREATE SEQUENCE IF NOT EXISTS cards_id_seq START 1;

    CREATE TABLE IF NOT EXISTS cards (
        id BIGINT PRIMARY KEY DEFAULT nextval('cards_id_seq'),
        scryfall_id VARCHAR NOT NULL UNIQUE,
        name VARCHAR NOT NULL,
        mana_cost VARCHAR,
        cmc DOUBLE NOT NULL,
        type_line VARCHAR NOT NULL,
        colors VARCHAR,
        color_identity VARCHAR,
        power VARCHAR,
        toughness VARCHAR,
        rarity VARCHAR NOT NULL,
        set_code VARCHAR NOT NULL,
        collector_number VARCHAR,
        keywords VARCHAR NOT NULL,
        image_uris VARCHAR,
        card_object_uri VARCHAR NOT NULL,
        scryfall_uri VARCHAR,
        created_at TIMESTAMP NOT NULL DEFAULT current_timestamp,
        updated_at TIMESTAMP NOT NULL DEFAULT current_timestamp
    );
";

const UPSERT: &str = "
    INSERT INTO cards
        (scryfall_id, name, mana_cost, cmc, type_line, colors, color_identity,
         power, toughness, rarity, set_code, collector_number, keywords,
         image_uris, card_object_uri, scryfall_uri)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT (scryfall_id) DO UPDATE SET
        name = EXCLUDED.name,
        mana_cost = EXCLUDED.mana_cost,
        cmc = EXCLUDED.cmc,
        type_line = EXCLUDED.type_line,
        colors = EXCLUDED.colors,
        color_identity = EXCLUDED.color_identity,
        power = EXCLUDED.power,
        toughness = EXCLUDED.toughness,
        rarity = EXCLUDED.rarity,
        set_code = EXCLUDED.set_code,
        collector_number = EXCLUDED.collector_number,
        keywords = EXCLUDED.keywords,
        image_uris = EXCLUDED.image_uris,
        card_object_uri = EXCLUDED.card_object_uri,
        scryfall_uri = EXCLUDED.scryfall_uri,
        updated_at = now()
";

const SELECT_ROW: &str = "
    SELECT scryfall_id, name, mana_cost, cmc, type_line, colors, color_identity,
           power, toughness, rarity, set_code, collector_number, keywords,
           image_uris, card_object_uri, scryfall_uri
    FROM cards WHERE scryfall_id = ?
";

/// DuckDB-backed card store.
pub struct DuckDbStore {
    conn: DuckDbConnection,
}

impl DuckDbStore {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = DuckDbConnection::open(path)?;
        log::info!("Opened card store: {}", path.display());
        Self::init(conn)
    }

    /// In-memory store, mainly for tests and dry experiments.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(DuckDbConnection::open_in_memory()?)
    }

    fn init(conn: DuckDbConnection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Number of stored cards, optionally restricted to one set.
    pub fn count_cards(&self, set_code: Option<&str>) -> Result<usize> {
        let value = match set_code {
            Some(code) => self.execute_scalar(
                "SELECT COUNT(*) FROM cards WHERE set_code = ?",
                &[code.to_string()],
            )?,
            None => self.execute_scalar("SELECT COUNT(*) FROM cards", &[])?,
        };
        Ok(value.and_then(|v| v.as_u64()).unwrap_or(0) as usize)
    }

    /// Load a stored card back into its insert shape.
    pub fn get_card(&self, scryfall_id: &str) -> Result<Option<CardRow>> {
        let mut stmt = self.conn.prepare(SELECT_ROW)?;
        let mut rows = stmt.query(params![scryfall_id])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let colors: Option<String> = row.get(5)?;
        let color_identity: Option<String> = row.get(6)?;
        let image_uris: Option<String> = row.get(13)?;

        Ok(Some(CardRow {
            scryfall_id: row.get(0)?,
            name: row.get(1)?,
            mana_cost: row.get(2)?,
            cmc: row.get(3)?,
            type_line: row.get(4)?,
            colors: from_json_column(colors)?,
            color_identity: from_json_column(color_identity)?,
            power: row.get(7)?,
            toughness: row.get(8)?,
            rarity: row.get(9)?,
            set_code: row.get(10)?,
            collector_number: row.get(11)?,
            keywords: row.get(12)?,
            image_uris: from_json_column(image_uris)?,
            card_object_uri: row.get(14)?,
            scryfall_uri: row.get(15)?,
        }))
    }

    /// Execute SQL and return each row as a column-name map.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the query has run.
        let column_names: Vec<String> = rows
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, name) in column_names.iter().enumerate() {
                map.insert(name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }
        Ok(out)
    }

    /// First column of the first row, or `None` for an empty result.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;
        match rows.next()? {
            Some(row) => Ok(Some(convert_value_ref(row.get_ref(0)?))),
            None => Ok(None),
        }
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

impl CardStore for DuckDbStore {
    fn upsert_cards(&mut self, batch: &[CardRow]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(UPSERT)?;
            for card in batch {
                stmt.execute(params![
                    &card.scryfall_id,
                    &card.name,
                    &card.mana_cost,
                    card.cmc,
                    &card.type_line,
                    to_json_column(&card.colors)?,
                    to_json_column(&card.color_identity)?,
                    &card.power,
                    &card.toughness,
                    &card.rarity,
                    &card.set_code,
                    &card.collector_number,
                    &card.keywords,
                    to_json_column(&card.image_uris)?,
                    &card.card_object_uri,
                    &card.scryfall_uri,
                ])?;
            }
        }
        tx.commit()?;
        Ok(batch.len())
    }
}

fn to_json_column<T: serde::Serialize>(value: &Option<T>) -> Result<Option<String>> {
    value
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(Into::into)
}

fn from_json_column<T: serde::de::DeserializeOwned>(value: Option<String>) -> Result<Option<T>> {
    value
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(Into::into)
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => serde_json::Value::Number(i.into()),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        // Timestamps and nested types are read through explicit casts.
        _ => serde_json::Value::Null,
    }
}
