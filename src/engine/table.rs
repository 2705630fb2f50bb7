//! Tabular data exchanged between CSV ingestion and the property graph.

use std::path::PathBuf;

use crate::core::error::EngineError;
use crate::core::types::HeaderMode;
use crate::engine::EngineResult;

/// Column data types accepted in CSV schema hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int32,
    Int64,
    Float32,
    Float64,
    Str,
}

impl DType {
    pub fn parse(name: &str) -> EngineResult<Self> {
        match name {
            "int32" => Ok(DType::Int32),
            "int64" => Ok(DType::Int64),
            "float32" => Ok(DType::Float32),
            "float64" => Ok(DType::Float64),
            "str" | "string" => Ok(DType::Str),
            other => Err(EngineError::Schema(format!("unknown dtype '{other}'"))),
        }
    }

    /// Parse one raw CSV field under this dtype.
    pub fn parse_cell(&self, raw: &str) -> EngineResult<Cell> {
        let raw = raw.trim();
        match self {
            DType::Int32 | DType::Int64 => raw
                .parse::<i64>()
                .map(Cell::Int)
                .map_err(|_| EngineError::Schema(format!("'{raw}' is not an integer"))),
            DType::Float32 | DType::Float64 => raw
                .parse::<f64>()
                .map(Cell::Float)
                .map_err(|_| EngineError::Schema(format!("'{raw}' is not a float"))),
            DType::Str => Ok(Cell::Str(raw.to_string())),
        }
    }
}

/// A single typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Cell {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            Cell::Str(_) => None,
        }
    }
}

/// Options for one CSV read.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub path: PathBuf,
    pub delimiter: u8,
    pub dtypes: Vec<DType>,
    pub header: HeaderMode,
}

/// A column-named table of typed rows.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DataTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> EngineResult<()> {
        if row.len() != self.columns.len() {
            return Err(EngineError::Schema(format!(
                "row has {} fields, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> EngineResult<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| EngineError::Schema(format!("no column named '{name}'")))
    }
}
