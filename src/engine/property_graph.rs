//! Property-carrying graph: topology plus per-vertex/per-edge attribute
//! columns ingested from tabular data.

use std::collections::{BTreeMap, HashMap};

use crate::core::error::EngineError;
use crate::engine::table::{Cell, DataTable};
use crate::engine::{EdgeDataOptions, EngineResult, VertexDataOptions};

#[derive(Debug, Clone, Default)]
pub struct VertexEntry {
    pub type_name: String,
    pub properties: BTreeMap<String, Cell>,
}

#[derive(Debug, Clone)]
pub struct EdgeEntry {
    pub src: i64,
    pub dst: i64,
    pub type_name: String,
    pub properties: BTreeMap<String, Cell>,
}

/// In-memory property graph. Vertices are keyed by integer id; edges keep
/// their ingestion order, one entry per ingested row.
#[derive(Debug, Clone, Default)]
pub struct PropertyGraph {
    vertices: HashMap<i64, VertexEntry>,
    edges: Vec<EdgeEntry>,
}

impl PropertyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[EdgeEntry] {
        &self.edges
    }

    pub fn vertex(&self, id: i64) -> Option<&VertexEntry> {
        self.vertices.get(&id)
    }

    /// Attach a table as vertex data. Later rows for the same vertex id merge
    /// into (and overwrite) the existing property map.
    pub fn add_vertex_table(
        &mut self,
        table: DataTable,
        options: &VertexDataOptions,
    ) -> EngineResult<()> {
        let id_idx = table.column_index(&options.vertex_col_name)?;
        let prop_idx = property_indices(&table, &[id_idx], &options.property_columns)?;

        for row in table.rows() {
            let id = int_cell(&row[id_idx], &options.vertex_col_name)?;
            let entry = self.vertices.entry(id).or_default();
            entry.type_name = options.type_name.clone();
            for &idx in &prop_idx {
                entry
                    .properties
                    .insert(table.columns()[idx].clone(), row[idx].clone());
            }
        }
        Ok(())
    }

    /// Attach a table as edge data, one edge per row. Endpoint vertices are
    /// created implicitly if absent.
    pub fn add_edge_table(
        &mut self,
        table: DataTable,
        options: &EdgeDataOptions,
    ) -> EngineResult<()> {
        if options.vertex_col_names.len() != 2 {
            return Err(EngineError::Schema(format!(
                "expected two vertex column names (source, destination), got {}",
                options.vertex_col_names.len()
            )));
        }
        let src_idx = table.column_index(&options.vertex_col_names[0])?;
        let dst_idx = table.column_index(&options.vertex_col_names[1])?;
        let prop_idx = property_indices(&table, &[src_idx, dst_idx], &options.property_columns)?;

        for row in table.rows() {
            let src = int_cell(&row[src_idx], &options.vertex_col_names[0])?;
            let dst = int_cell(&row[dst_idx], &options.vertex_col_names[1])?;
            self.vertices.entry(src).or_default();
            self.vertices.entry(dst).or_default();

            let mut properties = BTreeMap::new();
            for &idx in &prop_idx {
                properties.insert(table.columns()[idx].clone(), row[idx].clone());
            }
            self.edges.push(EdgeEntry {
                src,
                dst,
                type_name: options.type_name.clone(),
                properties,
            });
        }
        Ok(())
    }
}

/// Resolve which columns become properties: the requested subset, or every
/// column except the reserved (id/endpoint) ones.
fn property_indices(
    table: &DataTable,
    reserved: &[usize],
    requested: &[String],
) -> EngineResult<Vec<usize>> {
    let mut out = Vec::new();
    if requested.is_empty() {
        for idx in 0..table.columns().len() {
            if !reserved.contains(&idx) {
                out.push(idx);
            }
        }
    } else {
        for name in requested {
            let idx = table.column_index(name)?;
            if !reserved.contains(&idx) {
                out.push(idx);
            }
        }
    }
    Ok(out)
}

fn int_cell(cell: &Cell, column: &str) -> EngineResult<i64> {
    cell.as_i64().ok_or_else(|| {
        EngineError::Schema(format!("vertex column '{column}' must hold integer ids"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::table::DataTable;

    fn edge_table(columns: &[&str], rows: &[(i64, i64, f64)]) -> DataTable {
        let mut table = DataTable::new(columns.iter().map(|c| c.to_string()).collect());
        for &(s, d, w) in rows {
            table
                .push_row(vec![Cell::Int(s), Cell::Int(d), Cell::Float(w)])
                .unwrap();
        }
        table
    }

    fn edge_options(src: &str, dst: &str) -> EdgeDataOptions {
        EdgeDataOptions {
            vertex_col_names: vec![src.to_string(), dst.to_string()],
            type_name: String::new(),
            property_columns: Vec::new(),
        }
    }

    #[test]
    fn test_add_edge_table_counts_rows() {
        let mut pg = PropertyGraph::new();
        let table = edge_table(&["0", "1", "2"], &[(0, 1, 1.0), (1, 2, 2.0)]);
        pg.add_edge_table(table, &edge_options("0", "1")).unwrap();
        assert_eq!(pg.num_edges(), 2);
        assert_eq!(pg.num_vertices(), 3);
        assert_eq!(pg.edges()[1].properties["2"], Cell::Float(2.0));
    }

    #[test]
    fn test_add_edge_table_requires_two_endpoint_columns() {
        let mut pg = PropertyGraph::new();
        let table = edge_table(&["0", "1", "2"], &[(0, 1, 1.0)]);
        let options = EdgeDataOptions {
            vertex_col_names: vec!["0".to_string()],
            type_name: String::new(),
            property_columns: Vec::new(),
        };
        assert!(pg.add_edge_table(table, &options).is_err());
    }

    #[test]
    fn test_add_vertex_table_merges_properties() {
        let mut pg = PropertyGraph::new();
        let mut table = DataTable::new(vec!["id".into(), "rank".into()]);
        table.push_row(vec![Cell::Int(7), Cell::Int(3)]).unwrap();
        table.push_row(vec![Cell::Int(7), Cell::Int(5)]).unwrap();
        let options = VertexDataOptions {
            vertex_col_name: "id".to_string(),
            type_name: "person".to_string(),
            property_columns: Vec::new(),
        };
        pg.add_vertex_table(table, &options).unwrap();
        assert_eq!(pg.num_vertices(), 1);
        let v = pg.vertex(7).unwrap();
        assert_eq!(v.type_name, "person");
        assert_eq!(v.properties["rank"], Cell::Int(5));
    }

    #[test]
    fn test_vertex_column_must_be_integer() {
        let mut pg = PropertyGraph::new();
        let mut table = DataTable::new(vec!["id".into()]);
        table.push_row(vec![Cell::Str("x".into())]).unwrap();
        let options = VertexDataOptions {
            vertex_col_name: "id".to_string(),
            type_name: String::new(),
            property_columns: Vec::new(),
        };
        assert!(pg.add_vertex_table(table, &options).is_err());
    }
}
