//! In-memory reference implementation of [`GraphEngine`].

use std::collections::HashSet;

use csv::ReaderBuilder;
use log::debug;
use rand::Rng;

use crate::core::error::EngineError;
use crate::core::types::{HeaderMode, Node2vecResult};
use crate::engine::graph::Graph;
use crate::engine::property_graph::PropertyGraph;
use crate::engine::table::{CsvOptions, DataTable};
use crate::engine::{
    EdgeDataOptions, EngineResult, GraphEngine, GraphHandle, SubgraphOptions, VertexDataOptions,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryEngine;

impl MemoryEngine {
    pub fn new() -> Self {
        Self
    }
}

impl GraphEngine for MemoryEngine {
    fn empty_property_graph(&self) -> PropertyGraph {
        PropertyGraph::new()
    }

    fn read_csv(&self, options: &CsvOptions) -> EngineResult<DataTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(options.delimiter)
            .from_path(&options.path)?;

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record.map_err(EngineError::from)?);
        }

        let width = options.dtypes.len();
        for (n, record) in records.iter().enumerate() {
            if record.len() != width {
                return Err(EngineError::Schema(format!(
                    "row {n} has {} fields, expected {width}",
                    record.len()
                )));
            }
        }

        // Decide which row, if any, carries the column names. Inference
        // treats the first row as data when every field parses under the
        // declared dtypes, otherwise as the header.
        let (columns, first_data_row) = match options.header {
            HeaderMode::None => (positional_names(width), 0),
            HeaderMode::Row(n) => {
                let n = n as usize;
                let header = records.get(n).ok_or_else(|| {
                    EngineError::Schema(format!(
                        "header row {n} out of range for a {}-row file",
                        records.len()
                    ))
                })?;
                (header.iter().map(str::to_string).collect(), n + 1)
            }
            HeaderMode::Infer => match records.first() {
                None => (positional_names(width), 0),
                Some(first) => {
                    let parses = first
                        .iter()
                        .zip(&options.dtypes)
                        .all(|(raw, dtype)| dtype.parse_cell(raw).is_ok());
                    if parses {
                        (positional_names(width), 0)
                    } else {
                        (first.iter().map(str::to_string).collect(), 1)
                    }
                }
            },
        };

        let mut table = DataTable::new(columns);
        for record in records.iter().skip(first_data_row) {
            let row = record
                .iter()
                .zip(&options.dtypes)
                .map(|(raw, dtype)| dtype.parse_cell(raw))
                .collect::<EngineResult<Vec<_>>>()?;
            table.push_row(row)?;
        }
        debug!(
            "read {} rows from {}",
            table.num_rows(),
            options.path.display()
        );
        Ok(table)
    }

    fn add_vertex_data(
        &self,
        graph: &mut PropertyGraph,
        table: DataTable,
        options: &VertexDataOptions,
    ) -> EngineResult<()> {
        graph.add_vertex_table(table, options)
    }

    fn add_edge_data(
        &self,
        graph: &mut PropertyGraph,
        table: DataTable,
        options: &EdgeDataOptions,
    ) -> EngineResult<()> {
        graph.add_edge_table(table, options)
    }

    fn num_edges(&self, handle: &GraphHandle) -> EngineResult<usize> {
        match handle {
            GraphHandle::Property(pg) => Ok(pg.num_edges()),
            GraphHandle::Plain(g) => Ok(g.num_edges()),
        }
    }

    fn extract_subgraph(
        &self,
        graph: &PropertyGraph,
        options: &SubgraphOptions,
    ) -> EngineResult<Graph> {
        let directed = match options.create_using.as_str() {
            "" | "Graph" => false,
            "DiGraph" => true,
            other => {
                return Err(EngineError::InvalidParameter(format!(
                    "unknown create_using value '{other}'"
                )))
            }
        };

        let mut out = Graph::new(directed);
        let mut seen = HashSet::new();
        for edge in graph.edges() {
            if !options.selection.is_empty() && edge.type_name != options.selection {
                continue;
            }
            if !options.allow_multi_edges {
                let key = if directed || edge.src <= edge.dst {
                    (edge.src, edge.dst)
                } else {
                    (edge.dst, edge.src)
                };
                if !seen.insert(key) {
                    continue;
                }
            }
            let weight = if options.edge_weight_property.is_empty() {
                options.default_edge_weight
            } else {
                edge.properties
                    .get(&options.edge_weight_property)
                    .and_then(|cell| cell.as_f64())
                    .unwrap_or(options.default_edge_weight)
            };
            out.add_edge(edge.src, edge.dst, weight);
        }
        Ok(out)
    }

    fn node2vec(
        &self,
        graph: &Graph,
        start_vertices: &[i32],
        max_depth: i32,
    ) -> EngineResult<Node2vecResult> {
        if max_depth < 1 {
            return Err(EngineError::InvalidParameter(format!(
                "max_depth must be positive, got {max_depth}"
            )));
        }

        let mut rng = rand::thread_rng();
        let mut result = Node2vecResult::default();
        for &start in start_vertices {
            let start = i64::from(start);
            if !graph.has_vertex(start) {
                return Err(EngineError::UnknownVertex(start));
            }

            let mut path = vec![start];
            let mut current = start;
            for _ in 1..max_depth {
                let neighbors = graph.neighbors(current);
                if neighbors.is_empty() {
                    break;
                }
                let (next, weight) = weighted_pick(&mut rng, neighbors);
                result.edge_weights.push(weight);
                path.push(next);
                current = next;
            }

            result.path_sizes.push(path.len() as i32);
            for vertex in path {
                let vertex = i32::try_from(vertex).map_err(|_| {
                    EngineError::InvalidParameter(format!("vertex id {vertex} out of i32 range"))
                })?;
                result.vertex_paths.push(vertex);
            }
        }
        Ok(result)
    }
}

/// Pick a neighbor with probability proportional to edge weight; falls back
/// to a uniform pick when the weights do not sum to a positive value.
fn weighted_pick<R: Rng>(rng: &mut R, neighbors: &[(i64, f64)]) -> (i64, f64) {
    let total: f64 = neighbors.iter().map(|(_, w)| w.max(0.0)).sum();
    if total > 0.0 {
        let mut target = rng.gen_range(0.0..total);
        for &(next, weight) in neighbors {
            target -= weight.max(0.0);
            if target <= 0.0 {
                return (next, weight);
            }
        }
    }
    neighbors[rng.gen_range(0..neighbors.len())]
}

/// Column names used when a file has no header row: "0", "1", ...
fn positional_names(width: usize) -> Vec<String> {
    (0..width).map(|i| i.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::table::{Cell, DType};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn edge_dtypes() -> Vec<DType> {
        vec![DType::Int32, DType::Int32, DType::Float32]
    }

    #[test]
    fn test_read_csv_headerless_infer() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "edges.csv", "0 1 1.0\n1 2 2.0\n");
        let engine = MemoryEngine::new();
        let table = engine
            .read_csv(&CsvOptions {
                path,
                delimiter: b' ',
                dtypes: edge_dtypes(),
                header: HeaderMode::Infer,
            })
            .unwrap();
        assert_eq!(table.columns(), ["0", "1", "2"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.rows()[1][2], Cell::Float(2.0));
    }

    #[test]
    fn test_read_csv_infer_detects_header_row() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "edges.csv", "src dst weight\n0 1 1.0\n");
        let engine = MemoryEngine::new();
        let table = engine
            .read_csv(&CsvOptions {
                path,
                delimiter: b' ',
                dtypes: edge_dtypes(),
                header: HeaderMode::Infer,
            })
            .unwrap();
        assert_eq!(table.columns(), ["src", "dst", "weight"]);
        assert_eq!(table.num_rows(), 1);
    }

    #[test]
    fn test_read_csv_explicit_header_row() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "edges.csv", "src dst weight\n0 1 1.0\n2 3 1.5\n");
        let engine = MemoryEngine::new();
        let table = engine
            .read_csv(&CsvOptions {
                path,
                delimiter: b' ',
                dtypes: edge_dtypes(),
                header: HeaderMode::Row(0),
            })
            .unwrap();
        assert_eq!(table.columns(), ["src", "dst", "weight"]);
        assert_eq!(table.num_rows(), 2);
    }

    #[test]
    fn test_read_csv_missing_file() {
        let engine = MemoryEngine::new();
        let result = engine.read_csv(&CsvOptions {
            path: PathBuf::from("/nonexistent/edges.csv"),
            delimiter: b' ',
            dtypes: edge_dtypes(),
            header: HeaderMode::Infer,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_read_csv_width_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "edges.csv", "0 1\n");
        let engine = MemoryEngine::new();
        let result = engine.read_csv(&CsvOptions {
            path,
            delimiter: b' ',
            dtypes: edge_dtypes(),
            header: HeaderMode::None,
        });
        assert!(matches!(result, Err(EngineError::Schema(_))));
    }

    fn loaded_property_graph(engine: &MemoryEngine) -> PropertyGraph {
        let mut pg = engine.empty_property_graph();
        let mut table = DataTable::new(vec!["0".into(), "1".into(), "2".into()]);
        for (s, d, w) in [(0, 1, 1.0), (1, 2, 2.0), (1, 0, 1.0), (2, 1, 2.0)] {
            table
                .push_row(vec![Cell::Int(s), Cell::Int(d), Cell::Float(w)])
                .unwrap();
        }
        engine
            .add_edge_data(
                &mut pg,
                table,
                &EdgeDataOptions {
                    vertex_col_names: vec!["0".into(), "1".into()],
                    type_name: String::new(),
                    property_columns: Vec::new(),
                },
            )
            .unwrap();
        pg
    }

    #[test]
    fn test_extract_subgraph_coalesces_multi_edges() {
        let engine = MemoryEngine::new();
        let pg = loaded_property_graph(&engine);
        assert_eq!(pg.num_edges(), 4);

        let g = engine
            .extract_subgraph(
                &pg,
                &SubgraphOptions {
                    create_using: String::new(),
                    selection: String::new(),
                    edge_weight_property: "2".to_string(),
                    default_edge_weight: 1.0,
                    allow_multi_edges: false,
                },
            )
            .unwrap();
        // 4 rows are 2 undirected pairs
        assert_eq!(g.num_edges(), 2);
        assert!(!g.is_directed());
    }

    #[test]
    fn test_extract_subgraph_rejects_unknown_kind() {
        let engine = MemoryEngine::new();
        let pg = loaded_property_graph(&engine);
        let result = engine.extract_subgraph(
            &pg,
            &SubgraphOptions {
                create_using: "MultiDiGraph".to_string(),
                selection: String::new(),
                edge_weight_property: String::new(),
                default_edge_weight: 1.0,
                allow_multi_edges: true,
            },
        );
        assert!(matches!(result, Err(EngineError::InvalidParameter(_))));
    }

    #[test]
    fn test_node2vec_walk_shape() {
        let engine = MemoryEngine::new();
        let pg = loaded_property_graph(&engine);
        let g = engine
            .extract_subgraph(
                &pg,
                &SubgraphOptions {
                    create_using: String::new(),
                    selection: String::new(),
                    edge_weight_property: "2".to_string(),
                    default_edge_weight: 1.0,
                    allow_multi_edges: false,
                },
            )
            .unwrap();

        let result = engine.node2vec(&g, &[0, 1], 3).unwrap();
        assert_eq!(result.path_sizes.len(), 2);
        let total: i32 = result.path_sizes.iter().sum();
        assert_eq!(result.vertex_paths.len(), total as usize);
        assert_eq!(
            result.edge_weights.len(),
            result.vertex_paths.len() - result.path_sizes.len()
        );
        assert!(result.path_sizes.iter().all(|&n| n >= 1 && n <= 3));
    }

    #[test]
    fn test_node2vec_rejects_bad_depth_and_unknown_vertex() {
        let engine = MemoryEngine::new();
        let g = Graph::new(false);
        assert!(matches!(
            engine.node2vec(&g, &[0], 0),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            engine.node2vec(&g, &[42], 2),
            Err(EngineError::UnknownVertex(42))
        ));
    }
}
