//! Shared fixtures for the integration tests.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use graphserve::api::GraphServiceHandler;
use graphserve::engine::table::{Cell, DataTable};
use graphserve::engine::{EdgeDataOptions, GraphHandle, MemoryEngine, PropertyGraph};
use graphserve::extensions::{CallArgs, ExtensionFn, StaticTableLoader};

/// Stem of the fixture extension module; directory scans look for files named
/// `<stem>.so`.
pub const EXTENSION_MODULE_STEM: &str = "my_graph_creation_extension";

/// Number of rows in the fixture edge CSV.
pub const FIXTURE_EDGE_ROWS: usize = 156;

/// Write a small social-network style edge list: 34 vertices on a ring with
/// two chord patterns, each undirected edge written once per direction.
/// 78 distinct pairs, 156 rows, space delimited, no header.
pub fn write_edge_csv(dir: &Path) -> PathBuf {
    let mut pairs: Vec<(i64, i64)> = Vec::new();
    for i in 0..34 {
        pairs.push((i, (i + 1) % 34));
        pairs.push((i, (i + 2) % 34));
    }
    for i in 0..10 {
        pairs.push((i, (i + 7) % 34));
    }
    assert_eq!(pairs.len(), 78);

    let path = dir.join("edges.csv");
    let mut file = fs::File::create(&path).expect("Failed to create fixture CSV");
    for (a, b) in pairs {
        writeln!(file, "{a} {b} 1.0").expect("Failed to write fixture CSV");
        writeln!(file, "{b} {a} 1.0").expect("Failed to write fixture CSV");
    }
    path
}

/// Function table for the fixture extension module. The public function takes
/// two string arguments naming the endpoint columns and returns a two-edge
/// property graph; the private one must never be callable.
pub fn fixture_extension_table() -> Vec<(String, ExtensionFn)> {
    let create: ExtensionFn = Arc::new(|args: &CallArgs| {
        let src_col = args.str_arg(0)?.to_string();
        let dst_col = args.str_arg(1)?.to_string();

        let mut table = DataTable::new(vec![src_col.clone(), dst_col.clone()]);
        for (s, d) in [(0, 1), (88, 99)] {
            table
                .push_row(vec![Cell::Int(s), Cell::Int(d)])
                .map_err(|e| e.to_string())?;
        }

        let mut pg = PropertyGraph::new();
        let options = EdgeDataOptions {
            vertex_col_names: vec![src_col, dst_col],
            type_name: String::new(),
            property_columns: Vec::new(),
        };
        pg.add_edge_table(table, &options).map_err(|e| e.to_string())?;
        Ok(GraphHandle::Property(pg))
    });

    let private: ExtensionFn =
        Arc::new(|_args: &CallArgs| Ok(GraphHandle::Property(PropertyGraph::new())));

    vec![
        ("my_graph_creation_function".to_string(), create),
        ("__my_private_function".to_string(), private),
    ]
}

/// Create a directory entry the extension scan will pick up for the fixture
/// module.
pub fn touch_extension_file(dir: &Path) {
    let path = dir.join(format!("{EXTENSION_MODULE_STEM}.so"));
    fs::File::create(path).expect("Failed to create extension file");
}

/// Handler wired to the in-memory engine and the fixture extension table.
pub fn test_handler() -> GraphServiceHandler<MemoryEngine> {
    let mut loader = StaticTableLoader::new();
    loader.register(EXTENSION_MODULE_STEM, fixture_extension_table());
    GraphServiceHandler::new(Arc::new(MemoryEngine::new()), Box::new(loader))
}
