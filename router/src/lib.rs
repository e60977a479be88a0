pub mod algo;
pub mod merge_tree;
pub mod rectilinear;
pub mod spanning_graph;
pub mod steiner;

use rsmt_common::db::core::RouteDB;
use rsmt_common::util::config::RouterConfig;

pub fn route(db: &mut RouteDB, config: &RouterConfig) -> Result<(), String> {
    if db.num_pins() == 0 {
        return Err("no pins to route".to_string());
    }

    log::info!("Starting Spanning Graph Construction...");
    let graph = spanning_graph::build(db);
    log::info!(
        "Spanning graph: {} candidate edges over {} pins",
        graph.len(),
        db.num_pins()
    );

    log::info!("Starting Spanning Tree Construction...");
    let mst = merge_tree::build(db, graph)?;
    log::info!(
        "MST: {} edges, {} swap queries",
        mst.edges.len(),
        mst.queries.len()
    );

    let mut tree = if config.steiner_refinement {
        log::info!("Starting Steiner Refinement...");
        steiner::improve(db, mst.edges, mst.queries)
    } else {
        mst.edges
    };

    if config.rectilinearize {
        log::info!("Starting Rectilinearization...");
        rectilinear::run(db, &mut tree);
    }

    db.tree = tree;
    Ok(())
}
