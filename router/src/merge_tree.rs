use crate::algo::dsu::DisjointSet;
use rsmt_common::db::core::{Edge, RouteDB};
use rsmt_common::db::indices::PinId;
use rsmt_common::geom::rect::Rect;
use rsmt_common::util::profiler::StageTimer;

// A candidate swap: w is graph-adjacent to u, an endpoint of the accepted
// tree edge c_edge. If w attaches to c_edge directly, the heaviest tree
// edge on the w-u path (d_edge) becomes removable.
pub struct Query {
    pub w: PinId,
    pub u: PinId,
    pub c_edge: Edge,
    pub d_edge: Option<Edge>,
    pub gain: i64,
    hits: u8,
}

pub struct Mst {
    pub edges: Vec<Edge>,
    pub queries: Vec<Query>,
}

#[derive(Clone, Copy)]
struct MergeNode {
    edge: Edge,
    left: usize,
    right: usize,
}

// Binary history of component merges. Leaves are the pins (node ids
// 0..num_pins); internal nodes continue the id space in creation order,
// one per accepted edge. Kruskal accepts edges by ascending cost, so the
// deeper of two internal nodes always carries the cheaper edge; the lowest
// common ancestor of two leaves is the heaviest edge on their tree path.
pub struct MergeTree {
    num_pins: usize,
    components: DisjointSet,
    merge_root: Vec<usize>,
    nodes: Vec<MergeNode>,
    queries: Vec<Query>,
    pin_queries: Vec<Vec<usize>>,
}

impl MergeTree {
    pub fn new(num_pins: usize) -> Self {
        Self {
            num_pins,
            components: DisjointSet::new(num_pins),
            merge_root: (0..num_pins).collect(),
            nodes: Vec::with_capacity(num_pins.saturating_sub(1)),
            queries: Vec::new(),
            pin_queries: vec![Vec::new(); num_pins],
        }
    }

    pub fn same_component(&mut self, s: PinId, t: PinId) -> bool {
        self.components.same_set(s.index(), t.index())
    }

    pub fn add_query(&mut self, w: PinId, u: PinId, c_edge: Edge) {
        let id = self.queries.len();
        self.queries.push(Query {
            w,
            u,
            c_edge,
            d_edge: None,
            gain: 0,
            hits: 0,
        });
        self.pin_queries[w.index()].push(id);
        self.pin_queries[u.index()].push(id);
    }

    pub fn record_merge(&mut self, edge: Edge) {
        let x = self.components.find(edge.s.index());
        let y = self.components.find(edge.t.index());
        debug_assert_ne!(x, y);
        let node = self.num_pins + self.nodes.len();
        self.nodes.push(MergeNode {
            edge,
            left: self.merge_root[x],
            right: self.merge_root[y],
        });
        let winner = self.components.union(x, y);
        self.merge_root[winner] = node;
    }

    // Tarjan-style offline LCA over the merge tree, then gain scoring.
    fn resolve(&mut self, db: &RouteDB) {
        if !self.nodes.is_empty() {
            let total = self.num_pins + self.nodes.len();
            let mut lca_parent: Vec<usize> = (0..total).collect();

            // Iterative post-order from the final merge. Once a child
            // subtree is fully visited its root is linked to the parent, so
            // a find from any visited leaf lands on the deepest ancestor
            // whose subtree is still open.
            let mut stack = vec![(total - 1, 0u8)];
            while let Some((node, state)) = stack.pop() {
                if node < self.num_pins {
                    self.visit_leaf(node, &mut lca_parent);
                    continue;
                }
                let MergeNode { left, right, .. } = self.nodes[node - self.num_pins];
                match state {
                    0 => {
                        stack.push((node, 1));
                        stack.push((left, 0));
                    }
                    1 => {
                        lca_parent[left] = node;
                        stack.push((node, 2));
                        stack.push((right, 0));
                    }
                    _ => {
                        lca_parent[right] = node;
                    }
                }
            }
        }

        for query in &mut self.queries {
            let d_edge = query
                .d_edge
                .expect("offline LCA pass left a query unresolved");
            if d_edge == query.c_edge {
                // removing and re-adding the same edge is a no-op swap
                query.gain = -1;
                continue;
            }
            let span = Rect::bounding(
                db.position(query.c_edge.s),
                db.position(query.c_edge.t),
            );
            query.gain = d_edge.cost - span.manhattan_to(db.position(query.w));
        }
    }

    fn visit_leaf(&mut self, leaf: usize, lca_parent: &mut [usize]) {
        for i in 0..self.pin_queries[leaf].len() {
            let q = self.pin_queries[leaf][i];
            let query = &mut self.queries[q];
            query.hits += 1;
            if query.hits == 2 {
                // both endpoints visited: the other endpoint's current
                // representative is the lowest common ancestor
                let other = if query.w.index() == leaf {
                    query.u
                } else {
                    query.w
                };
                let lca = find_compress(lca_parent, other.index());
                query.d_edge = Some(self.nodes[lca - self.num_pins].edge);
            }
        }
    }
}

fn find_compress(parent: &mut [usize], x: usize) -> usize {
    let mut root = x;
    while parent[root] != root {
        root = parent[root];
    }
    let mut node = x;
    while parent[node] != node {
        let next = parent[node];
        parent[node] = root;
        node = next;
    }
    root
}

pub fn build(db: &RouteDB, mut graph: Vec<Edge>) -> Result<Mst, String> {
    let _timer = StageTimer::start("Spanning tree construction");

    let n = db.num_pins();

    // adjacency over the candidate graph, in emission order
    let mut adj: Vec<Vec<PinId>> = vec![Vec::new(); n];
    for edge in &graph {
        adj[edge.s.index()].push(edge.t);
        adj[edge.t.index()].push(edge.s);
    }

    // stable sort: equal costs keep emission order
    graph.sort_by_key(|e| e.cost);

    let mut tree = MergeTree::new(n);
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    for &edge in &graph {
        if edges.len() + 1 == n {
            break;
        }
        if tree.same_component(edge.s, edge.t) {
            continue;
        }
        edges.push(edge);
        for &w in &adj[edge.s.index()] {
            if w != edge.t {
                tree.add_query(w, edge.s, edge);
            }
        }
        for &w in &adj[edge.t.index()] {
            if w != edge.s {
                tree.add_query(w, edge.t, edge);
            }
        }
        tree.record_merge(edge);
    }

    if edges.len() + 1 < n {
        return Err(format!(
            "spanning graph is disconnected: {} edges accepted for {} pins",
            edges.len(),
            n
        ));
    }

    tree.resolve(db);
    Ok(Mst {
        edges,
        queries: tree.queries,
    })
}
