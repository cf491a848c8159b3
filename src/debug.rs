use std::fmt;

use serde::Serialize;

use crate::{aabb::Aabb, octree::Octree};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: u32,
    /// Objects summed over every node, duplicates included.
    pub residents: usize,
}

impl<T> Octree<T> {
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();

        for view in self.iter_nodes() {
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(view.depth);
            stats.residents += view.objects.len();

            if !view.has_children {
                stats.leaves += 1;
            }
        }

        stats
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} leaves, depth {}, {} residents",
            self.nodes, self.leaves, self.max_depth, self.residents
        )
    }
}

/// Indented textual dump of a tree, one line per node followed by the boxes
/// resident in it.
pub struct TreeDump<'a, T>(pub &'a Octree<T>);

fn write_bounds(f: &mut fmt::Formatter<'_>, bounds: &Aabb) -> fmt::Result {
    let [x0, y0, z0] = bounds.min.to_array();
    let [x1, y1, z1] = bounds.max.to_array();
    write!(f, "({x0}, {y0}, {z0}) to ({x1}, {y1}, {z1})")
}

impl<T> fmt::Display for TreeDump<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let octree = self.0;

        for view in octree.iter_nodes() {
            let indent = "    ".repeat(view.depth as usize);

            write!(f, "{indent}node {} depth {}: ", view.id, view.depth)?;
            write_bounds(f, &view.bounds)?;
            writeln!(f, ", {} objects", view.objects.len())?;

            for &id in view.objects {
                write!(f, "{indent}  - object {id}: ")?;
                write_bounds(f, &octree.object(id).bounds)?;
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
