use std::collections::HashMap;

use crate::error::{GenerationError, Result};

/// A triangle mesh whose triangles are deactivated, never removed.
///
/// Triangles and edges live in fixed arrays addressed by index. Each edge
/// keeps a count of the active triangles using it, so an edge is on the
/// boundary exactly when its count is 1.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertex_count: usize,
    triangles: Vec<[usize; 3]>,
    active: Vec<bool>,
    edges: Vec<(usize, usize)>,
    triangle_edges: Vec<[usize; 3]>,
    edge_use: Vec<u8>,
}

impl Mesh {
    /// Builds the mesh with every triangle active.
    #[must_use]
    pub fn new(vertex_count: usize, triangles: Vec<[usize; 3]>) -> Self {
        let mut lookup: HashMap<(usize, usize), usize> = HashMap::new();
        let mut edges = Vec::new();
        let mut edge_use: Vec<u8> = Vec::new();
        let mut triangle_edges = Vec::with_capacity(triangles.len());

        for tri in &triangles {
            let mut ids = [0usize; 3];
            for (k, id) in ids.iter_mut().enumerate() {
                let (a, b) = (tri[k], tri[(k + 1) % 3]);
                let key = (a.min(b), a.max(b));
                *id = *lookup.entry(key).or_insert_with(|| {
                    edges.push(key);
                    edge_use.push(0);
                    edges.len() - 1
                });
                edge_use[*id] = edge_use[*id].saturating_add(1);
            }
            triangle_edges.push(ids);
        }

        Self {
            vertex_count,
            active: vec![true; triangles.len()],
            triangles,
            edges,
            triangle_edges,
            edge_use,
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    #[must_use]
    pub fn is_active(&self, tri: usize) -> bool {
        self.active[tri]
    }

    /// Number of edges of `tri` that lie on the current boundary.
    #[must_use]
    pub fn boundary_edge_count(&self, tri: usize) -> usize {
        self.triangle_edges[tri]
            .iter()
            .filter(|&&e| self.edge_use[e] == 1)
            .count()
    }

    /// Marks every vertex touched by a boundary edge.
    #[must_use]
    pub fn boundary_vertices(&self) -> Vec<bool> {
        let mut on = vec![false; self.vertex_count];
        for (e, &(a, b)) in self.edges.iter().enumerate() {
            if self.edge_use[e] == 1 {
                on[a] = true;
                on[b] = true;
            }
        }
        on
    }

    /// An active triangle with exactly one boundary edge whose opposite
    /// vertex is interior. Removing it grows the boundary by one vertex and
    /// keeps it a single simple cycle.
    #[must_use]
    pub fn is_peelable(&self, tri: usize, on_boundary: &[bool]) -> bool {
        if !self.active[tri] {
            return false;
        }
        let ids = self.triangle_edges[tri];
        let boundary: Vec<usize> = (0..3).filter(|&k| self.edge_use[ids[k]] == 1).collect();
        let [k] = boundary[..] else {
            return false;
        };
        // Edge k joins tri[k] and tri[k + 1]; the apex is the remaining corner.
        let apex = self.triangles[tri][(k + 2) % 3];
        !on_boundary[apex]
    }

    /// Indices of every peelable triangle, ascending.
    #[must_use]
    pub fn peelable(&self) -> Vec<usize> {
        let on_boundary = self.boundary_vertices();
        (0..self.triangles.len())
            .filter(|&t| self.is_peelable(t, &on_boundary))
            .collect()
    }

    /// Deactivates a triangle, exposing its interior edges.
    pub fn deactivate(&mut self, tri: usize) {
        if !self.active[tri] {
            return;
        }
        self.active[tri] = false;
        for &e in &self.triangle_edges[tri] {
            self.edge_use[e] = self.edge_use[e].saturating_sub(1);
        }
    }

    /// Chains the boundary edges of the active mesh into one ordered cycle.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::MalformedBoundary` when the boundary is
    /// empty, branches, splits into several cycles, or fails to close within
    /// `2 * vertex_count` hops.
    pub fn boundary(&self) -> Result<Vec<usize>> {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.vertex_count];
        let mut start = None;
        for (e, &(a, b)) in self.edges.iter().enumerate() {
            if self.edge_use[e] != 1 {
                continue;
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
            start.get_or_insert(a);
        }
        let Some(start) = start else {
            return Err(GenerationError::MalformedBoundary("no boundary edges".to_owned()).into());
        };
        if let Some(v) = adjacency.iter().position(|n| !n.is_empty() && n.len() != 2) {
            return Err(GenerationError::MalformedBoundary(format!(
                "vertex {v} has {} boundary neighbours",
                adjacency[v].len()
            ))
            .into());
        }
        let expected = adjacency.iter().filter(|n| !n.is_empty()).count();

        let mut visited = vec![false; self.vertex_count];
        let mut cycle = vec![start];
        visited[start] = true;
        let mut prev = start;
        let mut cur = adjacency[start][0];
        let hop_budget = 2 * self.vertex_count;
        for _ in 0..hop_budget {
            if cur == start {
                if cycle.len() == expected {
                    return Ok(cycle);
                }
                return Err(GenerationError::MalformedBoundary(format!(
                    "cycle closed after {} of {expected} boundary vertices",
                    cycle.len()
                ))
                .into());
            }
            if visited[cur] {
                return Err(GenerationError::MalformedBoundary(format!(
                    "vertex {cur} revisited"
                ))
                .into());
            }
            visited[cur] = true;
            cycle.push(cur);
            let next = if adjacency[cur][0] == prev {
                adjacency[cur][1]
            } else {
                adjacency[cur][0]
            };
            prev = cur;
            cur = next;
        }
        Err(GenerationError::MalformedBoundary("hop budget exhausted".to_owned()).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Square 0-1-2-3 with centre 4, fanned into four triangles.
    fn fan() -> Mesh {
        Mesh::new(5, vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]])
    }

    #[test]
    fn fan_boundary_is_the_square() {
        let mesh = fan();
        let cycle = mesh.boundary().unwrap();
        assert_eq!(cycle.len(), 4);
        assert!(!cycle.contains(&4));
    }

    #[test]
    fn fan_triangles_each_have_one_boundary_edge() {
        let mesh = fan();
        for t in 0..4 {
            assert_eq!(mesh.boundary_edge_count(t), 1);
        }
        assert_eq!(mesh.peelable(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn peeling_exposes_apex() {
        let mut mesh = fan();
        mesh.deactivate(0);
        assert_eq!(mesh.active_count(), 3);
        let cycle = mesh.boundary().unwrap();
        assert_eq!(cycle.len(), 5);
        assert!(cycle.contains(&4));
        // Apex is on the boundary now: nothing else is peelable.
        assert!(mesh.peelable().is_empty());
    }

    #[test]
    fn pinched_boundary_is_malformed() {
        // Two triangles sharing only vertex 2.
        let mesh = Mesh::new(5, vec![[0, 1, 2], [2, 3, 4]]);
        assert!(mesh.boundary().is_err());
    }

    #[test]
    fn disconnected_cycles_are_malformed() {
        let mesh = Mesh::new(6, vec![[0, 1, 2], [3, 4, 5]]);
        assert!(mesh.boundary().is_err());
    }

    #[test]
    fn empty_mesh_is_malformed() {
        let mut mesh = Mesh::new(3, vec![[0, 1, 2]]);
        mesh.deactivate(0);
        assert!(mesh.boundary().is_err());
    }

    #[test]
    fn two_boundary_edges_is_not_peelable() {
        // Strip 0-1-2-3: triangle [0,1,2] has two boundary edges.
        let mesh = Mesh::new(4, vec![[0, 1, 2], [1, 3, 2]]);
        let on = mesh.boundary_vertices();
        assert_eq!(mesh.boundary_edge_count(0), 2);
        assert!(!mesh.is_peelable(0, &on));
    }
}
