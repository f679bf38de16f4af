//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Nodes live in a flat arena and refer to their children by index, so the
//! whole hierarchy is one allocation for nodes plus the actor list it owns.

use crate::error::{RenderError, RenderResult};
use crate::hittable::{Actor, HitRecord, Hittable};
use lumen_math::{Aabb, Interval, Ray};
use rand::{Rng, RngCore};

/// Reference from a node to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    /// Index into the node arena
    Node(usize),
    /// Index into the actor list
    Actor(usize),
}

/// Internal node. Both children may name the same actor when a node covers
/// a single one.
#[derive(Debug, Clone, Copy)]
pub struct BvhNode {
    pub bbox: Aabb,
    pub left: Child,
    pub right: Child,
}

/// A BVH over a fixed set of actors.
pub struct Bvh {
    actors: Vec<Actor>,
    nodes: Vec<BvhNode>,
    root: Option<usize>,
}

impl Bvh {
    /// Build a BVH over `actors` for the shutter interval `[time0, time1]`.
    ///
    /// Every actor must have a bounding box; the first one without is
    /// reported by its position in `actors`. The split axis at each level
    /// is drawn from `rng`.
    pub fn new(
        actors: Vec<Actor>,
        time0: f64,
        time1: f64,
        rng: &mut dyn RngCore,
    ) -> RenderResult<Self> {
        let mut entries = actors
            .into_iter()
            .enumerate()
            .map(|(index, actor)| match actor.bounding_box(time0, time1) {
                Some(bbox) => Ok((actor, bbox)),
                None => Err(RenderError::UnboundedGeometry { index }),
            })
            .collect::<RenderResult<Vec<_>>>()?;

        let mut nodes = Vec::with_capacity(entries.len());
        let root = if entries.is_empty() {
            None
        } else {
            let span = entries.len();
            Some(build(&mut entries, 0, span, &mut nodes, rng))
        };

        let actors: Vec<Actor> = entries.into_iter().map(|(actor, _)| actor).collect();
        let bvh = Self { actors, nodes, root };
        log::debug!(
            "Built BVH: {} actors, {} nodes, depth {}",
            bvh.len(),
            bvh.node_count(),
            bvh.depth()
        );
        Ok(bvh)
    }

    /// Number of indexed actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Number of internal nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Longest root-to-leaf path counted in nodes. Zero when empty.
    pub fn depth(&self) -> usize {
        self.root.map_or(0, |root| self.node_depth(root))
    }

    fn node_depth(&self, index: usize) -> usize {
        let node = &self.nodes[index];
        let child_depth = |child: Child| match child {
            Child::Node(i) => self.node_depth(i),
            Child::Actor(_) => 0,
        };
        1 + child_depth(node.left).max(child_depth(node.right))
    }

    fn hit_child<'a>(
        &'a self,
        child: Child,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        match child {
            Child::Node(index) => self.hit_node(index, ray, ray_t, rng),
            Child::Actor(index) => self.actors[index].hit(ray, ray_t, rng),
        }
    }

    fn hit_node<'a>(
        &'a self,
        index: usize,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let node = &self.nodes[index];
        if !node.bbox.hit(ray, ray_t) {
            return None;
        }

        let left = self.hit_child(node.left, ray, ray_t, rng);
        if node.right == node.left {
            return left;
        }

        // Only check right up to closest hit
        let right_max = left.as_ref().map_or(ray_t.max, |rec| rec.t);
        self.hit_child(node.right, ray, ray_t.with_max(right_max), rng)
            .or(left)
    }
}

/// Build the subtree over `entries[start..end]` and return its node index.
fn build(
    entries: &mut [(Actor, Aabb)],
    start: usize,
    end: usize,
    nodes: &mut Vec<BvhNode>,
    rng: &mut dyn RngCore,
) -> usize {
    let span = end - start;
    let axis = rng.gen_range(0..3);

    let (left, right) = match span {
        1 => (Child::Actor(start), Child::Actor(start)),
        2 => {
            if entries[start + 1].1.axis_min(axis) < entries[start].1.axis_min(axis) {
                entries.swap(start, start + 1);
            }
            (Child::Actor(start), Child::Actor(start + 1))
        }
        _ => {
            entries[start..end].sort_by(|a, b| a.1.axis_min(axis).total_cmp(&b.1.axis_min(axis)));
            let mid = start + span / 2;
            (
                Child::Node(build(entries, start, mid, nodes, rng)),
                Child::Node(build(entries, mid, end, nodes, rng)),
            )
        }
    };

    let bbox = Aabb::surrounding(
        &child_box(left, entries, nodes),
        &child_box(right, entries, nodes),
    );

    nodes.push(BvhNode { bbox, left, right });
    nodes.len() - 1
}

fn child_box(child: Child, entries: &[(Actor, Aabb)], nodes: &[BvhNode]) -> Aabb {
    match child {
        Child::Node(i) => nodes[i].bbox,
        Child::Actor(i) => entries[i].1,
    }
}

impl Hittable for Bvh {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        self.hit_node(self.root?, ray, ray_t, rng)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        self.root.map(|root| self.nodes[root].bbox)
    }
}
