//! Scene geometry and ray queries
//!
//! The propagator only sees the `SceneQuery` trait. `ColliderScene` is the
//! shipped implementation: a flat list of tagged colliders with stable ids,
//! queried by analytic ray/shape intersection tests.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hit::{EntityId, RayHit, Surface};
use super::ray::Ray;
use crate::consts::MIN_HIT_DISTANCE;

/// Failure to query the scene at all.
///
/// Expected outcomes (miss, absorb, reflect) are never errors; this only
/// covers the scene itself being unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// The scene has been torn down, e.g. a level unload mid-frame
    SceneInvalid,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::SceneInvalid => write!(f, "scene is invalid or disposed"),
        }
    }
}

impl std::error::Error for QueryError {}

/// Ray queries against scene geometry.
///
/// Implementations must return every hit within `max_distance`, ordered by
/// distance ascending with a stable order for equidistant hits, so the
/// caller can filter and re-rank. `ignore` suppresses all hits on that
/// entity for this query only.
pub trait SceneQuery {
    fn query_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        ignore: Option<EntityId>,
    ) -> Result<Vec<RayHit>, QueryError>;
}

/// Collider geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Straight wall strip between two endpoints
    Segment { a: Vec2, b: Vec2 },
    /// Round obstacle
    Circle { center: Vec2, radius: f32 },
}

impl Shape {
    /// Nearest intersection of `ray` with this shape within `max_distance`.
    ///
    /// Returns the hit distance and the unit surface normal facing the
    /// incoming ray. Hits closer than `MIN_HIT_DISTANCE` are contact noise
    /// and discarded.
    fn intersect(&self, ray: &Ray, max_distance: f32) -> Option<(f32, Vec2)> {
        match *self {
            Shape::Segment { a, b } => segment_intersect(ray, a, b, max_distance),
            Shape::Circle { center, radius } => circle_intersect(ray, center, radius, max_distance),
        }
    }
}

/// Ray vs wall strip.
///
/// Solves origin + t*dir = a + u*(b - a) with the 2D cross product,
/// requiring t in (MIN_HIT_DISTANCE, max_distance] and u in [0, 1].
fn segment_intersect(ray: &Ray, a: Vec2, b: Vec2, max_distance: f32) -> Option<(f32, Vec2)> {
    let edge = b - a;
    let denom = ray.direction.perp_dot(edge);
    if denom.abs() < 1e-9 {
        // Parallel (or degenerate edge)
        return None;
    }

    let ao = a - ray.origin;
    let t = ao.perp_dot(edge) / denom;
    let u = ao.perp_dot(ray.direction) / denom;

    if t <= MIN_HIT_DISTANCE || t > max_distance || !(0.0..=1.0).contains(&u) {
        return None;
    }

    let mut normal = edge.perp().normalize();
    if normal.dot(ray.direction) > 0.0 {
        normal = -normal;
    }
    Some((t, normal))
}

/// Ray vs circle, via the reduced quadratic.
///
/// Takes the nearer root when it is in range, otherwise the far one (ray
/// starting inside the circle). The normal is flipped to face the ray.
fn circle_intersect(ray: &Ray, center: Vec2, radius: f32, max_distance: f32) -> Option<(f32, Vec2)> {
    let oc = center - ray.origin;
    let h = ray.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;
    let discriminant = h * h - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let mut t = h - sqrtd;
    if t <= MIN_HIT_DISTANCE || t > max_distance {
        t = h + sqrtd;
        if t <= MIN_HIT_DISTANCE || t > max_distance {
            return None;
        }
    }

    let mut normal = (ray.at(t) - center) / radius;
    if normal.dot(ray.direction) > 0.0 {
        normal = -normal;
    }
    Some((t, normal))
}

/// A tagged collider in the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub id: EntityId,
    pub shape: Shape,
    pub surface: Surface,
}

/// Flat collider list with stable ids (kept sorted for determinism).
///
/// Serializable so puzzle layouts round-trip through JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderScene {
    colliders: Vec<Collider>,
    next_id: u32,
    /// Set when the owning level tears the scene down; queries then fail
    #[serde(skip)]
    invalid: bool,
}

impl Default for ColliderScene {
    fn default() -> Self {
        Self::new()
    }
}

impl ColliderScene {
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
            next_id: 1,
            invalid: false,
        }
    }

    /// Add a collider, returning its id
    pub fn add(&mut self, shape: Shape, surface: Surface) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.colliders.push(Collider { id, shape, surface });
        id
    }

    /// Remove a collider by id. Returns false if no such collider exists.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.colliders.len();
        self.colliders.retain(|c| c.id != id);
        self.colliders.len() != before
    }

    /// Colliders in id order
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Mark the scene as torn down; all further queries fail
    pub fn invalidate(&mut self) {
        self.invalid = true;
    }

    pub fn is_valid(&self) -> bool {
        !self.invalid
    }
}

impl SceneQuery for ColliderScene {
    fn query_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        ignore: Option<EntityId>,
    ) -> Result<Vec<RayHit>, QueryError> {
        if self.invalid {
            return Err(QueryError::SceneInvalid);
        }

        let Some(ray) = Ray::new(origin, direction) else {
            return Ok(Vec::new());
        };

        let mut hits = Vec::new();
        for collider in &self.colliders {
            if ignore == Some(collider.id) {
                continue;
            }
            if let Some((distance, normal)) = collider.shape.intersect(&ray, max_distance) {
                // Terminators absorb; their normal is never used
                let normal = match collider.surface {
                    Surface::Terminator => Vec2::ZERO,
                    _ => normal,
                };
                hits.push(RayHit {
                    entity: collider.id,
                    point: ray.at(distance),
                    normal,
                    distance,
                    surface: collider.surface,
                });
            }
        }

        // Stable sort: equidistant hits keep id order
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::hit::ReflectorKind;

    fn mirror() -> Surface {
        Surface::Reflective(ReflectorKind::Mirror)
    }

    fn vertical_wall(x: f32) -> Shape {
        Shape::Segment {
            a: Vec2::new(x, -10.0),
            b: Vec2::new(x, 10.0),
        }
    }

    #[test]
    fn test_segment_hit_and_normal_faces_ray() {
        let mut scene = ColliderScene::new();
        scene.add(vertical_wall(5.0), mirror());

        let hits = scene
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 5.0).abs() < 1e-5);
        assert!((hits[0].point - Vec2::new(5.0, 0.0)).length() < 1e-5);
        assert!((hits[0].normal - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_segment_miss_beyond_endpoints() {
        let mut scene = ColliderScene::new();
        scene.add(vertical_wall(5.0), mirror());

        // Aimed above the wall's top endpoint
        let hits = scene
            .query_ray(Vec2::new(0.0, 20.0), Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_parallel_ray_misses_segment() {
        let mut scene = ColliderScene::new();
        scene.add(vertical_wall(5.0), mirror());

        let hits = scene
            .query_ray(Vec2::ZERO, Vec2::new(0.0, 1.0), 100.0, None)
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_circle_hit_near_root() {
        let mut scene = ColliderScene::new();
        scene.add(
            Shape::Circle {
                center: Vec2::new(10.0, 0.0),
                radius: 2.0,
            },
            mirror(),
        );

        let hits = scene
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 8.0).abs() < 1e-5);
        assert!((hits[0].normal - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_circle_from_inside_uses_far_root() {
        let mut scene = ColliderScene::new();
        scene.add(
            Shape::Circle {
                center: Vec2::ZERO,
                radius: 5.0,
            },
            mirror(),
        );

        let hits = scene
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 5.0).abs() < 1e-5);
        // Flipped to face the ray coming from inside
        assert!((hits[0].normal - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_hits_sorted_by_distance() {
        let mut scene = ColliderScene::new();
        let far = scene.add(vertical_wall(8.0), mirror());
        let near = scene.add(vertical_wall(3.0), mirror());

        let hits = scene
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, near);
        assert_eq!(hits[1].entity, far);
    }

    #[test]
    fn test_equidistant_hits_keep_id_order() {
        let mut scene = ColliderScene::new();
        let first = scene.add(vertical_wall(5.0), mirror());
        let second = scene.add(vertical_wall(5.0), Surface::Terminator);

        let hits = scene
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, first);
        assert_eq!(hits[1].entity, second);
    }

    #[test]
    fn test_ignore_excludes_entity() {
        let mut scene = ColliderScene::new();
        let wall = scene.add(vertical_wall(5.0), mirror());

        // Just shy of the surface: present without ignore, gone with it
        let origin = Vec2::new(4.999, 0.0);
        let hits = scene
            .query_ray(origin, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert_eq!(hits.len(), 1);

        let hits = scene
            .query_ray(origin, Vec2::new(1.0, 0.0), 100.0, Some(wall))
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_max_distance_cutoff() {
        let mut scene = ColliderScene::new();
        scene.add(vertical_wall(50.0), mirror());

        let hits = scene
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 10.0, None)
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_terminator_hit_has_zero_normal() {
        let mut scene = ColliderScene::new();
        scene.add(vertical_wall(5.0), Surface::Terminator);

        let hits = scene
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].normal, Vec2::ZERO);
    }

    #[test]
    fn test_invalidated_scene_fails_queries() {
        let mut scene = ColliderScene::new();
        scene.add(vertical_wall(5.0), mirror());
        scene.invalidate();

        let result = scene.query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None);
        assert_eq!(result, Err(QueryError::SceneInvalid));
    }

    #[test]
    fn test_remove_collider() {
        let mut scene = ColliderScene::new();
        let wall = scene.add(vertical_wall(5.0), mirror());
        assert!(scene.remove(wall));
        assert!(!scene.remove(wall));

        let hits = scene
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_scene_json_round_trip() {
        let mut scene = ColliderScene::new();
        scene.add(vertical_wall(5.0), mirror());
        scene.add(
            Shape::Circle {
                center: Vec2::new(10.0, 3.0),
                radius: 2.0,
            },
            Surface::Terminator,
        );

        let json = serde_json::to_string(&scene).unwrap();
        let restored: ColliderScene = serde_json::from_str(&json).unwrap();

        let a = scene
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        let b = restored
            .query_ray(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, None)
            .unwrap();
        assert_eq!(a, b);
    }
}
