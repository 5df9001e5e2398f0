//! Scene container: owns primitives and lights and answers ray queries.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{HitRecord, Hittable, Light, Primitive};
use prism_math::{Interval, Point3, Ray};

/// Shadow rays start this far along the ray to skip the surface they leave.
pub const SHADOW_EPSILON: f64 = 0.001;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a `Scene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(u64);

/// Index of a primitive within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Index of a light within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub usize);

/// A collection of primitives and lights.
///
/// The scene takes ownership of everything added to it. It is only read
/// during rendering, so `&Scene` is shared freely across worker threads.
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    objects: Vec<Primitive>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            id: SceneId(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed)),
            objects: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Add a primitive and return its ID.
    ///
    /// # Panics
    ///
    /// If the primitive already belongs to a different scene.
    pub fn add_object(&mut self, mut object: Primitive) -> ObjectId {
        assert!(
            object.parent.map_or(true, |parent| parent == self.id),
            "add_object: primitive belongs to {:?}, not {:?}",
            object.parent,
            self.id
        );
        object.parent = Some(self.id);
        self.objects.push(object);
        log::debug!("Scene {:?}: added object #{}", self.id, self.objects.len() - 1);
        ObjectId(self.objects.len() - 1)
    }

    /// Add a light and return its ID.
    ///
    /// # Panics
    ///
    /// If the light already belongs to a different scene.
    pub fn add_light(&mut self, mut light: Light) -> LightId {
        assert!(
            light.parent.map_or(true, |parent| parent == self.id),
            "add_light: light belongs to {:?}, not {:?}",
            light.parent,
            self.id
        );
        light.parent = Some(self.id);
        self.lights.push(light);
        log::debug!("Scene {:?}: added light #{}", self.id, self.lights.len() - 1);
        LightId(self.lights.len() - 1)
    }

    /// Remove all objects and lights.
    pub fn clear(&mut self) {
        log::debug!(
            "Scene {:?}: clearing {} objects, {} lights",
            self.id,
            self.objects.len(),
            self.lights.len()
        );
        self.objects.clear();
        self.lights.clear();
    }

    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn object(&self, id: ObjectId) -> Option<&Primitive> {
        self.objects.get(id.0)
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Flag or unflag a primitive as selected. Returns false for an unknown ID.
    pub fn set_selected(&mut self, id: ObjectId, selected: bool) -> bool {
        match self.objects.get_mut(id.0) {
            Some(object) => {
                object.set_selected(selected);
                true
            }
            None => false,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.objects.iter().any(Primitive::is_selected)
    }

    /// Closest intersection within `ray_t`.
    ///
    /// With `expanded` set, a second sweep runs `hit_expanded` over every
    /// primitive with its own shrinking bound, and the nearer of the two
    /// results wins. Ties go to the ordinary hit.
    pub fn hit_closest<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        expanded: bool,
    ) -> Option<HitRecord<'a>> {
        let ordinary = self.sweep(ray, ray_t, |object, ray, interval| object.hit(ray, interval));
        if !expanded {
            return ordinary;
        }

        let enlarged = self.sweep(ray, ray_t, |object, ray, interval| {
            object.hit_expanded(ray, interval)
        });
        match (ordinary, enlarged) {
            (Some(a), Some(b)) if b.t < a.t => Some(b),
            (Some(a), _) => Some(a),
            (None, b) => b,
        }
    }

    /// True if anything blocks the segment from `point` to `target`.
    pub fn is_occluded(&self, point: Point3, target: Point3) -> bool {
        let to_target = target - point;
        let distance = to_target.length();
        if distance <= SHADOW_EPSILON {
            return false;
        }

        let ray = Ray::new(point, to_target / distance);
        let interval = Interval::new(SHADOW_EPSILON, distance);
        self.objects
            .iter()
            .any(|object| object.hit(&ray, interval).is_some())
    }

    fn sweep<'a, F>(&'a self, ray: &Ray, ray_t: Interval, hit: F) -> Option<HitRecord<'a>>
    where
        F: Fn(&'a Primitive, &Ray, Interval) -> Option<HitRecord<'a>>,
    {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = hit(object, ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        self.hit_closest(ray, ray_t, false)
    }
}
