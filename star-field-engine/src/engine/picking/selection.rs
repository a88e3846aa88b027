use crate::engine::catalog::{CelestialObject, Star};
use bevy::prelude::*;

/// What the user is inspecting. At most one of the two is set.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Selection {
    star: Option<Star>,
    object: Option<CelestialObject>,
}

/// Result of one pick against the current scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickHits<'a> {
    pub star: Option<&'a Star>,
    pub object: Option<&'a CelestialObject>,
    /// Whether a solar-system group was in the scene to test against.
    pub solar_tested: bool,
}

impl Selection {
    pub fn star(&self) -> Option<&Star> {
        self.star.as_ref()
    }

    pub fn object(&self) -> Option<&CelestialObject> {
        self.object.as_ref()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.star.is_none() && self.object.is_none()
    }

    pub fn select_star(&mut self, star: Star) {
        self.star = Some(star);
        self.object = None;
    }

    pub fn select_object(&mut self, object: CelestialObject) {
        self.object = Some(object);
        self.star = None;
    }

    /// Drop the object selection, keeping any selected star.
    pub fn clear_object(&mut self) {
        self.object = None;
    }

    pub fn clear(&mut self) {
        self.star = None;
        self.object = None;
    }

    /// Fold a pick into the selection.
    ///
    /// The solar-system test runs first and the star test second, so a star
    /// hit overrides an object hit. A star miss keeps the current star while
    /// a pointer button is held; an object miss always clears the object.
    /// Returns the constellation code of a newly hit star, if it has one.
    pub fn apply_pick(&mut self, hits: PickHits, pointer_held: bool) -> Option<String> {
        if hits.solar_tested {
            match hits.object {
                Some(object) => self.select_object(object.clone()),
                None => self.clear_object(),
            }
        }

        match hits.star {
            Some(star) => {
                self.select_star(star.clone());
                star.constellation_code.clone()
            }
            None => {
                if !pointer_held {
                    self.star = None;
                }
                None
            }
        }
    }
}
