use crate::engine::catalog::Star;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Upper bound on the stars a single selector contributes.
pub const SELECTOR_LIMIT: usize = 50;

/// Apparent magnitude ceiling for the `closest` selector.
const NAKED_EYE_MAGNITUDE: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    Closest,
    Brightest,
    Hottest,
    Largest,
    Constellations,
    SolarSystem,
}

impl ViewMode {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "closest" => Some(Self::Closest),
            "brightest" => Some(Self::Brightest),
            "hottest" => Some(Self::Hottest),
            "largest" => Some(Self::Largest),
            "constellations" => Some(Self::Constellations),
            "solarSystem" => Some(Self::SolarSystem),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Closest => "closest",
            Self::Brightest => "brightest",
            Self::Hottest => "hottest",
            Self::Largest => "largest",
            Self::Constellations => "constellations",
            Self::SolarSystem => "solarSystem",
        }
    }

    /// The ranking this mode applies, if it is a selector mode.
    pub fn selector(self) -> Option<StarSelector> {
        match self {
            Self::Closest => Some(StarSelector::Closest),
            Self::Brightest => Some(StarSelector::Brightest),
            Self::Hottest => Some(StarSelector::Hottest),
            Self::Largest => Some(StarSelector::Largest),
            Self::Constellations | Self::SolarSystem => None,
        }
    }
}

/// Active view modes in the order they were switched on.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveModes(Vec<ViewMode>);

impl ActiveModes {
    pub fn new(modes: impl IntoIterator<Item = ViewMode>) -> Self {
        let mut active = Self::default();
        for mode in modes {
            if !active.contains(mode) {
                active.0.push(mode);
            }
        }
        active
    }

    /// Switch a mode on or off. Returns whether it is now active.
    pub fn toggle(&mut self, mode: ViewMode) -> bool {
        if let Some(index) = self.0.iter().position(|m| *m == mode) {
            self.0.remove(index);
            false
        } else {
            self.0.push(mode);
            true
        }
    }

    pub fn contains(&self, mode: ViewMode) -> bool {
        self.0.contains(&mode)
    }

    /// Whether `mode` is the one and only active mode.
    pub fn is_only(&self, mode: ViewMode) -> bool {
        self.0.len() == 1 && self.0[0] == mode
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ViewMode> + '_ {
        self.0.iter().copied()
    }

    pub fn tags(&self) -> Vec<&'static str> {
        self.iter().map(ViewMode::tag).collect()
    }
}

/// Themed subset of the catalog. Each selector ranks its own copy of the
/// input, so combining selectors never merges their orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarSelector {
    Closest,
    Brightest,
    Hottest,
    Largest,
}

impl StarSelector {
    pub fn select<'a>(self, stars: &'a [Star]) -> Vec<&'a Star> {
        let mut picked: Vec<&Star> = match self {
            Self::Closest => stars
                .iter()
                .filter(|s| s.apparent_magnitude <= NAKED_EYE_MAGNITUDE)
                .collect(),
            Self::Largest => stars
                .iter()
                .filter(|s| s.luminosity.is_some_and(|l| l > 0.0))
                .collect(),
            Self::Brightest | Self::Hottest => stars.iter().collect(),
        };

        // `sort_by` is stable, so ties keep catalog order.
        picked.sort_by(|a, b| self.compare(a, b));
        picked.truncate(SELECTOR_LIMIT);
        picked
    }

    fn compare(self, a: &Star, b: &Star) -> Ordering {
        match self {
            Self::Closest => a.distance.total_cmp(&b.distance),
            Self::Brightest => a.apparent_magnitude.total_cmp(&b.apparent_magnitude),
            Self::Hottest => b.ranking_temperature().total_cmp(&a.ranking_temperature()),
            Self::Largest => {
                let lum = |s: &Star| s.luminosity.unwrap_or(0.0);
                lum(b).total_cmp(&lum(a))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(id: u32, mag: f32, dist: f32) -> Star {
        Star::new(id, [id as f32, 0.0, 0.0], mag, dist)
    }

    #[test]
    fn tags_round_trip_and_unknown_tags_are_ignored() {
        for mode in [
            ViewMode::Closest,
            ViewMode::Brightest,
            ViewMode::Hottest,
            ViewMode::Largest,
            ViewMode::Constellations,
            ViewMode::SolarSystem,
        ] {
            assert_eq!(ViewMode::from_tag(mode.tag()), Some(mode));
        }
        assert_eq!(ViewMode::from_tag("faintest"), None);
    }

    #[test]
    fn toggling_keeps_activation_order() {
        let mut modes = ActiveModes::default();
        assert!(modes.toggle(ViewMode::Hottest));
        assert!(modes.toggle(ViewMode::Closest));
        assert_eq!(modes.tags(), vec!["hottest", "closest"]);
        assert!(!modes.toggle(ViewMode::Hottest));
        assert!(modes.is_only(ViewMode::Closest));
    }

    #[test]
    fn closest_keeps_visible_stars_sorted_by_distance() {
        let stars: Vec<Star> = (0..120)
            .map(|i| star(i, (i % 9) as f32, 500.0 - i as f32))
            .collect();
        let picked = StarSelector::Closest.select(&stars);

        assert!(picked.len() <= SELECTOR_LIMIT);
        assert!(picked.iter().all(|s| s.apparent_magnitude <= 6.0));
        assert!(picked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn hottest_ranks_unknown_classes_last() {
        let mut hot = star(1, 5.0, 10.0);
        hot.spectral_type = Some("O5".to_string());
        let unknown = star(2, 5.0, 10.0);
        let mut cool = star(3, 5.0, 10.0);
        cool.spectral_type = Some("M2".to_string());

        let stars = [unknown, cool, hot];
        let ids: Vec<u32> = StarSelector::Hottest
            .select(&stars)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn largest_skips_unknown_luminosity() {
        let mut a = star(1, 1.0, 1.0);
        a.luminosity = Some(2.0);
        let b = star(2, 1.0, 1.0);
        let mut c = star(3, 1.0, 1.0);
        c.luminosity = Some(40.0);

        let stars = [a, b, c];
        let ids: Vec<u32> = StarSelector::Largest
            .select(&stars)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
