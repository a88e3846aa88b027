use super::config::{FilterConfig, MagnitudeType};
use super::modes::{ActiveModes, ViewMode};
use crate::engine::catalog::{ConstellationGraph, Star};
use bevy::prelude::*;
use constants::solar_system::REFERENCE_STAR_ID;
use std::collections::HashSet;

/// Free-text search over proper names and constellation codes.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(pub String);

/// Constellation picked by the user, narrowing constellation mode.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedConstellation(pub Option<String>);

/// Reduce the catalog to the stars that should be drawn.
///
/// Pure and deterministic: identical arguments give identical output,
/// order included.
pub fn filter_stars(
    stars: &[Star],
    graph: &ConstellationGraph,
    filters: &FilterConfig,
    modes: &ActiveModes,
    search_query: &str,
    constellation: Option<&str>,
) -> Vec<Star> {
    if stars.is_empty() {
        return Vec::new();
    }

    let base: Vec<&Star> = if modes.contains(ViewMode::SolarSystem) {
        stars.iter().filter(|s| s.id != REFERENCE_STAR_ID).collect()
    } else {
        stars.iter().collect()
    };

    let working = if modes.contains(ViewMode::Constellations) {
        constellation_members(base, graph, constellation)
    } else {
        select_by_modes(base, modes)
    };

    let query = search_query.trim().to_lowercase();
    working
        .into_iter()
        .filter(|s| passes_numeric_filters(s, filters))
        .filter(|s| query.is_empty() || matches_query(s, &query))
        .cloned()
        .collect()
}

fn constellation_members<'a>(
    base: Vec<&'a Star>,
    graph: &ConstellationGraph,
    constellation: Option<&str>,
) -> Vec<&'a Star> {
    let selected = constellation.map(|code| (code, graph.members_of(code)));

    base.into_iter()
        .filter(|s| s.catalog_id.is_some_and(|id| graph.is_member(id)))
        .filter(|s| match &selected {
            None => true,
            Some((_, Some(members))) => s.catalog_id.is_some_and(|id| members.contains(&id)),
            // No figure for the selected code: fall back to the star's own tag.
            Some((code, None)) => s.in_constellation(code),
        })
        .collect()
}

fn select_by_modes<'a>(base: Vec<&'a Star>, modes: &ActiveModes) -> Vec<&'a Star> {
    let selectors: Vec<_> = modes.iter().filter_map(ViewMode::selector).collect();
    if selectors.is_empty() {
        return base;
    }

    let pool: Vec<Star> = base.iter().map(|s| (*s).clone()).collect();
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for selector in selectors {
        for star in selector.select(&pool) {
            if seen.insert(star.id) {
                ids.push(star.id);
            }
        }
    }

    // Map back onto `base` borrows in selection order.
    ids.into_iter()
        .filter_map(|id| base.iter().find(|s| s.id == id).copied())
        .collect()
}

fn passes_numeric_filters(star: &Star, filters: &FilterConfig) -> bool {
    // An unknown absolute magnitude compares as 0.
    let magnitude = match filters.magnitude_type {
        MagnitudeType::Apparent => star.apparent_magnitude,
        MagnitudeType::Absolute => star.absolute_magnitude.unwrap_or(0.0),
    };
    magnitude <= filters.magnitude
        && star.distance <= filters.max_distance
        && star.temperature() >= filters.min_temperature
}

fn matches_query(star: &Star, query: &str) -> bool {
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(query))
    };
    contains(&star.proper_name) || contains(&star.constellation_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(id: u32, mag: f32) -> Star {
        Star::new(id, [id as f32, 0.0, 0.0], mag, id as f32)
    }

    fn permissive() -> FilterConfig {
        FilterConfig {
            magnitude: 100.0,
            ..FilterConfig::default()
        }
    }

    fn ids(stars: &[Star]) -> Vec<u32> {
        stars.iter().map(|s| s.id).collect()
    }

    fn run(stars: &[Star], filters: &FilterConfig, modes: &ActiveModes) -> Vec<u32> {
        let graph = ConstellationGraph::builtin();
        ids(&filter_stars(stars, &graph, filters, modes, "", None))
    }

    #[test]
    fn magnitude_filter_preserves_order() {
        let stars = [star(1, 2.0), star(2, 10.0), star(3, 4.0)];
        let result = run(&stars, &FilterConfig::default(), &ActiveModes::default());
        assert_eq!(result, vec![1, 3]);
    }

    #[test]
    fn brightest_orders_by_apparent_magnitude() {
        let stars = [star(1, 2.0), star(2, 10.0), star(3, 4.0)];
        let modes = ActiveModes::new([ViewMode::Brightest]);
        assert_eq!(run(&stars, &permissive(), &modes), vec![1, 3, 2]);
    }

    #[test]
    fn empty_catalog_gives_empty_result() {
        let modes = ActiveModes::new([ViewMode::Brightest, ViewMode::Constellations]);
        assert!(run(&[], &permissive(), &modes).is_empty());
    }

    #[test]
    fn union_of_selectors_has_no_duplicates_and_keeps_first_appearance() {
        let mut stars: Vec<Star> = (1..=80).map(|i| star(i, (i % 7) as f32)).collect();
        for (i, s) in stars.iter_mut().enumerate() {
            s.luminosity = Some(i as f32);
            s.spectral_type = Some(["O5", "G2", "M1"][i % 3].to_string());
        }
        let modes = ActiveModes::new([
            ViewMode::Brightest,
            ViewMode::Closest,
            ViewMode::Hottest,
            ViewMode::Largest,
        ]);
        let result = run(&stars, &permissive(), &modes);

        let unique: HashSet<u32> = result.iter().copied().collect();
        assert_eq!(unique.len(), result.len());

        let brightest: Vec<u32> = crate::engine::filter::modes::StarSelector::Brightest
            .select(&stars)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(&result[..brightest.len()], &brightest[..]);
    }

    #[test]
    fn closest_mode_respects_visibility_cap_and_distance_order() {
        let stars: Vec<Star> = (1..=200)
            .map(|i| Star::new(i, [0.0; 3], (i % 12) as f32, 1000.0 / i as f32))
            .collect();
        let modes = ActiveModes::new([ViewMode::Closest]);
        let graph = ConstellationGraph::builtin();
        let result = filter_stars(&stars, &graph, &permissive(), &modes, "", None);

        assert!(result.len() <= 50);
        assert!(result.iter().all(|s| s.apparent_magnitude <= 6.0));
        assert!(result.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    fn constellation_catalog() -> Vec<Star> {
        // 15 and 32 are in the Cas figure, 9 in And, 9999 in none.
        [(1, 15, "Cas"), (2, 32, "Cas"), (3, 9, "And"), (4, 9999, "Ori")]
            .into_iter()
            .map(|(id, hip, code)| {
                let mut s = star(id, 3.0);
                s.catalog_id = Some(hip);
                s.constellation_code = Some(code.to_string());
                s
            })
            .collect()
    }

    #[test]
    fn constellation_mode_is_exclusive() {
        let stars = constellation_catalog();
        let only = ActiveModes::new([ViewMode::Constellations]);
        let mixed = ActiveModes::new([
            ViewMode::Brightest,
            ViewMode::Constellations,
            ViewMode::Largest,
        ]);
        let expected = run(&stars, &permissive(), &only);
        assert_eq!(expected, vec![1, 2, 3]);
        assert_eq!(run(&stars, &permissive(), &mixed), expected);
    }

    #[test]
    fn selected_constellation_narrows_membership() {
        let stars = constellation_catalog();
        let graph = ConstellationGraph::builtin();
        let modes = ActiveModes::new([ViewMode::Constellations]);
        let result = filter_stars(&stars, &graph, &permissive(), &modes, "", Some("Cas"));
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn search_by_constellation_code_ignores_modes() {
        let stars = constellation_catalog();
        let graph = ConstellationGraph::builtin();
        for modes in [
            ActiveModes::default(),
            ActiveModes::new([ViewMode::Brightest, ViewMode::Hottest]),
        ] {
            let result = filter_stars(&stars, &graph, &permissive(), &modes, "cas", None);
            assert_eq!(ids(&result), vec![1, 2]);
        }
    }

    #[test]
    fn search_matches_proper_names_case_insensitively() {
        let mut stars = vec![star(1, 1.0), star(2, 1.0)];
        stars[1].proper_name = Some("Sirius".to_string());
        let graph = ConstellationGraph::builtin();
        let result = filter_stars(
            &stars,
            &graph,
            &permissive(),
            &ActiveModes::default(),
            "SIR",
            None,
        );
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn solar_system_mode_drops_the_reference_record() {
        let stars = [star(0, -26.7), star(1, 2.0), star(2, 3.0)];
        let solar = ActiveModes::new([ViewMode::SolarSystem]);
        assert_eq!(run(&stars, &permissive(), &solar), vec![1, 2]);

        let with_brightest = ActiveModes::new([ViewMode::SolarSystem, ViewMode::Brightest]);
        assert_eq!(run(&stars, &permissive(), &with_brightest), vec![1, 2]);
    }

    #[test]
    fn unknown_absolute_magnitude_compares_as_zero() {
        let mut known = star(1, 12.0);
        known.absolute_magnitude = Some(1.0);
        let unknown = star(2, 1.0);
        let mut faint = star(3, 1.0);
        faint.absolute_magnitude = Some(8.0);
        let stars = [known, unknown, faint];

        let filters = FilterConfig {
            magnitude_type: MagnitudeType::Absolute,
            ..FilterConfig::default()
        };
        assert_eq!(run(&stars, &filters, &ActiveModes::default()), vec![1, 2]);

        let below_zero = FilterConfig {
            magnitude: -1.0,
            ..filters
        };
        assert!(run(&stars, &below_zero, &ActiveModes::default()).is_empty());
    }

    #[test]
    fn temperature_and_distance_filters_apply() {
        let mut hot = star(1, 1.0);
        hot.spectral_type = Some("B1".to_string());
        let mut far = star(2, 1.0);
        far.spectral_type = Some("O1".to_string());
        far.distance = 5000.0;
        let untyped = star(3, 1.0);

        let filters = FilterConfig {
            min_temperature: 6000.0,
            ..FilterConfig::default()
        };
        assert_eq!(
            run(&[hot, far, untyped], &filters, &ActiveModes::default()),
            vec![1]
        );
    }

    #[test]
    fn filtering_is_deterministic() {
        let mut stars: Vec<Star> = (1..=120).map(|i| star(i, (i % 5) as f32)).collect();
        for s in stars.iter_mut() {
            s.luminosity = Some(((s.id * 37) % 11) as f32);
        }
        let modes = ActiveModes::new([ViewMode::Largest, ViewMode::Brightest]);
        let first = run(&stars, &permissive(), &modes);
        let second = run(&stars, &permissive(), &modes);
        assert_eq!(first, second);
    }
}
