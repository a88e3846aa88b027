use bevy::prelude::*;
use constants::constellation::CONSTELLATION_FIGURES;
use std::collections::{BTreeMap, HashSet};

/// Constellation code to the catalog-id edges forming its line figure.
///
/// Membership sets are derived once at construction; the graph is immutable
/// afterwards.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConstellationGraph {
    edges: BTreeMap<String, Vec<(u32, u32)>>,
    members: HashSet<u32>,
}

impl ConstellationGraph {
    pub fn from_edges<I, S>(figures: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<(u32, u32)>)>,
        S: Into<String>,
    {
        let mut edges: BTreeMap<String, Vec<(u32, u32)>> = BTreeMap::new();
        for (code, pairs) in figures {
            edges.entry(code.into()).or_default().extend(pairs);
        }
        let members = edges
            .values()
            .flatten()
            .flat_map(|&(a, b)| [a, b])
            .collect();
        Self { edges, members }
    }

    /// Expand polylines into consecutive pairs.
    pub fn from_polylines<'a, I>(figures: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a [u32]])>,
    {
        Self::from_edges(figures.into_iter().map(|(code, polylines)| {
            let pairs = polylines
                .iter()
                .flat_map(|line| line.windows(2).map(|w| (w[0], w[1])))
                .collect::<Vec<_>>();
            (code, pairs)
        }))
    }

    pub fn builtin() -> Self {
        Self::from_polylines(
            CONSTELLATION_FIGURES
                .iter()
                .map(|figure| (figure.code, figure.polylines)),
        )
    }

    pub fn edges(&self, code: &str) -> Option<&[(u32, u32)]> {
        self.edges.get(code).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Whether the catalog id appears in any figure.
    pub fn is_member(&self, catalog_id: u32) -> bool {
        self.members.contains(&catalog_id)
    }

    /// Catalog ids appearing in one figure, or `None` for an unknown code.
    pub fn members_of(&self, code: &str) -> Option<HashSet<u32>> {
        self.edges(code)
            .map(|pairs| pairs.iter().flat_map(|&(a, b)| [a, b]).collect())
    }
}
