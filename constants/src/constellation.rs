/// A constellation stick figure as one or more polylines of catalog ids.
/// Consecutive ids in a polyline form one edge.
pub struct ConstellationFigure {
    pub code: &'static str,
    pub polylines: &'static [&'static [u32]],
}

pub const CONSTELLATION_FIGURES: &[ConstellationFigure] = &[
    ConstellationFigure {
        code: "And",
        polylines: &[&[3, 9, 11, 19, 30]],
    },
    ConstellationFigure {
        code: "Psc",
        polylines: &[&[1, 6, 14, 21, 31, 44]],
    },
    ConstellationFigure {
        code: "Cet",
        polylines: &[&[2, 13, 24, 26, 33, 35, 39]],
    },
    ConstellationFigure {
        code: "Phe",
        polylines: &[&[4, 5, 10, 16, 17, 22, 25, 27, 28, 29]],
    },
    ConstellationFigure {
        code: "Peg",
        polylines: &[&[7, 8, 20, 23, 34, 36, 42]],
    },
    ConstellationFigure {
        code: "Cas",
        polylines: &[&[15, 32, 40, 43]],
    },
    ConstellationFigure {
        code: "Oct",
        polylines: &[&[38, 52]],
    },
    ConstellationFigure {
        code: "Cep",
        polylines: &[&[41, 73, 86]],
    },
    ConstellationFigure {
        code: "Tuc",
        polylines: &[&[45, 55, 57, 60, 66]],
    },
    ConstellationFigure {
        code: "Scl",
        polylines: &[&[46, 53, 64, 77]],
    },
];
