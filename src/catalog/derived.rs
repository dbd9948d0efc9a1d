//! Solids of the catalog built by applying operations to other entries.

use crate::error::{OperationError, Result};
use crate::operations::options::{Align, Gyration, Using};
use crate::operations::{Augment, Diminish, Operation, OperationKind, SearchOptions};
use crate::topology::Polyhedron;

use Align::{Meta, Para};
use Gyration::{Gyro, Ortho};
use OperationKind::{Elongate, Expand, Gyroelongate, Rectify, Snub, Truncate};
use Using::{R5, U2, U3, U4, U5, Y3, Y4, Y5};

/// How a derived solid is made from its source.
#[derive(Debug, Clone, Copy)]
pub(super) enum Step {
    /// The first legal option of an operation.
    Apply(OperationKind),
    /// A cap on a face with `sides` sides, matching the given descriptions.
    Augment {
        sides: usize,
        using: Using,
        gyrate: Option<Gyration>,
        align: Option<Align>,
    },
    /// A cap removed, matching the given alignment.
    Diminish { align: Option<Align> },
}

impl Step {
    pub(super) fn run(self, source: &Polyhedron) -> Result<Polyhedron> {
        match self {
            Self::Apply(kind) => {
                let options = kind
                    .all_options(source)
                    .into_iter()
                    .next()
                    .ok_or_else(|| OperationError::NotApplicable(format!("{kind} has no legal option")))?;
                Ok(kind.apply(source, &options)?.into_end_state())
            }
            Self::Augment {
                sides,
                using,
                gyrate,
                align,
            } => {
                let wanted = SearchOptions {
                    gyrate,
                    align,
                    ..SearchOptions::default()
                };
                let options = Augment
                    .all_options(source)
                    .into_iter()
                    .filter(|o| o.using == Some(using))
                    .filter(|o| o.face.is_some_and(|f| source.face_vertices(f).len() == sides))
                    .find(|o| {
                        Augment
                            .describe(source, o)
                            .is_ok_and(|described| wanted.matches(&described))
                    })
                    .ok_or_else(|| OperationError::NotApplicable(format!("no {using} placement on a {sides}-gon")))?;
                Ok(Augment.apply(source, &options)?.into_end_state())
            }
            Self::Diminish { align } => {
                let wanted = SearchOptions {
                    align,
                    ..SearchOptions::default()
                };
                let options = Diminish
                    .all_options(source)
                    .into_iter()
                    .find(|o| {
                        Diminish
                            .describe(source, o)
                            .is_ok_and(|described| wanted.matches(&described))
                    })
                    .ok_or_else(|| OperationError::NotApplicable("no cap to remove".into()))?;
                Ok(Diminish.apply(source, &options)?.into_end_state())
            }
        }
    }
}

const fn apply(kind: OperationKind) -> Step {
    Step::Apply(kind)
}

const fn cap(sides: usize, using: Using) -> Step {
    Step::Augment {
        sides,
        using,
        gyrate: None,
        align: None,
    }
}

const fn turned_cap(sides: usize, using: Using, gyrate: Gyration) -> Step {
    Step::Augment {
        sides,
        using,
        gyrate: Some(gyrate),
        align: None,
    }
}

const fn aligned_cap(sides: usize, using: Using, align: Align) -> Step {
    Step::Augment {
        sides,
        using,
        gyrate: None,
        align: Some(align),
    }
}

const fn cut(align: Option<Align>) -> Step {
    Step::Diminish { align }
}

/// `(name, source, step)` in dependency order.
pub(super) const RECIPES: &[(&str, &str, Step)] = &[
    // Archimedean
    ("truncated-tetrahedron", "tetrahedron", apply(Truncate)),
    ("truncated-cube", "cube", apply(Truncate)),
    ("truncated-octahedron", "octahedron", apply(Truncate)),
    ("truncated-dodecahedron", "dodecahedron", apply(Truncate)),
    ("truncated-icosahedron", "icosahedron", apply(Truncate)),
    ("cuboctahedron", "cube", apply(Rectify)),
    ("icosidodecahedron", "dodecahedron", apply(Rectify)),
    ("rhombicuboctahedron", "cube", apply(Expand)),
    ("rhombicosidodecahedron", "dodecahedron", apply(Expand)),
    ("snub-cube", "cube", apply(Snub)),
    ("snub-dodecahedron", "dodecahedron", apply(Snub)),
    // Pyramids and bipyramids
    ("elongated-triangular-pyramid", "triangular-prism", cap(3, Y3)),
    ("elongated-square-pyramid", "cube", cap(4, Y4)),
    ("elongated-pentagonal-pyramid", "pentagonal-prism", cap(5, Y5)),
    ("gyroelongated-square-pyramid", "square-antiprism", cap(4, Y4)),
    ("gyroelongated-pentagonal-pyramid", "pentagonal-antiprism", cap(5, Y5)),
    ("triangular-bipyramid", "tetrahedron", cap(3, Y3)),
    ("pentagonal-bipyramid", "pentagonal-pyramid", cap(5, Y5)),
    ("elongated-triangular-bipyramid", "triangular-bipyramid", apply(Elongate)),
    ("elongated-square-bipyramid", "octahedron", apply(Elongate)),
    ("elongated-pentagonal-bipyramid", "pentagonal-bipyramid", apply(Elongate)),
    ("gyroelongated-square-bipyramid", "octahedron", apply(Gyroelongate)),
    // Cupolae and rotundae on prisms and antiprisms
    ("elongated-triangular-cupola", "triangular-cupola", apply(Elongate)),
    ("elongated-square-cupola", "square-cupola", apply(Elongate)),
    ("elongated-pentagonal-cupola", "pentagonal-cupola", apply(Elongate)),
    ("elongated-pentagonal-rotunda", "pentagonal-rotunda", apply(Elongate)),
    ("gyroelongated-triangular-cupola", "triangular-cupola", apply(Gyroelongate)),
    ("gyroelongated-square-cupola", "square-cupola", apply(Gyroelongate)),
    ("gyroelongated-pentagonal-cupola", "pentagonal-cupola", apply(Gyroelongate)),
    ("gyroelongated-pentagonal-rotunda", "pentagonal-rotunda", apply(Gyroelongate)),
    // Pairs of caps
    ("gyrobifastigium", "triangular-prism", cap(4, U2)),
    ("triangular-orthobicupola", "triangular-cupola", turned_cap(6, U3, Ortho)),
    ("square-orthobicupola", "square-cupola", turned_cap(8, U4, Ortho)),
    ("square-gyrobicupola", "square-cupola", turned_cap(8, U4, Gyro)),
    ("pentagonal-orthobicupola", "pentagonal-cupola", turned_cap(10, U5, Ortho)),
    ("pentagonal-gyrobicupola", "pentagonal-cupola", turned_cap(10, U5, Gyro)),
    ("pentagonal-orthocupolarotunda", "pentagonal-rotunda", turned_cap(10, U5, Ortho)),
    ("pentagonal-gyrocupolarotunda", "pentagonal-rotunda", turned_cap(10, U5, Gyro)),
    ("pentagonal-orthobirotunda", "pentagonal-rotunda", turned_cap(10, R5, Ortho)),
    ("elongated-triangular-orthobicupola", "triangular-orthobicupola", apply(Elongate)),
    ("elongated-triangular-gyrobicupola", "cuboctahedron", apply(Elongate)),
    ("elongated-square-gyrobicupola", "square-gyrobicupola", apply(Elongate)),
    ("elongated-pentagonal-orthobicupola", "pentagonal-orthobicupola", apply(Elongate)),
    ("elongated-pentagonal-gyrobicupola", "pentagonal-gyrobicupola", apply(Elongate)),
    ("elongated-pentagonal-orthocupolarotunda", "pentagonal-orthocupolarotunda", apply(Elongate)),
    ("elongated-pentagonal-gyrocupolarotunda", "pentagonal-gyrocupolarotunda", apply(Elongate)),
    ("elongated-pentagonal-orthobirotunda", "pentagonal-orthobirotunda", apply(Elongate)),
    ("elongated-pentagonal-gyrobirotunda", "icosidodecahedron", apply(Elongate)),
    ("gyroelongated-triangular-bicupola", "triangular-orthobicupola", apply(Gyroelongate)),
    ("gyroelongated-square-bicupola", "square-orthobicupola", apply(Gyroelongate)),
    ("gyroelongated-pentagonal-bicupola", "pentagonal-orthobicupola", apply(Gyroelongate)),
    ("gyroelongated-pentagonal-cupolarotunda", "pentagonal-orthocupolarotunda", apply(Gyroelongate)),
    ("gyroelongated-pentagonal-birotunda", "pentagonal-orthobirotunda", apply(Gyroelongate)),
    // Augmented prisms
    ("augmented-triangular-prism", "triangular-prism", cap(4, Y4)),
    ("biaugmented-triangular-prism", "augmented-triangular-prism", cap(4, Y4)),
    ("triaugmented-triangular-prism", "biaugmented-triangular-prism", cap(4, Y4)),
    ("augmented-pentagonal-prism", "pentagonal-prism", cap(4, Y4)),
    ("biaugmented-pentagonal-prism", "augmented-pentagonal-prism", cap(4, Y4)),
    ("augmented-hexagonal-prism", "hexagonal-prism", cap(4, Y4)),
    ("parabiaugmented-hexagonal-prism", "augmented-hexagonal-prism", aligned_cap(4, Y4, Para)),
    ("metabiaugmented-hexagonal-prism", "augmented-hexagonal-prism", aligned_cap(4, Y4, Meta)),
    ("triaugmented-hexagonal-prism", "metabiaugmented-hexagonal-prism", cap(4, Y4)),
    // Modified Platonic solids
    ("augmented-dodecahedron", "dodecahedron", cap(5, Y5)),
    ("parabiaugmented-dodecahedron", "augmented-dodecahedron", aligned_cap(5, Y5, Para)),
    ("metabiaugmented-dodecahedron", "augmented-dodecahedron", aligned_cap(5, Y5, Meta)),
    ("triaugmented-dodecahedron", "metabiaugmented-dodecahedron", aligned_cap(5, Y5, Meta)),
    ("metabidiminished-icosahedron", "gyroelongated-pentagonal-pyramid", cut(Some(Meta))),
    ("tridiminished-icosahedron", "metabidiminished-icosahedron", cut(Some(Meta))),
    ("augmented-tridiminished-icosahedron", "tridiminished-icosahedron", cap(3, Y3)),
    // Augmented Archimedean solids
    ("augmented-truncated-tetrahedron", "truncated-tetrahedron", cap(6, U3)),
    ("augmented-truncated-cube", "truncated-cube", cap(8, U4)),
    ("biaugmented-truncated-cube", "augmented-truncated-cube", aligned_cap(8, U4, Para)),
    ("augmented-truncated-dodecahedron", "truncated-dodecahedron", cap(10, U5)),
    ("parabiaugmented-truncated-dodecahedron", "augmented-truncated-dodecahedron", aligned_cap(10, U5, Para)),
    ("metabiaugmented-truncated-dodecahedron", "augmented-truncated-dodecahedron", aligned_cap(10, U5, Meta)),
    ("triaugmented-truncated-dodecahedron", "metabiaugmented-truncated-dodecahedron", aligned_cap(10, U5, Meta)),
    // Diminished and gyrate rhombicosidodecahedra
    ("diminished-rhombicosidodecahedron", "rhombicosidodecahedron", cut(None)),
    ("parabidiminished-rhombicosidodecahedron", "diminished-rhombicosidodecahedron", cut(Some(Para))),
    ("metabidiminished-rhombicosidodecahedron", "diminished-rhombicosidodecahedron", cut(Some(Meta))),
    ("tridiminished-rhombicosidodecahedron", "metabidiminished-rhombicosidodecahedron", cut(Some(Meta))),
    ("gyrate-rhombicosidodecahedron", "diminished-rhombicosidodecahedron", turned_cap(10, U5, Ortho)),
    ("paragyrate-diminished-rhombicosidodecahedron", "parabidiminished-rhombicosidodecahedron", turned_cap(10, U5, Ortho)),
    ("metagyrate-diminished-rhombicosidodecahedron", "metabidiminished-rhombicosidodecahedron", turned_cap(10, U5, Ortho)),
    ("parabigyrate-rhombicosidodecahedron", "paragyrate-diminished-rhombicosidodecahedron", turned_cap(10, U5, Ortho)),
    ("metabigyrate-rhombicosidodecahedron", "metagyrate-diminished-rhombicosidodecahedron", turned_cap(10, U5, Ortho)),
    ("gyrate-bidiminished-rhombicosidodecahedron", "tridiminished-rhombicosidodecahedron", turned_cap(10, U5, Ortho)),
    ("bigyrate-diminished-rhombicosidodecahedron", "gyrate-bidiminished-rhombicosidodecahedron", turned_cap(10, U5, Ortho)),
    ("trigyrate-rhombicosidodecahedron", "bigyrate-diminished-rhombicosidodecahedron", turned_cap(10, U5, Ortho)),
];
