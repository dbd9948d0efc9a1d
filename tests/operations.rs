#![allow(clippy::unwrap_used)]

use polyhedra::{Catalog, OperationKind};

/// Every option an operation lists on a catalog solid applies, to a closed
/// manifold, and listing the options again gives the same list.
fn sweep(kinds: &[OperationKind]) {
    let catalog = Catalog::builtin();
    for name in catalog.names() {
        let solid = catalog.get(name).unwrap();
        for &kind in kinds {
            let options = kind.all_options(solid);
            assert_eq!(options, kind.all_options(solid), "{kind} options on {name} changed");
            for option in &options {
                let end = match kind.apply(solid, option) {
                    Ok(result) => result.into_end_state(),
                    Err(err) => panic!("{kind} {option:?} on {name}: {err}"),
                };
                assert!(end.is_valid(), "{kind} {option:?} on {name} is not a manifold");
                assert!(end.is_closed(), "{kind} {option:?} on {name} is open");
            }
        }
    }
}

#[test]
fn cut_paste_options_apply() {
    sweep(&[OperationKind::Augment, OperationKind::Diminish, OperationKind::Gyrate]);
}

#[test]
fn prism_options_apply() {
    sweep(&[
        OperationKind::Elongate,
        OperationKind::Gyroelongate,
        OperationKind::Shorten,
        OperationKind::Turn,
    ]);
}

#[test]
fn truncation_options_apply() {
    sweep(&[OperationKind::Truncate, OperationKind::Rectify, OperationKind::Sharpen]);
}

#[test]
fn expansion_options_apply() {
    sweep(&[
        OperationKind::Dual,
        OperationKind::Expand,
        OperationKind::Contract,
        OperationKind::Snub,
        OperationKind::Twist,
    ]);
}
