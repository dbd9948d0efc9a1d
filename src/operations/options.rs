//! Parameter vocabulary shared by the operations: option values, partial
//! search results and the relation entries they are matched against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OperationError, PolyhedraError};
use crate::topology::{Cap, CapKind};

/// Which cap fills (or is removed from) a base polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Using {
    /// Triangular pyramid.
    Y3,
    /// Square pyramid.
    Y4,
    /// Pentagonal pyramid.
    Y5,
    /// Fastigium on a square.
    U2,
    /// Triangular cupola.
    U3,
    /// Square cupola.
    U4,
    /// Pentagonal cupola.
    U5,
    /// Pentagonal rotunda.
    R5,
}

impl Using {
    pub const ALL: [Using; 8] = [
        Using::Y3,
        Using::Y4,
        Using::Y5,
        Using::U2,
        Using::U3,
        Using::U4,
        Using::U5,
        Using::R5,
    ];

    #[must_use]
    pub fn cap_kind(self) -> CapKind {
        match self {
            Self::Y3 | Self::Y4 | Self::Y5 => CapKind::Pyramid,
            Self::U2 => CapKind::Fastigium,
            Self::U3 | Self::U4 | Self::U5 => CapKind::Cupola,
            Self::R5 => CapKind::Rotunda,
        }
    }

    /// Sides of the base polygon this cap sits on.
    #[must_use]
    pub fn base_sides(self) -> usize {
        match self {
            Self::Y3 => 3,
            Self::Y4 | Self::U2 => 4,
            Self::Y5 => 5,
            Self::U3 => 6,
            Self::U4 => 8,
            Self::U5 | Self::R5 => 10,
        }
    }

    /// Caps that fit a face with `sides` sides, pyramids first.
    #[must_use]
    pub fn for_face(sides: usize) -> Vec<Using> {
        Self::ALL
            .into_iter()
            .filter(|using| using.base_sides() == sides)
            .collect()
    }

    /// Code describing a detected cap.
    #[must_use]
    pub fn for_cap(cap: &Cap) -> Using {
        match (cap.kind(), cap.num_sides()) {
            (CapKind::Pyramid, 3) => Self::Y3,
            (CapKind::Pyramid, 4) => Self::Y4,
            (CapKind::Pyramid, _) => Self::Y5,
            (CapKind::Fastigium, _) => Self::U2,
            (CapKind::Cupola, 6) => Self::U3,
            (CapKind::Cupola, 8) => Self::U4,
            (CapKind::Cupola, _) => Self::U5,
            (CapKind::Rotunda, _) => Self::R5,
        }
    }

    /// Name shown on option buttons.
    #[must_use]
    pub fn display_name(self) -> String {
        self.cap_kind().to_string()
    }
}

impl fmt::Display for Using {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for Using {
    type Err = PolyhedraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|using| using.to_string() == s)
            .ok_or_else(|| invalid("using", s))
    }
}

/// Whether a cap lines up with the faces across its base (ortho) or is
/// rotated against them (gyro).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gyration {
    Ortho,
    Gyro,
}

/// Position of a modification relative to the other modified sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Meta,
    Para,
}

/// Rotation sense of antiprism-like retilings, counter-clockwise (left) or
/// clockwise (right) about the outward axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwistDirection {
    Left,
    Right,
}

impl TwistDirection {
    /// `1.0` for left, `-1.0` for right.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }
}

macro_rules! keyword_enum {
    ($ty:ident, $option:literal, $($variant:ident => $name:literal),+) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => $name),+
                })
            }
        }

        impl FromStr for $ty {
            type Err = PolyhedraError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(invalid($option, s)),
                }
            }
        }
    };
}

keyword_enum!(Gyration, "gyrate", Ortho => "ortho", Gyro => "gyro");
keyword_enum!(Align, "align", Meta => "meta", Para => "para");
keyword_enum!(TwistDirection, "twist", Left => "left", Right => "right");

fn invalid(option: &str, value: &str) -> PolyhedraError {
    OperationError::InvalidOptionValue {
        option: option.to_string(),
        value: value.to_string(),
    }
    .into()
}

/// Named option fields, as used by relation lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionField {
    Using,
    Gyrate,
    Align,
    Twist,
    FaceType,
}

impl FromStr for OptionField {
    type Err = PolyhedraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "using" => Ok(Self::Using),
            "gyrate" => Ok(Self::Gyrate),
            "align" => Ok(Self::Align),
            "twist" => Ok(Self::Twist),
            "faceType" | "face_type" => Ok(Self::FaceType),
            _ => Err(OperationError::InvalidInput(format!("unknown option `{s}`")).into()),
        }
    }
}

/// Descriptive option values of a concrete operation target, used to tell
/// apart the named solids an operation can reach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub using: Option<Using>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gyrate: Option<Gyration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twist: Option<TwistDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_type: Option<usize>,
}

impl SearchOptions {
    /// The value of `field` rendered as its keyword, if set.
    #[must_use]
    pub fn value(&self, field: OptionField) -> Option<String> {
        match field {
            OptionField::Using => self.using.map(|v| v.to_string()),
            OptionField::Gyrate => self.gyrate.map(|v| v.to_string()),
            OptionField::Align => self.align.map(|v| v.to_string()),
            OptionField::Twist => self.twist.map(|v| v.to_string()),
            OptionField::FaceType => self.face_type.map(|v| v.to_string()),
        }
    }

    /// Keeps `using`, `twist` and `face_type`; keeps `gyrate` and `align`
    /// only where `relations` reach more than one solid through them.
    #[must_use]
    pub fn gated(self, relations: &[Relation]) -> SearchOptions {
        let gyrate = self
            .gyrate
            .filter(|_| has_multiple(relations, OptionField::Gyrate));
        let align = self.align.filter(|_| {
            gyrate != Some(Gyration::Ortho) && has_multiple(relations, OptionField::Align)
        });
        SearchOptions {
            gyrate,
            align,
            ..self
        }
    }

    /// Whether every field set in `self` has the same value in `other`.
    #[must_use]
    pub fn matches(&self, other: &SearchOptions) -> bool {
        fn agree<T: PartialEq>(a: Option<T>, b: Option<T>) -> bool {
            a.is_none() || b.is_none() || a == b
        }
        agree(self.using, other.using)
            && agree(self.gyrate, other.gyrate)
            && agree(self.align, other.align)
            && agree(self.twist, other.twist)
            && agree(self.face_type, other.face_type)
    }
}

/// One solid reachable from another through an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Name of the resulting solid.
    pub result: String,
    /// Option values that lead there.
    pub options: SearchOptions,
}

/// Whether the relations reach solids through more than one value of `field`.
#[must_use]
pub fn has_multiple(relations: &[Relation], field: OptionField) -> bool {
    let mut values: Vec<String> = relations
        .iter()
        .filter_map(|relation| relation.options.value(field))
        .collect();
    values.sort();
    values.dedup();
    values.len() > 1
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn relation(result: &str, gyrate: Option<Gyration>) -> Relation {
        Relation {
            result: result.to_string(),
            options: SearchOptions {
                gyrate,
                ..SearchOptions::default()
            },
        }
    }

    #[test]
    fn parses_keywords() {
        assert_eq!("gyro".parse::<Gyration>().unwrap(), Gyration::Gyro);
        assert_eq!("para".parse::<Align>().unwrap(), Align::Para);
        assert_eq!("right".parse::<TwistDirection>().unwrap(), TwistDirection::Right);
        assert_eq!("U5".parse::<Using>().unwrap(), Using::U5);
        assert!("sideways".parse::<TwistDirection>().is_err());
    }

    #[test]
    fn faces_take_matching_caps() {
        assert_eq!(Using::for_face(4), vec![Using::Y4, Using::U2]);
        assert_eq!(Using::for_face(10), vec![Using::U5, Using::R5]);
        assert!(Using::for_face(7).is_empty());
        assert_eq!(Using::U2.display_name(), "fastigium");
    }

    #[test]
    fn multiple_values_are_detected() {
        let single = [relation("a", Some(Gyration::Gyro)), relation("b", None)];
        assert!(!has_multiple(&single, OptionField::Gyrate));
        let both = [
            relation("a", Some(Gyration::Gyro)),
            relation("b", Some(Gyration::Ortho)),
        ];
        assert!(has_multiple(&both, OptionField::Gyrate));
    }

    #[test]
    fn gating_drops_unambiguous_fields() {
        let options = SearchOptions {
            using: Some(Using::U5),
            gyrate: Some(Gyration::Ortho),
            align: Some(Align::Para),
            ..SearchOptions::default()
        };
        let gated = options.gated(&[]);
        assert_eq!(gated.using, Some(Using::U5));
        assert_eq!(gated.gyrate, None);
        assert_eq!(gated.align, None);
    }

    #[test]
    fn search_options_serialize_camel_case() {
        let options = SearchOptions {
            face_type: Some(3),
            ..SearchOptions::default()
        };
        assert_eq!(serde_json::to_string(&options).unwrap(), r#"{"faceType":3}"#);
    }
}
