use crate::error::{OperationError, PolyhedraError, Result};
use crate::topology::Cap;

use super::options::{Gyration, OptionField, TwistDirection, Using};

/// Options of operations that take none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOptions;

/// Options of augment: the face to build on and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AugmentOptions {
    pub face: Option<usize>,
    pub using: Option<Using>,
    pub gyrate: Option<Gyration>,
}

/// Options of operations that act on one cap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapOptions {
    pub cap: Option<Cap>,
}

/// Options of operations with a rotation sense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwistOptions {
    pub twist: Option<TwistDirection>,
}

/// Options of operations that act on every face of one arity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceTypeOptions {
    pub face_type: Option<usize>,
}

/// Untyped option set, as exchanged with the session and the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOptions {
    None,
    Augment(AugmentOptions),
    Cap(CapOptions),
    Twist(TwistOptions),
    FaceType(FaceTypeOptions),
}

impl OperationOptions {
    /// Whether the option set carries the element a pick resolves to.
    #[must_use]
    pub fn has_target(&self) -> bool {
        match self {
            Self::None | Self::Twist(_) => true,
            Self::Augment(options) => options.face.is_some(),
            Self::Cap(options) => options.cap.is_some(),
            Self::FaceType(options) => options.face_type.is_some(),
        }
    }

    /// Same options without the picked element.
    #[must_use]
    pub fn without_target(&self) -> Self {
        match self {
            Self::Augment(options) => Self::Augment(AugmentOptions {
                face: None,
                ..*options
            }),
            Self::Cap(_) => Self::Cap(CapOptions::default()),
            Self::FaceType(_) => Self::FaceType(FaceTypeOptions::default()),
            other => other.clone(),
        }
    }

    /// Merges the fields set in `other` into `self`.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        fn pick<T: Clone>(a: &Option<T>, b: &Option<T>) -> Option<T> {
            b.clone().or_else(|| a.clone())
        }
        match (self, other) {
            (Self::Augment(a), Self::Augment(b)) => Self::Augment(AugmentOptions {
                face: pick(&a.face, &b.face),
                using: pick(&a.using, &b.using),
                gyrate: pick(&a.gyrate, &b.gyrate),
            }),
            (Self::Cap(a), Self::Cap(b)) => Self::Cap(CapOptions {
                cap: pick(&a.cap, &b.cap),
            }),
            (Self::Twist(a), Self::Twist(b)) => Self::Twist(TwistOptions {
                twist: pick(&a.twist, &b.twist),
            }),
            (Self::FaceType(a), Self::FaceType(b)) => Self::FaceType(FaceTypeOptions {
                face_type: pick(&a.face_type, &b.face_type),
            }),
            _ => self.clone(),
        }
    }

    /// Whether every field set in `self` has the same value in the concrete
    /// option set `candidate`.
    #[must_use]
    pub fn is_compatible(&self, candidate: &Self) -> bool {
        fn agree<T: PartialEq>(partial: &Option<T>, value: &Option<T>) -> bool {
            partial.is_none() || partial == value
        }
        match (self, candidate) {
            (Self::None, Self::None) => true,
            (Self::Augment(a), Self::Augment(b)) => {
                agree(&a.face, &b.face) && agree(&a.using, &b.using) && agree(&a.gyrate, &b.gyrate)
            }
            (Self::Cap(a), Self::Cap(b)) => agree(&a.cap, &b.cap),
            (Self::Twist(a), Self::Twist(b)) => agree(&a.twist, &b.twist),
            (Self::FaceType(a), Self::FaceType(b)) => agree(&a.face_type, &b.face_type),
            _ => false,
        }
    }

    /// Sets a named option from its keyword value.
    ///
    /// # Errors
    ///
    /// Returns an error if this option set has no such field or the value
    /// does not parse.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let field: OptionField = name.parse()?;
        match (self, field) {
            (Self::Augment(options), OptionField::Using) => options.using = Some(value.parse()?),
            (Self::Augment(options), OptionField::Gyrate) => options.gyrate = Some(value.parse()?),
            (Self::Twist(options), OptionField::Twist) => options.twist = Some(value.parse()?),
            (Self::FaceType(options), OptionField::FaceType) => {
                let sides = value.parse().map_err(|_| OperationError::InvalidOptionValue {
                    option: name.to_string(),
                    value: value.to_string(),
                })?;
                options.face_type = Some(sides);
            }
            _ => {
                return Err(OperationError::InvalidInput(format!(
                    "option `{name}` does not apply to this operation"
                ))
                .into())
            }
        }
        Ok(())
    }
}

fn mismatch(expected: &str) -> PolyhedraError {
    OperationError::InvalidInput(format!("expected {expected} options")).into()
}

macro_rules! option_conversions {
    ($($ty:ident => $variant:ident),+) => {
        $(
            impl From<$ty> for OperationOptions {
                fn from(options: $ty) -> Self {
                    Self::$variant(options)
                }
            }

            impl TryFrom<OperationOptions> for $ty {
                type Error = PolyhedraError;

                fn try_from(options: OperationOptions) -> Result<Self> {
                    match options {
                        OperationOptions::$variant(options) => Ok(options),
                        _ => Err(mismatch(stringify!($variant))),
                    }
                }
            }
        )+
    };
}

option_conversions!(
    AugmentOptions => Augment,
    CapOptions => Cap,
    TwistOptions => Twist,
    FaceTypeOptions => FaceType
);

impl From<NoOptions> for OperationOptions {
    fn from(_: NoOptions) -> Self {
        Self::None
    }
}

impl TryFrom<OperationOptions> for NoOptions {
    type Error = PolyhedraError;

    fn try_from(options: OperationOptions) -> Result<Self> {
        match options {
            OperationOptions::None => Ok(NoOptions),
            _ => Err(mismatch("no")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_parses_named_values() {
        let mut options = OperationOptions::Augment(AugmentOptions::default());
        options.set("using", "U2").unwrap();
        options.set("gyrate", "ortho").unwrap();
        assert_eq!(
            options,
            OperationOptions::Augment(AugmentOptions {
                face: None,
                using: Some(Using::U2),
                gyrate: Some(Gyration::Ortho),
            })
        );
        assert!(options.set("twist", "left").is_err());
        assert!(options.set("using", "Q9").is_err());
    }

    #[test]
    fn partial_options_match_candidates() {
        let partial = OperationOptions::Augment(AugmentOptions {
            face: Some(2),
            ..AugmentOptions::default()
        });
        let candidate = OperationOptions::Augment(AugmentOptions {
            face: Some(2),
            using: Some(Using::Y4),
            gyrate: None,
        });
        assert!(partial.is_compatible(&candidate));
        assert!(!candidate.is_compatible(&partial));
        assert!(!partial.is_compatible(&OperationOptions::None));
    }

    #[test]
    fn target_is_cleared_but_choices_stay() {
        let options = OperationOptions::Augment(AugmentOptions {
            face: Some(1),
            using: Some(Using::U2),
            gyrate: None,
        });
        let cleared = options.without_target();
        assert!(!cleared.has_target());
        assert!(matches!(
            cleared,
            OperationOptions::Augment(AugmentOptions { using: Some(Using::U2), .. })
        ));
    }

    #[test]
    fn conversions_reject_other_variants() {
        assert!(TwistOptions::try_from(OperationOptions::None).is_err());
        assert!(NoOptions::try_from(OperationOptions::None).is_ok());
    }
}
