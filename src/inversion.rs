//! # Inversion Mapping
//!
//! Labels voicings by the role on their lowest played string, and maps the position of a
//! voicing in ascending-fret order to that label for each string set.
//!
//! ## Why string sets rotate
//! On a standard guitar the major third between G and B shifts every shape that crosses it.
//! The ascending-fret order of the three C major triads therefore starts on a different
//! inversion per string set:
//!
//! ```text
//! strings   position 0   position 1   position 2   offset
//! 0-2       Second       Root         First        2
//! 1-3       First        Second       Root         1
//! 2-4       Second       Root         First        2
//! 3-5       Root         First        Second       0
//! ```
//!
//! A [`Rotation`] records that order for one string set. It is a permutation of subset
//! indices, so mapping a position to a label and back always returns the position.

use serde::Serialize;
use std::fmt;

use crate::error::FretError;
use crate::formula::FormulaSubset;
use crate::pitch::Note;
use crate::shape::{generate_voicings, ShapeOptions};
use crate::tuning::{StringSet, Tuning};
use crate::voicing::Voicing;

const ORDINALS: [&str; 7] = ["First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh"];

/// Index of the lowest-sounding tone in the full formula: 0 is root position, 1 first
/// inversion, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Inversion(u8);

impl Inversion {
    pub const ROOT: Inversion = Inversion(0);
    pub const FIRST: Inversion = Inversion(1);
    pub const SECOND: Inversion = Inversion(2);
    pub const THIRD: Inversion = Inversion(3);

    pub fn new(index: usize) -> Self {
        Inversion(u8::try_from(index).unwrap_or(u8::MAX))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Display name, e.g. "Second Inversion".
    pub fn name(self) -> String {
        match self.0 {
            0 => "Root Position".to_string(),
            n => match ORDINALS.get(n as usize - 1) {
                Some(ordinal) => format!("{} Inversion", ordinal),
                None => format!("{}th Inversion", n),
            },
        }
    }
}

impl fmt::Display for Inversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Subset index of the role on the lowest played string.
fn bass_index(voicing: &Voicing, subset: &FormulaSubset) -> Result<usize, FretError> {
    let bass = voicing
        .bass()
        .ok_or_else(|| FretError::UnrealizableVoicing("voicing has no played strings".to_string()))?;
    let role = bass
        .role
        .ok_or_else(|| FretError::UnrealizableVoicing(format!("string {} has no role", bass.string)))?;
    subset.index_of(role).ok_or_else(|| {
        FretError::InvalidFormula(format!("{} has no role {}", subset.formula_id, role))
    })
}

/// Label a voicing by the role on its lowest played string.
pub fn label_for(voicing: &Voicing, subset: &FormulaSubset) -> Result<Inversion, FretError> {
    Ok(subset.inversion_at(bass_index(voicing, subset)?))
}

/// Ascending-fret order of the inversions on one string set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rotation {
    pub string_set: StringSet,
    /// Subset index of the tone voiced lowest by position 0
    pub offset: usize,
    /// Subset index per position
    order: Vec<usize>,
    /// Inversion label per subset index
    labels: Vec<Inversion>,
}

impl Rotation {
    /// A plain cyclic rotation: position `p` holds subset index `(offset + p) % len`.
    pub fn cyclic(string_set: StringSet, labels: Vec<Inversion>, offset: usize) -> Self {
        let len = labels.len().max(1);
        let offset = offset % len;
        Rotation {
            string_set,
            offset,
            order: (0..labels.len()).map(|p| (offset + p) % len).collect(),
            labels,
        }
    }

    /// Generate the voicings of `subset` over `root` and record their order.
    pub fn for_string_set(
        root: Note,
        subset: &FormulaSubset,
        string_set: StringSet,
        tuning: &Tuning,
        options: &ShapeOptions,
    ) -> Result<Self, FretError> {
        let voicings = generate_voicings(root, subset, string_set, tuning, options)?;
        let order = voicings
            .iter()
            .map(|v| bass_index(v, subset))
            .collect::<Result<Vec<_>, _>>()?;

        let rotation = Rotation {
            string_set,
            offset: order.first().copied().unwrap_or(0),
            order,
            labels: subset.inversions(),
        };
        log::debug!("{} on {}: offset {}", subset.formula_id, string_set, rotation.offset);
        Ok(rotation)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn label_at(&self, position: usize) -> Option<Inversion> {
        self.order.get(position).map(|&index| self.labels[index])
    }

    pub fn position_of(&self, label: Inversion) -> Option<usize> {
        let index = self.labels.iter().position(|&l| l == label)?;
        self.order.iter().position(|&i| i == index)
    }

    /// Labels in position order
    pub fn labels(&self) -> Vec<Inversion> {
        self.order.iter().map(|&index| self.labels[index]).collect()
    }

    /// Subset index per position
    pub fn permutation(&self) -> &[usize] {
        &self.order
    }

    /// Position per subset index
    pub fn inverse(&self) -> Vec<usize> {
        let mut inverse = vec![0; self.order.len()];
        for (position, &index) in self.order.iter().enumerate() {
            inverse[index] = position;
        }
        inverse
    }
}

/// Computes rotations for every string set of a tuning, using one reference root.
#[derive(Debug, Clone)]
pub struct InversionMapper<'a> {
    tuning: &'a Tuning,
    options: ShapeOptions,
    reference: Note,
}

impl<'a> InversionMapper<'a> {
    /// Mapper with C as the reference root
    pub fn new(tuning: &'a Tuning, options: ShapeOptions) -> Self {
        InversionMapper {
            tuning,
            options,
            reference: Note::natural(crate::pitch::Letter::C),
        }
    }

    pub fn with_reference(mut self, root: Note) -> Self {
        self.reference = root;
        self
    }

    pub fn rotation(&self, subset: &FormulaSubset, string_set: StringSet) -> Result<Rotation, FretError> {
        Rotation::for_string_set(self.reference, subset, string_set, self.tuning, &self.options)
    }

    /// One rotation per contiguous string set with as many strings as the subset has tones.
    pub fn rotations(&self, subset: &FormulaSubset) -> Result<Vec<Rotation>, FretError> {
        let sets = self.tuning.string_sets(subset.len());
        if sets.is_empty() {
            return Err(FretError::UnsupportedStringSetSize {
                strings: self.tuning.string_count(),
                roles: subset.len(),
            });
        }
        sets.into_iter()
            .map(|set| self.rotation(subset, set))
            .collect()
    }
}

/// Inversion labels of `subset` on `string_set`, in ascending start-fret order.
pub fn order_by_string_set(
    root: Note,
    subset: &FormulaSubset,
    string_set: StringSet,
    tuning: &Tuning,
    options: &ShapeOptions,
) -> Result<Vec<Inversion>, FretError> {
    Ok(Rotation::for_string_set(root, subset, string_set, tuning, options)?.labels())
}
