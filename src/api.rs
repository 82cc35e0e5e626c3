//! # Engine Facade
//!
//! [`Fretboard`] bundles a formula library, a tuning and generation options behind
//! string-typed entry points, for callers (the CLI, the WebAssembly bindings, UI code) that
//! start from user input rather than typed values.
//!
//! ## Example
//! ```rust
//! use fretwork::{Fretboard, StringSet};
//!
//! let board = Fretboard::standard()?;
//! let diagrams = board.diagrams("C", "minor-triad", StringSet::new(3, 3))?;
//! assert_eq!(diagrams.len(), 3);
//! assert_eq!(diagrams[0].strings[1].note.as_deref(), Some("Eb"));
//! # Ok::<(), fretwork::FretError>(())
//! ```

use crate::diagram::{project_all, Diagram};
use crate::error::FretError;
use crate::formula::{FormulaLibrary, FormulaSubset};
use crate::fretboard::{map_formula, position_box, FretPosition};
use crate::inversion::{order_by_string_set, Inversion, InversionMapper, Rotation};
use crate::normalize::{normalize, PlayableRange};
use crate::pitch::Note;
use crate::shape::{generate_voicings, ShapeOptions};
use crate::spelling::Role;
use crate::tuning::{Fret, StringSet, Tuning};
use crate::voicing::Voicing;

/// Highest fret covered by a full-neck map
pub const MAP_FRETS: Fret = 12;

#[derive(Debug, Clone)]
pub struct Fretboard {
    formulas: FormulaLibrary,
    tuning: Tuning,
    options: ShapeOptions,
    range: PlayableRange,
}

impl Fretboard {
    pub fn new(formulas: FormulaLibrary, tuning: Tuning) -> Self {
        Fretboard {
            formulas,
            tuning,
            options: ShapeOptions::default(),
            range: PlayableRange::default(),
        }
    }

    /// Built-in formulas on a standard six-string guitar.
    pub fn standard() -> Result<Self, FretError> {
        Ok(Self::new(FormulaLibrary::builtin()?, Tuning::standard_guitar()?))
    }

    pub fn with_options(mut self, options: ShapeOptions) -> Self {
        self.options = options;
        self
    }

    /// Fret window voicings are normalized into. Its `max_span` is ignored: the hand span
    /// always comes from the generation options.
    pub fn with_range(mut self, range: PlayableRange) -> Self {
        self.range = range;
        self
    }

    pub fn formulas(&self) -> &FormulaLibrary {
        &self.formulas
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn options(&self) -> &ShapeOptions {
        &self.options
    }

    /// The normalization window, with the span of the generation options.
    pub fn range(&self) -> PlayableRange {
        PlayableRange {
            max_span: self.options.max_span,
            ..self.range
        }
    }

    /// All voicings of a formula on a string set, normalized into the playable range.
    pub fn voicings(
        &self,
        root: &str,
        formula_id: &str,
        string_set: StringSet,
    ) -> Result<Vec<Voicing>, FretError> {
        let subset = self.formulas.get(formula_id)?.full();
        self.generate(root, &subset, string_set)
    }

    /// Voicings of the given roles only, e.g. `["1", "3", "b7"]` of a dominant 7th.
    pub fn voicings_for_roles(
        &self,
        root: &str,
        formula_id: &str,
        roles: &[&str],
        string_set: StringSet,
    ) -> Result<Vec<Voicing>, FretError> {
        let roles = roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()?;
        let subset = self.formulas.get(formula_id)?.subset(&roles)?;
        self.generate(root, &subset, string_set)
    }

    fn generate(
        &self,
        root: &str,
        subset: &FormulaSubset,
        string_set: StringSet,
    ) -> Result<Vec<Voicing>, FretError> {
        let root: Note = root.parse()?;
        let range = self.range();
        generate_voicings(root, subset, string_set, &self.tuning, &self.options)?
            .iter()
            .map(|v| normalize(v, &range))
            .collect()
    }

    pub fn diagrams(
        &self,
        root: &str,
        formula_id: &str,
        string_set: StringSet,
    ) -> Result<Vec<Diagram>, FretError> {
        Ok(project_all(&self.voicings(root, formula_id, string_set)?, &self.formulas))
    }

    /// Inversion labels in ascending start-fret order on `string_set`.
    pub fn inversion_order(
        &self,
        root: &str,
        formula_id: &str,
        string_set: StringSet,
    ) -> Result<Vec<Inversion>, FretError> {
        let subset = self.formulas.get(formula_id)?.full();
        order_by_string_set(root.parse()?, &subset, string_set, &self.tuning, &self.options)
    }

    /// Rotation of a formula on every string set that fits it, for C as reference root.
    pub fn rotations(&self, formula_id: &str) -> Result<Vec<Rotation>, FretError> {
        let subset = self.formulas.get(formula_id)?.full();
        InversionMapper::new(&self.tuning, self.options).rotations(&subset)
    }

    /// Every position of a formula from the nut to the 12th fret.
    pub fn scale_map(&self, root: &str, formula_id: &str) -> Result<Vec<FretPosition>, FretError> {
        map_formula(
            root.parse()?,
            self.formulas.get(formula_id)?,
            &self.tuning,
            0..=MAP_FRETS,
            self.options.preference,
        )
    }

    pub fn scale_box(
        &self,
        root: &str,
        formula_id: &str,
        start_fret: Fret,
        width: Fret,
    ) -> Result<Vec<FretPosition>, FretError> {
        position_box(
            root.parse()?,
            self.formulas.get(formula_id)?,
            &self.tuning,
            start_fret,
            width,
            self.options.preference,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_voicings() {
        let board = Fretboard::standard().unwrap();
        let voicings = board.voicings("C", "major-triad", StringSet::new(3, 3)).unwrap();
        assert_eq!(voicings.len(), 3);
        assert_eq!(voicings[0].frets(), vec![5, 5, 3]);
    }

    #[test]
    fn test_shell_voicing_from_roles() {
        let board = Fretboard::standard().unwrap();
        let voicings = board
            .voicings_for_roles("G", "dominant-7", &["1", "3", "b7"], StringSet::new(0, 3))
            .unwrap();
        assert_eq!(voicings.len(), 3);
        for voicing in &voicings {
            assert!(voicing.verify(board.tuning()).is_ok());
        }
        let labels: Vec<Inversion> = {
            let mut l: Vec<Inversion> = voicings.iter().map(|v| v.inversion).collect();
            l.sort();
            l
        };
        assert_eq!(labels, vec![Inversion::ROOT, Inversion::FIRST, Inversion::THIRD]);

        assert!(matches!(
            board.voicings_for_roles("G", "dominant-7", &["1", "9"], StringSet::new(0, 2)),
            Err(FretError::InvalidFormula(_))
        ));
    }

    #[test]
    fn test_span_survives_builder_order() {
        let wide = ShapeOptions::default().with_max_span(6);
        let board = Fretboard::standard()
            .unwrap()
            .with_options(wide)
            .with_range(PlayableRange::default());
        assert_eq!(board.range().max_span, 6);
        let voicings = board.voicings("C", "dominant-9", StringSet::new(0, 5)).unwrap();
        assert_eq!(voicings.len(), 5);
        assert!(voicings.iter().all(|v| v.span() <= 6));

        let reversed = Fretboard::standard()
            .unwrap()
            .with_range(PlayableRange::default())
            .with_options(wide);
        assert_eq!(reversed.range(), board.range());
    }

    #[test]
    fn test_unknown_inputs() {
        let board = Fretboard::standard().unwrap();
        assert!(matches!(
            board.voicings("C", "major-tried", StringSet::new(3, 3)),
            Err(FretError::InvalidFormula(_))
        ));
        assert!(matches!(
            board.voicings("H", "major-triad", StringSet::new(3, 3)),
            Err(FretError::InvalidNote(_))
        ));
    }

    #[test]
    fn test_mode_aliases_resolve() {
        let board = Fretboard::standard().unwrap();
        let dorian = board.scale_map("D", "dorian").unwrap();
        let ionian = board.scale_map("C", "ionian").unwrap();
        assert_eq!(dorian.len(), ionian.len());
        assert!(dorian.iter().all(|p| !p.note.is_sharp() && !p.note.is_flat()));
    }

    #[test]
    fn test_rotations_cover_string_sets() {
        let board = Fretboard::standard().unwrap();
        assert_eq!(board.rotations("major-triad").unwrap().len(), 4);
        assert_eq!(board.rotations("dominant-7").unwrap().len(), 3);
    }
}
