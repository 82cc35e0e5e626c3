//! Fretboard maps
//!
//! Every place a formula's tones can be played across a tuning: scale maps, arpeggio maps and
//! position boxes (a short window of frets, as in BB-King or CAGED boxes).

use serde::Serialize;
use std::ops::RangeInclusive;

use crate::error::FretError;
use crate::formula::Formula;
use crate::pitch::Note;
use crate::shape::DEFAULT_HIGHEST_FRET;
use crate::spelling::{Role, Speller, SpellingPreference};
use crate::tuning::{Fret, Tuning};

/// One playable position of a formula tone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretPosition {
    pub string: usize,
    pub fret: Fret,
    pub note: Note,
    pub role: Role,
    pub midi: i32,
}

/// All positions of `formula` over `root` within `frets`, by string then fret.
///
/// The range must lie between the nut and [`DEFAULT_HIGHEST_FRET`].
pub fn map_formula(
    root: Note,
    formula: &Formula,
    tuning: &Tuning,
    frets: RangeInclusive<Fret>,
    preference: Option<SpellingPreference>,
) -> Result<Vec<FretPosition>, FretError> {
    if *frets.start() < 0 {
        return Err(FretError::UnrealizableVoicing(format!(
            "fret range {:?} starts below the nut",
            frets
        )));
    }
    if *frets.end() > DEFAULT_HIGHEST_FRET {
        return Err(FretError::UnrealizableVoicing(format!(
            "fret range {:?} runs past fret {}",
            frets, DEFAULT_HIGHEST_FRET
        )));
    }

    let speller = Speller::new(root, preference);
    let root_pc = root.pitch_class();
    let mut positions = Vec::new();

    for string in 0..tuning.string_count() {
        for fret in frets.clone() {
            let pitch = tuning.pitch_class_at(string, fret)?;
            if let Some(tone) = formula.tones.iter().find(|t| t.pitch_class(root_pc) == pitch) {
                positions.push(FretPosition {
                    string,
                    fret,
                    note: speller.spell(pitch, tone.spell_as),
                    role: tone.role,
                    midi: tuning.midi_at(string, fret)?,
                });
            }
        }
    }

    log::debug!(
        "mapped {} {} on {}: {} positions",
        root,
        formula.id,
        tuning.id,
        positions.len()
    );
    Ok(positions)
}

/// Positions of `formula` in the `width` frets starting at `start_fret`.
pub fn position_box(
    root: Note,
    formula: &Formula,
    tuning: &Tuning,
    start_fret: Fret,
    width: Fret,
    preference: Option<SpellingPreference>,
) -> Result<Vec<FretPosition>, FretError> {
    if width < 1 {
        return Err(FretError::UnrealizableVoicing(format!("box width {}", width)));
    }
    let end = start_fret.checked_add(width - 1).ok_or_else(|| {
        FretError::UnrealizableVoicing(format!("box of {} frets at fret {}", width, start_fret))
    })?;
    map_formula(root, formula, tuning, start_fret..=end, preference)
}

/// Positions on one string, low fret first
pub fn on_string(positions: &[FretPosition], string: usize) -> Vec<&FretPosition> {
    positions.iter().filter(|p| p.string == string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::FormulaLibrary;

    #[test]
    fn test_major_scale_map() {
        let library = FormulaLibrary::builtin().unwrap();
        let scale = library.get("major-scale").unwrap();
        let positions = map_formula(
            "C".parse().unwrap(),
            scale,
            &Tuning::standard_guitar().unwrap(),
            0..=12,
            None,
        )
        .unwrap();
        assert_eq!(positions.len(), 48);
        assert!(positions.iter().all(|p| !p.note.is_sharp() && !p.note.is_flat()));

        let low_e: Vec<Fret> = on_string(&positions, 0).iter().map(|p| p.fret).collect();
        assert_eq!(low_e, vec![0, 1, 3, 5, 7, 8, 10, 12]);
    }

    #[test]
    fn test_pentatonic_box() {
        let library = FormulaLibrary::builtin().unwrap();
        let penta = library.get("minor-pentatonic").unwrap();
        let tuning = Tuning::standard_guitar().unwrap();
        let positions = position_box("A".parse().unwrap(), penta, &tuning, 5, 4, None).unwrap();

        assert_eq!(positions.len(), 12);
        for string in 0..6 {
            assert_eq!(on_string(&positions, string).len(), 2);
        }
        let first = positions[0];
        assert_eq!((first.string, first.fret), (0, 5));
        assert_eq!(first.role, Role::ROOT);
        assert_eq!(first.note.to_string(), "A");
        assert_eq!(first.midi, 45);
        assert!(position_box("A".parse().unwrap(), penta, &tuning, 5, 0, None).is_err());
    }

    #[test]
    fn test_box_must_stay_on_the_neck() {
        let library = FormulaLibrary::builtin().unwrap();
        let penta = library.get("minor-pentatonic").unwrap();
        let tuning = Tuning::standard_guitar().unwrap();
        let a: Note = "A".parse().unwrap();

        let top = position_box(a, penta, &tuning, 21, 4, None).unwrap();
        assert!(top.iter().all(|p| p.fret <= DEFAULT_HIGHEST_FRET));
        assert!(matches!(
            position_box(a, penta, &tuning, 30, 4, None),
            Err(FretError::UnrealizableVoicing(_))
        ));
        assert!(position_box(a, penta, &tuning, 22, 4, None).is_err());
        assert!(position_box(a, penta, &tuning, 5, Fret::MAX, None).is_err());
        assert!(position_box(a, penta, &tuning, -1, 4, None).is_err());
        assert!(map_formula(a, penta, &tuning, 0..=25, None).is_err());
        assert!(map_formula(a, penta, &tuning, 0..=DEFAULT_HIGHEST_FRET, None).is_ok());
    }

    #[test]
    fn test_flat_key_spelling() {
        let library = FormulaLibrary::builtin().unwrap();
        let triad = library.get("minor-triad").unwrap();
        let tuning = Tuning::standard_guitar().unwrap();
        let positions = map_formula("C".parse().unwrap(), triad, &tuning, 0..=11, None).unwrap();
        let thirds: Vec<String> = positions
            .iter()
            .filter(|p| p.role.to_string() == "b3")
            .map(|p| p.note.to_string())
            .collect();
        assert!(!thirds.is_empty());
        assert!(thirds.iter().all(|n| n == "Eb"));
    }
}
