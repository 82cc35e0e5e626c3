//! Fret-range normalization
//!
//! Folds a voicing back onto the playable part of the neck by whole octaves. Shapes that come
//! out of transposition or a wide fret range can land above the last fret or below the nut;
//! moving every played fret by 12 keeps the pitches and the shape while fixing the position.

use crate::error::FretError;
use crate::pitch::SEMITONES_PER_OCTAVE;
use crate::tuning::Fret;
use crate::voicing::Voicing;

/// The window a normalized voicing must fit in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayableRange {
    pub min_fret: Fret,
    pub max_fret: Fret,
    pub max_span: Fret,
}

impl Default for PlayableRange {
    fn default() -> Self {
        PlayableRange {
            min_fret: 0,
            max_fret: 24,
            max_span: 4,
        }
    }
}

impl PlayableRange {
    pub fn contains(&self, fret: Fret) -> bool {
        (self.min_fret..=self.max_fret).contains(&fret)
    }
}

/// Shift `voicing` by octaves until every played fret lies in `range`.
///
/// When a shift happens the start fret becomes `max(min_fret, lowest - 1)`; otherwise the
/// voicing comes back unchanged. Normalizing twice gives the same result as normalizing once.
///
/// # Errors
/// `UnrealizableVoicing` when the frets cannot fit the range at any octave, or when a voicing
/// not already marked as a stretch spans more than `max_span` frets.
pub fn normalize(voicing: &Voicing, range: &PlayableRange) -> Result<Voicing, FretError> {
    let (low, high) = match (voicing.lowest_fret(), voicing.highest_fret()) {
        (Some(low), Some(high)) => (low, high),
        _ => return Ok(voicing.clone()),
    };

    let unrealizable = || {
        FretError::UnrealizableVoicing(format!(
            "{} {} frets {:?} do not fit between {} and {}",
            voicing.root,
            voicing.formula_id,
            voicing.frets(),
            range.min_fret,
            range.max_fret
        ))
    };

    if high - low > range.max_fret - range.min_fret {
        return Err(unrealizable());
    }

    let mut octaves = 0;
    while high + octaves * SEMITONES_PER_OCTAVE > range.max_fret {
        octaves -= 1;
    }
    while low + octaves * SEMITONES_PER_OCTAVE < range.min_fret {
        octaves += 1;
    }
    if !range.contains(high + octaves * SEMITONES_PER_OCTAVE) {
        return Err(unrealizable());
    }

    if !voicing.stretch && high - low > range.max_span {
        return Err(FretError::UnrealizableVoicing(format!(
            "{} {} spans {} frets (limit {})",
            voicing.root,
            voicing.formula_id,
            high - low,
            range.max_span
        )));
    }

    if octaves == 0 {
        return Ok(voicing.clone());
    }

    log::debug!(
        "shifting {} {} by {} octave(s)",
        voicing.root,
        voicing.formula_id,
        octaves
    );
    let mut shifted = voicing.shift_octaves(octaves);
    shifted.start_fret = range.min_fret.max(low + octaves * SEMITONES_PER_OCTAVE - 1);
    Ok(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::FormulaLibrary;
    use crate::shape::{generate_voicings, ShapeOptions};
    use crate::tuning::{StringSet, Tuning};

    fn c_major() -> Vec<Voicing> {
        let subset = FormulaLibrary::builtin().unwrap().get("major-triad").unwrap().full();
        generate_voicings(
            "C".parse().unwrap(),
            &subset,
            StringSet::new(3, 3),
            &Tuning::standard_guitar().unwrap(),
            &ShapeOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_in_range_is_unchanged() {
        let range = PlayableRange::default();
        for voicing in c_major() {
            assert_eq!(normalize(&voicing, &range).unwrap(), voicing);
        }
    }

    #[test]
    fn test_folds_high_frets_down() {
        let second = &c_major()[2];
        let high = second.transpose(13, None);
        assert_eq!(high.frets(), vec![25, 26, 25]);

        let normalized = normalize(&high, &PlayableRange::default()).unwrap();
        assert_eq!(normalized.frets(), vec![13, 14, 13]);
        assert_eq!(normalized.start_fret, 12);
        assert_eq!(normalized.strings[1].note, high.strings[1].note);
        assert!(normalized.verify(&Tuning::standard_guitar().unwrap()).is_ok());
    }

    #[test]
    fn test_lifts_negative_frets() {
        let low = c_major()[0].transpose(-10, None);
        assert_eq!(low.frets(), vec![-5, -5, -7]);
        let normalized = normalize(&low, &PlayableRange::default()).unwrap();
        assert_eq!(normalized.frets(), vec![7, 7, 5]);
        assert_eq!(normalized.start_fret, 4);
    }

    #[test]
    fn test_idempotent() {
        let range = PlayableRange::default();
        for semitones in [-9, 0, 5, 13, 20] {
            for voicing in c_major() {
                let once = normalize(&voicing.transpose(semitones, None), &range).unwrap();
                assert_eq!(normalize(&once, &range).unwrap(), once);
            }
        }
    }

    #[test]
    fn test_unrealizable_range() {
        let mut wide = c_major()[0].clone();
        wide.strings[0].fret = Some(1);
        wide.strings[2].fret = Some(30);
        assert!(matches!(
            normalize(&wide, &PlayableRange::default()),
            Err(FretError::UnrealizableVoicing(_))
        ));

        let narrow = PlayableRange {
            min_fret: 5,
            max_fret: 7,
            max_span: 4,
        };
        assert!(normalize(&c_major()[1], &narrow).is_err());
    }

    #[test]
    fn test_span_limit() {
        let mut spread = c_major()[0].clone();
        spread.strings[0].fret = Some(10);
        assert!(normalize(&spread, &PlayableRange::default()).is_err());
        spread.stretch = true;
        assert!(normalize(&spread, &PlayableRange::default()).is_ok());
    }
}
