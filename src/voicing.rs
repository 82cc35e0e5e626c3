//! Voicing data types
//!
//! A [`Voicing`] is one concrete realization of a formula: a fret (or nothing) per string of a
//! string set, with the spelled note and role sounding there. Voicings are derived values;
//! the generator and normalizer build them and nothing edits them in place.

use serde::Serialize;

use crate::error::FretError;
use crate::inversion::Inversion;
use crate::pitch::Note;
use crate::spelling::{Role, Speller, SpellingPreference};
use crate::tuning::{Fret, Tuning};

/// What one string does in a voicing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringVoice {
    pub string: usize,
    /// `None` when the string is not played
    pub fret: Option<Fret>,
    pub note: Option<Note>,
    pub role: Option<Role>,
    /// Role used to spell `note`
    #[serde(skip)]
    pub spell_as: Option<Role>,
}

impl StringVoice {
    pub fn muted(string: usize) -> Self {
        StringVoice {
            string,
            fret: None,
            note: None,
            role: None,
            spell_as: None,
        }
    }

    pub fn played(string: usize, fret: Fret, note: Note, role: Role, spell_as: Role) -> Self {
        StringVoice {
            string,
            fret: Some(fret),
            note: Some(note),
            role: Some(role),
            spell_as: Some(spell_as),
        }
    }

    pub fn is_played(&self) -> bool {
        self.fret.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Voicing {
    pub root: Note,
    pub formula_id: String,
    /// One entry per string of the string set, low to high
    pub strings: Vec<StringVoice>,
    pub inversion: Inversion,
    /// Fret the diagram starts at
    pub start_fret: Fret,
    /// Set when the frets do not fit the requested hand span
    pub stretch: bool,
}

impl Voicing {
    /// Played strings as `(string, fret, role)`, low to high.
    pub fn played(&self) -> impl Iterator<Item = (usize, Fret, Option<Role>)> + '_ {
        self.strings
            .iter()
            .filter_map(|s| s.fret.map(|fret| (s.string, fret, s.role)))
    }

    pub fn frets(&self) -> Vec<Fret> {
        self.played().map(|(_, fret, _)| fret).collect()
    }

    pub fn lowest_fret(&self) -> Option<Fret> {
        self.played().map(|(_, fret, _)| fret).min()
    }

    pub fn highest_fret(&self) -> Option<Fret> {
        self.played().map(|(_, fret, _)| fret).max()
    }

    /// Distance between the lowest and highest played frets
    pub fn span(&self) -> Fret {
        match (self.lowest_fret(), self.highest_fret()) {
            (Some(low), Some(high)) => high - low,
            _ => 0,
        }
    }

    /// The voice on the lowest-pitched played string
    pub fn bass(&self) -> Option<&StringVoice> {
        self.strings
            .iter()
            .filter(|s| s.is_played())
            .min_by_key(|s| s.string)
    }

    pub fn fret_on(&self, string: usize) -> Option<Fret> {
        self.strings
            .iter()
            .find(|s| s.string == string)
            .and_then(|s| s.fret)
    }

    /// Move every played fret by whole octaves. Notes are unchanged.
    pub(crate) fn shift_octaves(&self, octaves: i32) -> Voicing {
        let semitones = octaves * 12;
        let mut shifted = self.clone();
        for voice in &mut shifted.strings {
            if let Some(fret) = voice.fret.as_mut() {
                *fret += semitones;
            }
        }
        shifted.start_fret += semitones;
        shifted
    }

    /// Slide the whole shape by `semitones` and respell it over the new root.
    ///
    /// Without a preference the new root is named for the key it lands in, so C up three
    /// semitones reads as Eb.
    ///
    /// Frets are not range-checked; pass the result through
    /// [`normalize`](crate::normalize::normalize) to fold it back onto the neck.
    pub fn transpose(&self, semitones: i32, preference: Option<SpellingPreference>) -> Voicing {
        let target = self.root.pitch_class().add_semitones(semitones);
        let preference = preference.unwrap_or_else(|| SpellingPreference::for_key(target));
        let root = crate::spelling::spell_chromatic(target, preference);
        let speller = Speller::new(root, Some(preference));

        let strings = self
            .strings
            .iter()
            .map(|voice| match (voice.fret, voice.note, voice.role) {
                (Some(fret), Some(note), Some(role)) => {
                    let pitch = note.pitch_class().add_semitones(semitones);
                    let spell_as = voice.spell_as.unwrap_or(role);
                    StringVoice::played(
                        voice.string,
                        fret + semitones,
                        speller.spell(pitch, spell_as),
                        role,
                        spell_as,
                    )
                }
                _ => voice.clone(),
            })
            .collect();

        Voicing {
            root,
            formula_id: self.formula_id.clone(),
            strings,
            inversion: self.inversion,
            start_fret: self.start_fret + semitones,
            stretch: self.stretch,
        }
    }

    /// Check every played note against the pitch its string and fret produce.
    pub fn verify(&self, tuning: &Tuning) -> Result<(), FretError> {
        for voice in &self.strings {
            if let (Some(fret), Some(note)) = (voice.fret, voice.note) {
                let sounding = tuning.pitch_class_at(voice.string, fret)?;
                if sounding != note.pitch_class() {
                    return Err(FretError::UnrealizableVoicing(format!(
                        "string {} fret {} sounds pitch class {}, not {}",
                        voice.string,
                        fret,
                        sounding.value(),
                        note
                    )));
                }
            }
        }
        Ok(())
    }
}
