//! # Enharmonic Spelling
//!
//! Chooses the letter name for a pitch class from the harmonic role it plays.
//!
//! ## Rule
//! The letter is the root's letter moved up by the role's letter steps (`degree - 1`), and
//! the accidental is whatever brings that letter onto the pitch class:
//!
//! ```text
//! root C, role b3  -> letter E, pitch class 3 -> Eb
//! root C, role #9  -> letter D, pitch class 3 -> D#
//! root C, role #5  -> letter G, pitch class 8 -> G#
//! root C, role b6  -> letter A, pitch class 8 -> Ab
//! ```
//!
//! Spelling is therefore a function of the role, never of the pitch alone. Only when the
//! role-derived spelling would need a triple accidental does the resolver fall back to the
//! key preference (sharps or flats).

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FretError;
use crate::pitch::{Letter, Note, PitchClass, SEMITONES_PER_OCTAVE};

/// Semitone offsets of the major-scale degrees 1..7
const MAJOR_DEGREES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Highest supported degree (a compound 8th above the octave)
pub const MAX_DEGREE: u8 = 15;

/// Harmonic role relative to a root: a scale degree with an alteration.
///
/// Written as `1`, `b3`, `#11`, `bb7`. `R` and `root` are accepted for degree 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Role {
    degree: u8,
    alteration: i8,
}

impl Role {
    pub const ROOT: Role = Role {
        degree: 1,
        alteration: 0,
    };

    pub fn new(degree: u8, alteration: i8) -> Result<Self, FretError> {
        if degree == 0 || degree > MAX_DEGREE || alteration.abs() > 2 {
            return Err(FretError::InvalidRole(format!(
                "degree {} with alteration {}",
                degree, alteration
            )));
        }
        Ok(Role { degree, alteration })
    }

    pub fn degree(self) -> u8 {
        self.degree
    }

    pub fn alteration(self) -> i8 {
        self.alteration
    }

    /// Number of letter names between the root and this role (0 for the root, 2 for a 3rd).
    pub fn letter_steps(self) -> i32 {
        (self.degree as i32 - 1) % 7
    }

    /// Semitones above the root implied by the role (`b3` = 3, `9` = 14, `bb7` = 9).
    pub fn semitones(self) -> i32 {
        let index = self.degree as i32 - 1;
        MAJOR_DEGREES[(index % 7) as usize]
            + SEMITONES_PER_OCTAVE * (index / 7)
            + self.alteration as i32
    }

    pub fn is_flat(self) -> bool {
        self.alteration < 0
    }

    pub fn is_sharp(self) -> bool {
        self.alteration > 0
    }

    /// Derive a role from letter steps and a semitone offset above the root.
    ///
    /// Used when rotating scales into modes: the 4th note of Lydian is 4 letters up and 6
    /// semitones up, which makes it `#4`. Returns `None` when the alteration exceeds a double
    /// sharp/flat.
    pub fn from_steps(letter_steps: i32, semitones: i32) -> Option<Role> {
        let steps = letter_steps.rem_euclid(7);
        let natural = MAJOR_DEGREES[steps as usize];
        let mut alteration = semitones.rem_euclid(SEMITONES_PER_OCTAVE) - natural;
        if alteration > 6 {
            alteration -= SEMITONES_PER_OCTAVE;
        } else if alteration < -6 {
            alteration += SEMITONES_PER_OCTAVE;
        }
        Role::new(steps as u8 + 1, i8::try_from(alteration).ok()?).ok()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = if self.alteration < 0 { "b" } else { "#" };
        for _ in 0..self.alteration.unsigned_abs() {
            f.write_str(symbol)?;
        }
        write!(f, "{}", self.degree)
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Role {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("r") || trimmed.eq_ignore_ascii_case("root") {
            return Ok(Role::ROOT);
        }

        let digits_at = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| FretError::InvalidRole(s.to_string()))?;
        let (prefix, digits) = trimmed.split_at(digits_at);

        let alteration = if prefix.chars().all(|c| c == 'b' || c == '♭') {
            -(prefix.chars().count() as i32)
        } else if prefix.chars().all(|c| c == '#' || c == '♯') {
            prefix.chars().count() as i32
        } else {
            return Err(FretError::InvalidRole(s.to_string()));
        };

        let degree: u8 = digits
            .parse()
            .map_err(|_| FretError::InvalidRole(s.to_string()))?;
        let alteration =
            i8::try_from(alteration).map_err(|_| FretError::InvalidRole(s.to_string()))?;
        Role::new(degree, alteration).map_err(|_| FretError::InvalidRole(s.to_string()))
    }
}

/// Which accidental to reach for when a pitch has no role to spell it by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellingPreference {
    Sharps,
    Flats,
}

impl SpellingPreference {
    /// Flat roots (and F) read in flats; everything else reads in sharps.
    pub fn for_root(root: Note) -> Self {
        if root.is_flat() || (root.letter() == Letter::F && root.accidental() == 0) {
            SpellingPreference::Flats
        } else {
            SpellingPreference::Sharps
        }
    }

    /// Preference for a key named only by its pitch class: Db, Eb, F, Ab and Bb read in
    /// flats, the rest (F# included) in sharps.
    pub fn for_key(tonic: PitchClass) -> Self {
        match tonic.value() {
            1 | 3 | 5 | 8 | 10 => SpellingPreference::Flats,
            _ => SpellingPreference::Sharps,
        }
    }
}

/// Spell a bare pitch class by preference alone.
pub fn spell_chromatic(pitch: PitchClass, preference: SpellingPreference) -> Note {
    use SpellingPreference::{Flats, Sharps};
    let (letter, accidental) = match (pitch.value(), preference) {
        (0, _) => (Letter::C, 0),
        (1, Flats) => (Letter::D, -1),
        (1, Sharps) => (Letter::C, 1),
        (2, _) => (Letter::D, 0),
        (3, Flats) => (Letter::E, -1),
        (3, Sharps) => (Letter::D, 1),
        (4, _) => (Letter::E, 0),
        (5, _) => (Letter::F, 0),
        (6, Flats) => (Letter::G, -1),
        (6, Sharps) => (Letter::F, 1),
        (7, _) => (Letter::G, 0),
        (8, Flats) => (Letter::A, -1),
        (8, Sharps) => (Letter::G, 1),
        (9, _) => (Letter::A, 0),
        (10, Flats) => (Letter::B, -1),
        (10, Sharps) => (Letter::A, 1),
        _ => (Letter::B, 0),
    };
    Note::new(letter, accidental).unwrap_or(Note::natural(letter))
}

/// Spell `pitch`, which plays `role` above `root`.
pub fn spell(pitch: PitchClass, role: Role, root: Note, preference: SpellingPreference) -> Note {
    let letter = root.letter().step(role.letter_steps());
    let natural = PitchClass::new(letter.natural_semitone());
    let mut accidental = natural.ascending_distance(pitch);
    if accidental > 6 {
        accidental -= SEMITONES_PER_OCTAVE;
    }

    match Note::new(letter, accidental as i8) {
        Ok(note) => note,
        Err(_) => {
            let note = spell_chromatic(pitch, preference);
            log::warn!(
                "role {} above {} needs {} accidentals on {}; spelling as {}",
                role,
                root,
                accidental,
                letter.as_char(),
                note
            );
            note
        }
    }
}

/// Spells every tone of a voicing against one root.
#[derive(Debug, Clone, Copy)]
pub struct Speller {
    root: Note,
    preference: SpellingPreference,
}

impl Speller {
    pub fn new(root: Note, preference: Option<SpellingPreference>) -> Self {
        Speller {
            root,
            preference: preference.unwrap_or_else(|| SpellingPreference::for_root(root)),
        }
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn preference(&self) -> SpellingPreference {
        self.preference
    }

    pub fn spell(&self, pitch: PitchClass, role: Role) -> Note {
        spell(pitch, role, self.root, self.preference)
    }

    /// Spell the pitch a role implies, without a precomputed pitch class.
    pub fn spell_role(&self, role: Role) -> Note {
        self.spell(self.root.pitch_class().add_semitones(role.semitones()), role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(s: &str) -> Note {
        s.parse().unwrap()
    }

    fn role(s: &str) -> Role {
        s.parse().unwrap()
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(role("1"), Role::ROOT);
        assert_eq!(role("R"), Role::ROOT);
        assert_eq!(role("b3").semitones(), 3);
        assert_eq!(role("#11").semitones(), 18);
        assert_eq!(role("bb7").semitones(), 9);
        assert_eq!(role("13").semitones(), 21);
        assert_eq!(role("b9").to_string(), "b9");
        assert_eq!(role("♯5").to_string(), "#5");
    }

    #[test]
    fn test_role_parsing_invalid() {
        assert!("".parse::<Role>().is_err());
        assert!("b".parse::<Role>().is_err());
        assert!("0".parse::<Role>().is_err());
        assert!("16".parse::<Role>().is_err());
        assert!("#b5".parse::<Role>().is_err());
        assert!("bbb7".parse::<Role>().is_err());
        assert!("x5".parse::<Role>().is_err());
    }

    #[test]
    fn test_minor_third_spells_flat() {
        let speller = Speller::new(note("C"), None);
        assert_eq!(speller.spell_role(role("b3")).to_string(), "Eb");
        assert_eq!(speller.spell_role(role("#9")).to_string(), "D#");
    }

    #[test]
    fn test_sharp_five_and_flat_six_differ() {
        let speller = Speller::new(note("C"), None);
        let sharp_five = speller.spell_role(role("#5"));
        let flat_six = speller.spell_role(role("b6"));
        assert_eq!(sharp_five.pitch_class(), flat_six.pitch_class());
        assert_eq!(sharp_five.to_string(), "G#");
        assert_eq!(flat_six.to_string(), "Ab");
    }

    #[test]
    fn test_spelling_follows_root_letter() {
        let gb = Speller::new(note("Gb"), None);
        assert_eq!(gb.spell_role(role("3")).to_string(), "Bb");
        assert_eq!(gb.spell_role(role("5")).to_string(), "Db");

        let fs = Speller::new(note("F#"), None);
        assert_eq!(fs.spell_role(role("b7")).to_string(), "E");
        assert_eq!(fs.spell_role(role("3")).to_string(), "A#");

        let c = Speller::new(note("C"), None);
        assert_eq!(c.spell_role(role("bb7")).to_string(), "Bbb");
    }

    #[test]
    fn test_triple_accidental_falls_back_to_preference() {
        // Fb + bb7 would be E-triple-flat
        let speller = Speller::new(note("Fb"), None);
        assert_eq!(speller.preference(), SpellingPreference::Flats);
        assert_eq!(speller.spell_role(role("bb7")).to_string(), "Db");
    }

    #[test]
    fn test_role_from_steps() {
        assert_eq!(Role::from_steps(3, 6), Some(role("#4")));
        assert_eq!(Role::from_steps(6, 10), Some(role("b7")));
        assert_eq!(Role::from_steps(3, 4), Some(role("b4")));
        assert_eq!(Role::from_steps(0, 0), Some(Role::ROOT));
        assert_eq!(Role::from_steps(2, 0), None);
    }

    #[test]
    fn test_preference_for_root() {
        assert_eq!(SpellingPreference::for_root(note("F")), SpellingPreference::Flats);
        assert_eq!(SpellingPreference::for_root(note("Bb")), SpellingPreference::Flats);
        assert_eq!(SpellingPreference::for_root(note("G")), SpellingPreference::Sharps);
        assert_eq!(SpellingPreference::for_key(PitchClass::new(3)), SpellingPreference::Flats);
        assert_eq!(SpellingPreference::for_key(PitchClass::new(8)), SpellingPreference::Flats);
        assert_eq!(SpellingPreference::for_key(PitchClass::new(6)), SpellingPreference::Sharps);
        assert_eq!(SpellingPreference::for_key(PitchClass::new(2)), SpellingPreference::Sharps);
        assert_eq!(spell_chromatic(PitchClass::new(6), SpellingPreference::Flats).to_string(), "Gb");
        assert_eq!(spell_chromatic(PitchClass::new(6), SpellingPreference::Sharps).to_string(), "F#");
    }
}
