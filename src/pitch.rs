//! # Pitch Arithmetic
//!
//! Modular arithmetic over the 12-tone chromatic space, plus the spelled note types built on
//! top of it.
//!
//! ## Types
//! - [`PitchClass`] - octave-free semitone index in `0..12`
//! - [`Letter`] - the seven natural note names
//! - [`Note`] - a letter with an accidental count (`Eb`, `F#`, `Bbb`, `C##`)
//! - [`Pitch`] - a note in a specific octave (`E2`, `C#4`), with MIDI numbering (C4 = 60)
//!
//! All pitch computation is integer arithmetic on [`PitchClass`]. Spelling never takes part in
//! it: `D#` and `Eb` produce the same pitch class and only differ in display.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FretError;

pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// Octave-independent chromatic pitch, `0 = C` through `11 = B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Build from any semitone count; the value is reduced modulo 12.
    pub fn new(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(SEMITONES_PER_OCTAVE) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn add_semitones(self, n: i32) -> Self {
        add_semitones(self, n)
    }

    /// Signed difference `to - self`, in `-11..=11`.
    pub fn semitone_distance(self, to: PitchClass) -> i32 {
        semitone_distance(self, to)
    }

    /// Upward distance from `self` to `to`, in `0..12`.
    pub fn ascending_distance(self, to: PitchClass) -> i32 {
        semitone_distance(self, to).rem_euclid(SEMITONES_PER_OCTAVE)
    }
}

/// Transpose a pitch class by `n` semitones (either direction).
pub fn add_semitones(pitch: PitchClass, n: i32) -> PitchClass {
    PitchClass::new(pitch.0 as i32 + n)
}

/// Signed semitone distance from `a` to `b`. The caller decides which direction it wants;
/// use [`PitchClass::ascending_distance`] for the upward interval.
pub fn semitone_distance(a: PitchClass, b: PitchClass) -> i32 {
    b.0 as i32 - a.0 as i32
}

/// Natural note names A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position in the C-based letter cycle (C = 0, B = 6)
    pub fn index(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    pub fn from_index(index: i32) -> Letter {
        Self::ALL[index.rem_euclid(7) as usize]
    }

    /// Semitone offset of the natural letter from C
    pub fn natural_semitone(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Move `steps` letters up (or down, if negative), wrapping B -> C.
    pub fn step(self, steps: i32) -> Letter {
        Letter::from_index(self.index() + steps)
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// A spelled note: letter plus accidental (negative = flats, positive = sharps).
///
/// Accidentals are limited to a double flat or double sharp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    letter: Letter,
    accidental: i8,
}

impl Note {
    pub const MAX_ACCIDENTAL: i8 = 2;

    pub fn new(letter: Letter, accidental: i8) -> Result<Self, FretError> {
        if accidental.abs() > Self::MAX_ACCIDENTAL {
            return Err(FretError::InvalidNote(format!(
                "{} with {} accidentals",
                letter.as_char(),
                accidental
            )));
        }
        Ok(Note { letter, accidental })
    }

    pub fn natural(letter: Letter) -> Self {
        Note {
            letter,
            accidental: 0,
        }
    }

    pub fn letter(self) -> Letter {
        self.letter
    }

    pub fn accidental(self) -> i8 {
        self.accidental
    }

    pub fn pitch_class(self) -> PitchClass {
        PitchClass::new(self.letter.natural_semitone() + self.accidental as i32)
    }

    pub fn is_flat(self) -> bool {
        self.accidental < 0
    }

    pub fn is_sharp(self) -> bool {
        self.accidental > 0
    }

    /// Enharmonic equivalence: same pitch class, possibly different spelling.
    pub fn is_enharmonic(self, other: Note) -> bool {
        self.pitch_class() == other.pitch_class()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        let symbol = if self.accidental < 0 { "b" } else { "#" };
        for _ in 0..self.accidental.unsigned_abs() {
            f.write_str(symbol)?;
        }
        Ok(())
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Count trailing accidental symbols. Accepts `#`, `b`, and the unicode sharp/flat signs.
fn parse_accidentals(s: &str) -> Option<i8> {
    let mut accidental: i8 = 0;
    for c in s.chars() {
        match c {
            '#' | '♯' => accidental += 1,
            'b' | '♭' => accidental -= 1,
            _ => return None,
        }
        if accidental.abs() > Note::MAX_ACCIDENTAL {
            return None;
        }
    }
    if s.contains(['#', '♯']) && s.contains(['b', '♭']) {
        return None;
    }
    Some(accidental)
}

impl FromStr for Note {
    type Err = FretError;

    /// Parse `C`, `Eb`, `f#`, `Bbb`, `C##`, `E♭`. The letter is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| FretError::InvalidNote(s.to_string()))?;
        let accidental =
            parse_accidentals(chars.as_str()).ok_or_else(|| FretError::InvalidNote(s.to_string()))?;
        Ok(Note { letter, accidental })
    }
}

/// A note in a specific octave, in scientific pitch notation (C4 = middle C = MIDI 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub note: Note,
    pub octave: i8,
}

impl Pitch {
    pub fn new(note: Note, octave: i8) -> Self {
        Pitch { note, octave }
    }

    /// MIDI number. Octave follows the letter, so `B#3` is 60 and `Cb4` is 59.
    pub fn midi(self) -> i32 {
        (self.octave as i32 + 1) * SEMITONES_PER_OCTAVE
            + self.note.letter().natural_semitone()
            + self.note.accidental() as i32
    }

    pub fn pitch_class(self) -> PitchClass {
        self.note.pitch_class()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

impl Serialize for Pitch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Pitch {
    type Err = FretError;

    /// Parse `E2`, `Bb3`, `C#-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| FretError::InvalidNote(format!("{} (missing octave)", s)))?;
        let note: Note = trimmed[..split].parse()?;
        let octave: i8 = trimmed[split..]
            .parse()
            .map_err(|_| FretError::InvalidNote(format!("{} (bad octave)", s)))?;
        Ok(Pitch { note, octave })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_semitones_wraps_both_ways() {
        assert_eq!(add_semitones(PitchClass::new(11), 1), PitchClass::C);
        assert_eq!(add_semitones(PitchClass::C, -1).value(), 11);
        assert_eq!(add_semitones(PitchClass::new(4), 27).value(), 7);
        assert_eq!(add_semitones(PitchClass::new(4), -28).value(), 0);
    }

    #[test]
    fn test_semitone_distance() {
        let e = PitchClass::new(4);
        let c = PitchClass::C;
        assert_eq!(semitone_distance(c, e), 4);
        assert_eq!(semitone_distance(e, c), -4);
        assert_eq!(e.ascending_distance(c), 8);
        assert_eq!(c.ascending_distance(c), 0);
    }

    #[test]
    fn test_note_parsing() {
        let eb: Note = "Eb".parse().unwrap();
        assert_eq!(eb.letter(), Letter::E);
        assert_eq!(eb.accidental(), -1);
        assert_eq!(eb.pitch_class().value(), 3);

        assert_eq!("f#".parse::<Note>().unwrap().to_string(), "F#");
        assert_eq!("bb".parse::<Note>().unwrap().to_string(), "Bb");
        assert_eq!("Bbb".parse::<Note>().unwrap().pitch_class().value(), 9);
        assert_eq!("C##".parse::<Note>().unwrap().pitch_class().value(), 2);
        assert_eq!("E♭".parse::<Note>().unwrap().to_string(), "Eb");
    }

    #[test]
    fn test_note_parsing_invalid() {
        assert!("H".parse::<Note>().is_err());
        assert!("".parse::<Note>().is_err());
        assert!("C###".parse::<Note>().is_err());
        assert!("C#b".parse::<Note>().is_err());
        assert!("Cx".parse::<Note>().is_err());
    }

    #[test]
    fn test_cb_and_b_sharp_wrap() {
        assert_eq!("Cb".parse::<Note>().unwrap().pitch_class().value(), 11);
        assert_eq!("B#".parse::<Note>().unwrap().pitch_class().value(), 0);
        assert!("D#".parse::<Note>().unwrap().is_enharmonic("Eb".parse().unwrap()));
    }

    #[test]
    fn test_pitch_midi() {
        assert_eq!("E2".parse::<Pitch>().unwrap().midi(), 40);
        assert_eq!("C4".parse::<Pitch>().unwrap().midi(), 60);
        assert_eq!("B#3".parse::<Pitch>().unwrap().midi(), 60);
        assert_eq!("Cb4".parse::<Pitch>().unwrap().midi(), 59);
        assert_eq!("C-1".parse::<Pitch>().unwrap().midi(), 0);
        assert_eq!("Bb3".parse::<Pitch>().unwrap().to_string(), "Bb3");
        assert!("E".parse::<Pitch>().is_err());
    }
}
