//! # Tuning Model
//!
//! Open-string pitches of a fretted instrument and the contiguous string ranges voicings are
//! built on.
//!
//! String index 0 is always the lowest-pitched string. Open-string pitches must strictly
//! ascend; the intervals between them are data (5-5-5-4-5 on a standard guitar) and nothing in
//! the engine assumes them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use crate::error::FretError;
use crate::pitch::{Pitch, PitchClass};

const BUILTIN_TUNINGS: &str = include_str!("../data/tunings.yaml");

pub type Fret = i32;

/// Id of the six-string standard tuning in the builtin library
pub const STANDARD_GUITAR: &str = "standard-guitar";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tuning {
    pub id: String,
    pub name: String,
    strings: Vec<Pitch>,
}

impl Tuning {
    pub fn new(id: &str, name: &str, strings: Vec<Pitch>) -> Result<Self, FretError> {
        if strings.is_empty() {
            return Err(FretError::InvalidTuning(format!("{} has no strings", id)));
        }
        for pair in strings.windows(2) {
            if pair[1].midi() <= pair[0].midi() {
                return Err(FretError::InvalidTuning(format!(
                    "{}: {} is not above {}",
                    id, pair[1], pair[0]
                )));
            }
        }
        Ok(Tuning {
            id: id.to_string(),
            name: name.to_string(),
            strings,
        })
    }

    /// E2 A2 D3 G3 B3 E4, from the builtin tuning library
    pub fn standard_guitar() -> Result<Self, FretError> {
        TuningLibrary::builtin()?.get(STANDARD_GUITAR).cloned()
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    pub fn strings(&self) -> &[Pitch] {
        &self.strings
    }

    pub fn open_string(&self, string: usize) -> Result<Pitch, FretError> {
        self.strings.get(string).copied().ok_or_else(|| {
            FretError::InvalidStringSet(format!(
                "string {} does not exist on {} ({} strings)",
                string,
                self.id,
                self.strings.len()
            ))
        })
    }

    /// Semitones from the open `from` string up to the open `to` string (negative if lower).
    pub fn semitones_between(&self, from: usize, to: usize) -> Result<i32, FretError> {
        Ok(self.open_string(to)?.midi() - self.open_string(from)?.midi())
    }

    /// Intervals between neighbouring strings, low to high.
    pub fn intervals(&self) -> Vec<i32> {
        self.strings
            .windows(2)
            .map(|pair| pair[1].midi() - pair[0].midi())
            .collect()
    }

    /// MIDI number sounding at `fret` on `string`.
    pub fn midi_at(&self, string: usize, fret: Fret) -> Result<i32, FretError> {
        Ok(self.open_string(string)?.midi() + fret)
    }

    pub fn pitch_class_at(&self, string: usize, fret: Fret) -> Result<PitchClass, FretError> {
        Ok(self.open_string(string)?.pitch_class().add_semitones(fret))
    }

    /// Every contiguous string set of `size` strings, low to high.
    pub fn string_sets(&self, size: usize) -> Vec<StringSet> {
        if size == 0 || size > self.strings.len() {
            return Vec::new();
        }
        (0..=self.strings.len() - size)
            .map(|start| StringSet::new(start, size))
            .collect()
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.strings.iter().map(|p| p.to_string()).collect();
        write!(f, "{} [{}]", self.id, names.join(" "))
    }
}

/// A contiguous range of strings, `start` being the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringSet {
    pub start: usize,
    pub len: usize,
}

impl StringSet {
    pub fn new(start: usize, len: usize) -> Self {
        StringSet { start, len }
    }

    /// Build from explicit indices, which must be contiguous.
    pub fn from_indices(indices: &[usize]) -> Result<Self, FretError> {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        let first = *sorted
            .first()
            .ok_or_else(|| FretError::InvalidStringSet("no strings".to_string()))?;
        if sorted.len() != indices.len() {
            return Err(FretError::InvalidStringSet(format!("{:?} repeats a string", indices)));
        }
        if sorted.iter().enumerate().any(|(i, &s)| s != first + i) {
            return Err(FretError::InvalidStringSet(format!("{:?} is not contiguous", indices)));
        }
        Ok(StringSet::new(first, sorted.len()))
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn contains(&self, string: usize) -> bool {
        self.indices().contains(&string)
    }

    /// Check the set lies on the instrument.
    pub fn check(&self, tuning: &Tuning) -> Result<(), FretError> {
        if self.len == 0 {
            return Err(FretError::InvalidStringSet("empty string set".to_string()));
        }
        if self.end() > tuning.string_count() {
            return Err(FretError::InvalidStringSet(format!(
                "strings {} are outside {} ({} strings)",
                self,
                tuning.id,
                tuning.string_count()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for StringSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 0 {
            return write!(f, "{}-", self.start);
        }
        write!(f, "{}-{}", self.start, self.end() - 1)
    }
}

impl FromStr for StringSet {
    type Err = FretError;

    /// Parse `3-5` or `3,4,5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FretError::InvalidStringSet(s.to_string());
        let trimmed = s.trim();
        if let Some((low, high)) = trimmed.split_once('-') {
            let low: usize = low.trim().parse().map_err(|_| bad())?;
            let high: usize = high.trim().parse().map_err(|_| bad())?;
            if high < low {
                return Err(bad());
            }
            return Ok(StringSet::new(low, high - low + 1));
        }
        let indices = trimmed
            .split(',')
            .map(|part| part.trim().parse::<usize>().map_err(|_| bad()))
            .collect::<Result<Vec<_>, _>>()?;
        StringSet::from_indices(&indices)
    }
}

/// Raw tuning entry for YAML deserialization
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct RawTuning {
    id: String,
    name: Option<String>,
    strings: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawTunings {
    #[serde(default)]
    tunings: Vec<RawTuning>,
}

/// Named tunings loaded from configuration, in file order.
#[derive(Debug, Clone, Default)]
pub struct TuningLibrary {
    tunings: Vec<Tuning>,
}

impl TuningLibrary {
    pub fn builtin() -> Result<Self, FretError> {
        Self::from_yaml(BUILTIN_TUNINGS)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FretError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| FretError::ConfigError(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, FretError> {
        let raw: RawTunings =
            serde_yaml::from_str(content).map_err(|e| FretError::ConfigError(e.to_string()))?;

        let mut tunings: Vec<Tuning> = Vec::with_capacity(raw.tunings.len());
        for entry in raw.tunings {
            if tunings.iter().any(|t| t.id == entry.id) {
                return Err(FretError::InvalidTuning(format!("duplicate tuning {}", entry.id)));
            }
            let strings = entry
                .strings
                .iter()
                .map(|s| s.parse::<Pitch>())
                .collect::<Result<Vec<_>, _>>()?;
            let name = entry.name.clone().unwrap_or_else(|| entry.id.clone());
            tunings.push(Tuning::new(&entry.id, &name, strings)?);
        }

        log::info!("loaded {} tunings", tunings.len());
        Ok(TuningLibrary { tunings })
    }

    pub fn get(&self, id: &str) -> Result<&Tuning, FretError> {
        self.tunings
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| FretError::InvalidTuning(format!("unknown tuning {}", id)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tuning> {
        self.tunings.iter()
    }

    pub fn len(&self) -> usize {
        self.tunings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tunings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_guitar_intervals() {
        let tuning = Tuning::standard_guitar().unwrap();
        assert_eq!(tuning.intervals(), vec![5, 5, 5, 4, 5]);
        assert_eq!(tuning.semitones_between(0, 5).unwrap(), 24);
        assert_eq!(tuning.semitones_between(4, 3).unwrap(), -4);
        assert_eq!(tuning.midi_at(3, 5).unwrap(), 60);
        assert_eq!(tuning.pitch_class_at(3, 5).unwrap(), PitchClass::C);
    }

    #[test]
    fn test_builtin_library() {
        let library = TuningLibrary::builtin().unwrap();
        let standard = library.get(STANDARD_GUITAR).unwrap();
        assert_eq!(standard, &Tuning::standard_guitar().unwrap());
        let names: Vec<String> = standard.strings().iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["E2", "A2", "D3", "G3", "B3", "E4"]);
        assert_eq!(library.get("drop-d").unwrap().intervals(), vec![7, 5, 5, 4, 5]);
        assert!(library.get("banjo").is_err());
    }

    #[test]
    fn test_tuning_must_ascend() {
        let strings = vec!["G4".parse().unwrap(), "C4".parse().unwrap()];
        assert!(matches!(
            Tuning::new("reentrant", "Re-entrant", strings),
            Err(FretError::InvalidTuning(_))
        ));
        assert!(Tuning::new("none", "None", vec![]).is_err());
    }

    #[test]
    fn test_string_set_parsing() {
        assert_eq!("3-5".parse::<StringSet>().unwrap(), StringSet::new(3, 3));
        assert_eq!("2,3,4,5".parse::<StringSet>().unwrap(), StringSet::new(2, 4));
        assert_eq!("5,4,3".parse::<StringSet>().unwrap(), StringSet::new(3, 3));
        assert!("1,3".parse::<StringSet>().is_err());
        assert!("5-3".parse::<StringSet>().is_err());
        assert!("a-b".parse::<StringSet>().is_err());
        assert_eq!(StringSet::new(3, 3).to_string(), "3-5");
    }

    #[test]
    fn test_string_set_check() {
        let tuning = Tuning::standard_guitar().unwrap();
        assert!(StringSet::new(3, 3).check(&tuning).is_ok());
        assert!(StringSet::new(4, 3).check(&tuning).is_err());
        assert!(StringSet::new(0, 0).check(&tuning).is_err());
        assert_eq!(tuning.string_sets(3).len(), 4);
        assert_eq!(tuning.string_sets(7).len(), 0);
    }
}
