//! # Formula Library
//!
//! A registry of chord and scale formulas, loaded from YAML and validated on registration.
//!
//! ## Formula Shapes
//! ```text
//! FormulaLibrary
//!   ├── roles: Vec<RoleInfo>            (spelling policy + display name/color per role)
//!   ├── formulas: HashMap<id, Formula>
//!   │     └── tones: Vec<Tone>          (role, semitone offset, spell-as role)
//!   └── aliases: HashMap<alias, id>     (mode names -> "<parent>-mode-<n>")
//! ```
//!
//! ## Validation Rules
//! - The first tone is the root at offset 0 and offsets strictly increase
//! - Offsets of 12 or more, and repeated pitch classes, need `spans-octaves: true`
//! - Roles are unique within a formula
//! - Every role must be registered in the role table and must imply the tone's pitch class,
//!   otherwise the formula is rejected with `AmbiguousSpelling`
//!
//! ## YAML Format
//! ```yaml
//! roles:
//!   - { role: "1", name: Root, color: "#d32f2f" }
//!   - { role: "b3", name: Minor 3rd, color: "#1976d2" }
//! formulas:
//!   - id: minor-triad
//!     name: Minor
//!     kind: triad
//!     tones:
//!       - { role: "1", offset: 0 }
//!       - { role: "b3", offset: 3 }
//!       - { role: "5", offset: 7 }
//!   - id: major-scale
//!     kind: scale
//!     steps: [2, 2, 1, 2, 2, 2, 1]
//!     roles: ["1", "2", "3", "4", "5", "6", "7"]
//!     modes:
//!       - { id: ionian }
//!       - { id: dorian }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::FretError;
use crate::inversion::Inversion;
use crate::pitch::{PitchClass, SEMITONES_PER_OCTAVE};
use crate::spelling::Role;

const BUILTIN_FORMULAS: &str = include_str!("../data/formulas.yaml");

/// Broad family of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaKind {
    Triad,
    Tetrad,
    Extended,
    Scale,
}

impl FormulaKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "triad" => Some(FormulaKind::Triad),
            "tetrad" | "seventh" => Some(FormulaKind::Tetrad),
            "extended" => Some(FormulaKind::Extended),
            "scale" | "mode" => Some(FormulaKind::Scale),
            _ => None,
        }
    }
}

/// One tone of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tone {
    pub role: Role,
    /// Semitones above the root; may exceed an octave for compound formulas
    pub offset: i32,
    /// Role whose letter is used when spelling this tone (normally `role` itself)
    pub spell_as: Role,
}

impl Tone {
    pub fn new(role: Role, offset: i32) -> Self {
        Tone {
            role,
            offset,
            spell_as: role,
        }
    }

    pub fn with_spelling(mut self, spell_as: Role) -> Self {
        self.spell_as = spell_as;
        self
    }

    pub fn pitch_class(&self, root: PitchClass) -> PitchClass {
        root.add_semitones(self.offset)
    }
}

/// A complete harmonic structure: ordered roles with offsets from the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub id: String,
    pub name: String,
    pub kind: FormulaKind,
    pub tones: Vec<Tone>,
    pub spans_octaves: bool,
}

impl Formula {
    pub fn new(id: &str, name: &str, kind: FormulaKind, tones: Vec<Tone>) -> Self {
        Formula {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            tones,
            spans_octaves: false,
        }
    }

    pub fn spanning_octaves(mut self) -> Self {
        self.spans_octaves = true;
        self
    }

    /// Build a formula from consecutive semitone steps and matching roles.
    ///
    /// A step total of exactly 12 closes the octave; that final step does not add a tone.
    pub fn from_steps(
        id: &str,
        name: &str,
        kind: FormulaKind,
        steps: &[i32],
        roles: &[Role],
    ) -> Result<Self, FretError> {
        let mut offsets = vec![0];
        let mut total = 0;
        for step in steps {
            total += step;
            offsets.push(total);
        }
        if total == SEMITONES_PER_OCTAVE {
            offsets.pop();
        }

        if offsets.len() != roles.len() {
            return Err(FretError::FormulaDefinition {
                formula: id.to_string(),
                message: format!("{} roles for {} tones", roles.len(), offsets.len()),
            });
        }

        let tones = roles
            .iter()
            .zip(offsets)
            .map(|(role, offset)| Tone::new(*role, offset))
            .collect();
        Ok(Formula::new(id, name, kind, tones))
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.tones.iter().map(|t| t.role)
    }

    pub fn position_of(&self, role: Role) -> Option<usize> {
        self.tones.iter().position(|t| t.role == role)
    }

    /// Pitch classes of the formula over `root`, in formula order.
    pub fn pitch_classes(&self, root: PitchClass) -> Vec<PitchClass> {
        self.tones.iter().map(|t| t.pitch_class(root)).collect()
    }

    /// Rotate the formula to start on its `degree`th tone (1-based) and re-derive the roles
    /// from letter steps. Rotating the major scale to degree 2 yields Dorian.
    pub fn mode(&self, degree: usize, id: &str, name: &str) -> Result<Formula, FretError> {
        if degree == 0 || degree > self.tones.len() {
            return Err(FretError::FormulaDefinition {
                formula: self.id.clone(),
                message: format!("no mode {} in a {}-tone formula", degree, self.tones.len()),
            });
        }

        let start = degree - 1;
        let pivot = self.tones[start];
        let n = self.tones.len();
        let mut tones = Vec::with_capacity(n);
        for i in 0..n {
            let tone = self.tones[(start + i) % n];
            let offset = (tone.offset - pivot.offset).rem_euclid(SEMITONES_PER_OCTAVE);
            let steps = tone.spell_as.letter_steps() - pivot.spell_as.letter_steps();
            let role = Role::from_steps(steps, offset).ok_or_else(|| FretError::AmbiguousSpelling {
                formula: id.to_string(),
                role: format!("{} steps / {} semitones", steps.rem_euclid(7), offset),
            })?;
            tones.push(Tone::new(role, offset));
        }

        Ok(Formula::new(id, name, self.kind, tones))
    }

    /// Select the tones to voice. Roles are returned in formula order whatever order they are
    /// requested in.
    pub fn subset(&self, roles: &[Role]) -> Result<FormulaSubset, FretError> {
        if roles.is_empty() {
            return Err(FretError::InvalidFormula(format!("{}: empty role selection", self.id)));
        }
        let mut positions = Vec::with_capacity(roles.len());
        for role in roles {
            let position = self.position_of(*role).ok_or_else(|| {
                FretError::InvalidFormula(format!("{} has no role {}", self.id, role))
            })?;
            if positions.contains(&position) {
                return Err(FretError::InvalidFormula(format!(
                    "{}: role {} selected twice",
                    self.id, role
                )));
            }
            positions.push(position);
        }
        positions.sort_unstable();

        Ok(FormulaSubset {
            formula_id: self.id.clone(),
            tones: positions.iter().map(|&p| self.tones[p]).collect(),
            positions,
        })
    }

    /// Every tone of the formula.
    pub fn full(&self) -> FormulaSubset {
        FormulaSubset {
            formula_id: self.id.clone(),
            tones: self.tones.clone(),
            positions: (0..self.tones.len()).collect(),
        }
    }
}

/// The tones of one formula that a voicing realizes
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaSubset {
    pub formula_id: String,
    pub tones: Vec<Tone>,
    /// Index of each tone in the full formula
    pub positions: Vec<usize>,
}

impl FormulaSubset {
    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    pub fn index_of(&self, role: Role) -> Option<usize> {
        self.tones.iter().position(|t| t.role == role)
    }

    /// Inversion named after a subset tone being lowest
    pub fn inversion_at(&self, index: usize) -> Inversion {
        Inversion::new(self.positions[index])
    }

    /// Inversion labels of all subset tones, in subset order
    pub fn inversions(&self) -> Vec<Inversion> {
        (0..self.len()).map(|i| self.inversion_at(i)).collect()
    }
}

/// Display metadata and spelling registration for a role
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleInfo {
    pub role: Role,
    pub name: String,
    pub color: Option<String>,
}

/// Raw role entry for YAML deserialization
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct RawRole {
    role: String,
    name: String,
    color: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct RawTone {
    role: String,
    offset: i32,
    spell_as: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct RawMode {
    id: String,
    name: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct RawFormula {
    id: String,
    name: Option<String>,
    kind: Option<String>,
    #[serde(default)]
    tones: Vec<RawTone>,
    #[serde(default)]
    steps: Vec<i32>,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    spans_octaves: bool,
    #[serde(default)]
    modes: Vec<RawMode>,
}

/// Raw formula file for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawLibrary {
    #[serde(default)]
    roles: Vec<RawRole>,
    #[serde(default)]
    formulas: Vec<RawFormula>,
}

/// Registry of validated formulas, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct FormulaLibrary {
    roles: Vec<RoleInfo>,
    role_index: HashMap<Role, usize>,
    formulas: HashMap<String, Formula>,
    aliases: HashMap<String, String>,
    order: Vec<String>,
}

impl FormulaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The formula and role tables shipped with the crate.
    pub fn builtin() -> Result<Self, FretError> {
        Self::from_yaml(BUILTIN_FORMULAS)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FretError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| FretError::ConfigError(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, FretError> {
        let raw: RawLibrary =
            serde_yaml::from_str(content).map_err(|e| FretError::ConfigError(e.to_string()))?;

        let mut library = FormulaLibrary::new();
        for raw_role in raw.roles {
            let role: Role = raw_role.role.parse()?;
            library.register_role(RoleInfo {
                role,
                name: raw_role.name,
                color: raw_role.color,
            });
        }

        for raw_formula in raw.formulas {
            let formula = parse_formula(&raw_formula)?;
            let id = formula.id.clone();
            library.register(formula)?;

            for (i, mode) in raw_formula.modes.iter().enumerate() {
                let degree = i + 1;
                let canonical = format!("{}-mode-{}", id, degree);
                let name = mode.name.clone().unwrap_or_else(|| title_case(&mode.id));
                if degree == 1 {
                    library.alias(&canonical, &id)?;
                } else {
                    let derived = library.get(&id)?.mode(degree, &canonical, &name)?;
                    library.register(derived)?;
                }
                library.alias(&mode.id, &canonical)?;
            }
        }

        log::info!(
            "loaded {} formulas ({} aliases) and {} roles",
            library.formulas.len(),
            library.aliases.len(),
            library.roles.len()
        );
        Ok(library)
    }

    /// Register (or replace) the spelling policy and display data for a role.
    pub fn register_role(&mut self, info: RoleInfo) {
        match self.role_index.get(&info.role) {
            Some(&i) => self.roles[i] = info,
            None => {
                self.role_index.insert(info.role, self.roles.len());
                self.roles.push(info);
            }
        }
    }

    pub fn role_info(&self, role: Role) -> Option<&RoleInfo> {
        self.role_index.get(&role).map(|&i| &self.roles[i])
    }

    pub fn roles(&self) -> &[RoleInfo] {
        &self.roles
    }

    /// Validate and add a formula. Identifiers must be unique across formulas and aliases.
    pub fn register(&mut self, formula: Formula) -> Result<(), FretError> {
        if self.contains(&formula.id) {
            return Err(FretError::FormulaDefinition {
                formula: formula.id,
                message: "duplicate identifier".to_string(),
            });
        }
        self.validate(&formula)?;
        log::debug!("registered formula {} ({} tones)", formula.id, formula.len());
        self.order.push(formula.id.clone());
        self.formulas.insert(formula.id.clone(), formula);
        Ok(())
    }

    fn alias(&mut self, alias: &str, target: &str) -> Result<(), FretError> {
        if alias == target {
            return Ok(());
        }
        if self.contains(alias) {
            return Err(FretError::FormulaDefinition {
                formula: alias.to_string(),
                message: "duplicate identifier".to_string(),
            });
        }
        let target = self.resolve(target).to_string();
        self.aliases.insert(alias.to_string(), target);
        Ok(())
    }

    fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.aliases.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.formulas.contains_key(id) || self.aliases.contains_key(id)
    }

    /// Look up a formula by identifier or alias.
    pub fn get(&self, id: &str) -> Result<&Formula, FretError> {
        self.formulas
            .get(self.resolve(id))
            .ok_or_else(|| FretError::InvalidFormula(id.to_string()))
    }

    /// Formula identifiers in registration order (aliases excluded).
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    pub fn by_kind(&self, kind: FormulaKind) -> Vec<&Formula> {
        self.order
            .iter()
            .filter_map(|id| self.formulas.get(id))
            .filter(|f| f.kind == kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    fn validate(&self, formula: &Formula) -> Result<(), FretError> {
        let fail = |message: String| FretError::FormulaDefinition {
            formula: formula.id.clone(),
            message,
        };

        let first = formula
            .tones
            .first()
            .ok_or_else(|| fail("no tones".to_string()))?;
        if first.offset != 0 {
            return Err(fail(format!("first tone {} is not at offset 0", first.role)));
        }

        let mut roles = HashSet::new();
        let mut pitch_classes = HashSet::new();
        let mut previous: Option<i32> = None;
        for tone in &formula.tones {
            if let Some(prev) = previous {
                if tone.offset <= prev {
                    return Err(fail(format!(
                        "offset {} of {} does not follow {}",
                        tone.offset, tone.role, prev
                    )));
                }
            }
            previous = Some(tone.offset);

            if !formula.spans_octaves {
                if tone.offset >= SEMITONES_PER_OCTAVE {
                    return Err(fail(format!(
                        "{} at offset {} leaves the octave without spans-octaves",
                        tone.role, tone.offset
                    )));
                }
                if !pitch_classes.insert(tone.offset.rem_euclid(SEMITONES_PER_OCTAVE)) {
                    return Err(fail(format!("{} repeats a pitch class", tone.role)));
                }
            }

            if !roles.insert(tone.role) {
                return Err(fail(format!("role {} appears twice", tone.role)));
            }

            for role in [tone.role, tone.spell_as] {
                let registered = self.role_index.contains_key(&role);
                let consistent = (role.semitones() - tone.offset).rem_euclid(SEMITONES_PER_OCTAVE) == 0;
                if !registered || !consistent {
                    return Err(FretError::AmbiguousSpelling {
                        formula: formula.id.clone(),
                        role: role.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn parse_formula(raw: &RawFormula) -> Result<Formula, FretError> {
    let name = raw.name.clone().unwrap_or_else(|| title_case(&raw.id));
    let kind = match &raw.kind {
        Some(k) => FormulaKind::from_str(k).ok_or_else(|| FretError::FormulaDefinition {
            formula: raw.id.clone(),
            message: format!("unknown kind '{}'", k),
        })?,
        None => FormulaKind::Scale,
    };

    let formula = if !raw.tones.is_empty() {
        let mut tones = Vec::with_capacity(raw.tones.len());
        for raw_tone in &raw.tones {
            let role: Role = raw_tone.role.parse()?;
            let mut tone = Tone::new(role, raw_tone.offset);
            if let Some(spell_as) = &raw_tone.spell_as {
                tone = tone.with_spelling(spell_as.parse()?);
            }
            tones.push(tone);
        }
        Formula::new(&raw.id, &name, kind, tones)
    } else if !raw.steps.is_empty() {
        let roles = raw
            .roles
            .iter()
            .map(|r| r.parse())
            .collect::<Result<Vec<Role>, FretError>>()?;
        Formula::from_steps(&raw.id, &name, kind, &raw.steps, &roles)?
    } else {
        return Err(FretError::FormulaDefinition {
            formula: raw.id.clone(),
            message: "needs either tones or steps".to_string(),
        });
    };

    Ok(if raw.spans_octaves {
        formula.spanning_octaves()
    } else {
        formula
    })
}

/// "lydian-dominant" -> "Lydian Dominant"
fn title_case(id: &str) -> String {
    id.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: &str = r##"
roles:
  - { role: "1", name: Root }
  - { role: "b3", name: Minor 3rd }
  - { role: "3", name: Major 3rd }
  - { role: "5", name: Perfect 5th }
  - { role: "b5", name: Diminished 5th }
  - { role: "#5", name: Augmented 5th }
  - { role: "b6", name: Minor 6th }
  - { role: "bb7", name: Diminished 7th }
  - { role: "8", name: Octave }
"##;

    fn library(formulas: &str) -> Result<FormulaLibrary, FretError> {
        FormulaLibrary::from_yaml(&format!("{}\nformulas:\n{}", ROLES, formulas))
    }

    fn role(s: &str) -> Role {
        s.parse().unwrap()
    }

    #[test]
    fn test_builtin_library_loads() {
        let library = FormulaLibrary::builtin().unwrap();
        let major = library.get("major-triad").unwrap();
        assert_eq!(major.kind, FormulaKind::Triad);
        let offsets: Vec<i32> = major.tones.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 4, 7]);
        assert!(!library.by_kind(FormulaKind::Triad).is_empty());
        assert!(library.role_info(role("b3")).is_some());
    }

    #[test]
    fn test_unknown_formula() {
        let library = FormulaLibrary::builtin().unwrap();
        assert_eq!(
            library.get("major-tried").unwrap_err(),
            FretError::InvalidFormula("major-tried".to_string())
        );
    }

    #[test]
    fn test_offsets_must_increase() {
        let err = library(
            r##"
  - id: broken
    kind: triad
    tones:
      - { role: "1", offset: 0 }
      - { role: "5", offset: 7 }
      - { role: "3", offset: 4 }
"##,
        )
        .unwrap_err();
        assert!(matches!(err, FretError::FormulaDefinition { .. }));
    }

    #[test]
    fn test_role_must_match_offset() {
        let err = library(
            r##"
  - id: mislabelled
    kind: triad
    tones:
      - { role: "1", offset: 0 }
      - { role: "3", offset: 3 }
      - { role: "5", offset: 7 }
"##,
        )
        .unwrap_err();
        assert_eq!(
            err,
            FretError::AmbiguousSpelling {
                formula: "mislabelled".to_string(),
                role: "3".to_string()
            }
        );
    }

    #[test]
    fn test_unregistered_role_is_ambiguous() {
        let err = library(
            r##"
  - id: sus
    kind: triad
    tones:
      - { role: "1", offset: 0 }
      - { role: "4", offset: 5 }
      - { role: "5", offset: 7 }
"##,
        )
        .unwrap_err();
        assert!(matches!(err, FretError::AmbiguousSpelling { ref role, .. } if role == "4"));
    }

    #[test]
    fn test_octave_span_requires_flag() {
        let stacked = r##"
  - id: stacked-diminished
    kind: extended
    tones:
      - { role: "1", offset: 0 }
      - { role: "b3", offset: 3 }
      - { role: "b5", offset: 6 }
      - { role: "bb7", offset: 9 }
      - { role: "8", offset: 12 }
"##;
        assert!(matches!(
            library(stacked).unwrap_err(),
            FretError::FormulaDefinition { .. }
        ));

        let flagged = stacked.replace("kind: extended", "kind: extended\n    spans-octaves: true");
        let lib = library(&flagged).unwrap();
        let formula = lib.get("stacked-diminished").unwrap();
        let pcs = formula.pitch_classes(PitchClass::C);
        assert_eq!(pcs[0], pcs[4]);
    }

    #[test]
    fn test_spell_as_override() {
        let lib = library(
            r##"
  - id: augmented-as-flat-six
    kind: triad
    tones:
      - { role: "1", offset: 0 }
      - { role: "3", offset: 4 }
      - { role: "#5", offset: 8, spell-as: "b6" }
"##,
        )
        .unwrap();
        let tone = lib.get("augmented-as-flat-six").unwrap().tones[2];
        assert_eq!(tone.role, role("#5"));
        assert_eq!(tone.spell_as, role("b6"));
    }

    #[test]
    fn test_steps_close_the_octave() {
        let roles: Vec<Role> = ["1", "b3", "b5", "bb7"].iter().map(|r| role(r)).collect();
        let formula =
            Formula::from_steps("dim7", "Diminished 7th", FormulaKind::Tetrad, &[3, 3, 3, 3], &roles)
                .unwrap();
        let offsets: Vec<i32> = formula.tones.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_modes_are_derived() {
        let library = FormulaLibrary::builtin().unwrap();
        let dorian = library.get("dorian").unwrap();
        let roles: Vec<String> = dorian.roles().map(|r| r.to_string()).collect();
        assert_eq!(roles, vec!["1", "2", "b3", "4", "5", "6", "b7"]);
        assert_eq!(library.get("major-scale-mode-2").unwrap(), dorian);

        let lydian_dominant = library.get("melodic-minor-mode-4").unwrap();
        let roles: Vec<String> = lydian_dominant.roles().map(|r| r.to_string()).collect();
        assert_eq!(roles, vec!["1", "2", "3", "#4", "5", "6", "b7"]);

        let altered = library.get("altered").unwrap();
        let roles: Vec<String> = altered.roles().map(|r| r.to_string()).collect();
        assert_eq!(roles, vec!["1", "b2", "b3", "b4", "b5", "b6", "b7"]);
        assert_eq!(library.get("ionian").unwrap().id, "major-scale");
    }

    #[test]
    fn test_subset_keeps_formula_order() {
        let library = FormulaLibrary::builtin().unwrap();
        let dominant_9 = library.get("dominant-9").unwrap();
        let subset = dominant_9
            .subset(&[role("9"), role("3"), role("b7"), role("5")])
            .unwrap();
        let roles: Vec<String> = subset.tones.iter().map(|t| t.role.to_string()).collect();
        assert_eq!(roles, vec!["3", "5", "b7", "9"]);
        assert_eq!(subset.positions, vec![1, 2, 3, 4]);
        assert!(dominant_9.subset(&[role("b3")]).is_err());
        assert!(dominant_9.subset(&[role("3"), role("3")]).is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("lydian-dominant"), "Lydian Dominant");
        assert_eq!(title_case("aeolian"), "Aeolian");
    }
}
