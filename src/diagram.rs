//! # Diagram Projection
//!
//! Converts voicings into the flat, serializable shape consumed by diagram renderers. This is
//! the only part of the crate that knows about presentation: role colors, display labels and
//! finger suggestions.
//!
//! ## JSON Shape
//! ```json
//! {
//!   "strings": [
//!     { "stringIndex": 3, "fret": 5, "note": "C", "role": "1", "fingerHint": 3, "color": "#d32f2f" },
//!     { "stringIndex": 4, "fret": 5, "note": "E", "role": "3", "fingerHint": 3, "color": "#388e3c" },
//!     { "stringIndex": 5, "fret": 3, "note": "G", "role": "5", "fingerHint": 1, "color": "#7b1fa2" }
//!   ],
//!   "label": "Root Position",
//!   "inversion": 0,
//!   "startFret": 3,
//!   "formulaId": "major-triad",
//!   "root": "C",
//!   "stretch": false
//! }
//! ```

use serde::Serialize;

use crate::error::FretError;
use crate::formula::FormulaLibrary;
use crate::inversion::Inversion;
use crate::tuning::Fret;
use crate::voicing::Voicing;

/// Fingers available to the fretting hand
pub const FINGERS: u8 = 4;

/// Render data for one string
///
/// # Fields
/// - `string_index`: 0 is the lowest-pitched string
/// - `fret`: `None` for a muted string, `Some(0)` for an open one
/// - `note`, `role`: spelled note and interval role, absent on muted strings
/// - `finger_hint`: suggested finger (1 = index), absent on muted and open strings
/// - `color`: role color from the role table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramString {
    pub string_index: usize,
    pub fret: Option<Fret>,
    pub note: Option<String>,
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finger_hint: Option<u8>,
    pub color: Option<String>,
}

/// Render data for one voicing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub strings: Vec<DiagramString>,
    /// Inversion name, e.g. "First Inversion"
    pub label: String,
    pub inversion: Inversion,
    pub start_fret: Fret,
    pub formula_id: String,
    pub root: String,
    pub stretch: bool,
}

/// Suggest a finger per string of `voicing`, counting from the lowest fretted fret.
///
/// Frets more than four above the lowest share the little finger.
pub fn finger_hints(voicing: &Voicing) -> Vec<Option<u8>> {
    let lowest = voicing
        .strings
        .iter()
        .filter_map(|s| s.fret)
        .filter(|&fret| fret > 0)
        .min();

    voicing
        .strings
        .iter()
        .map(|s| match (s.fret, lowest) {
            (Some(fret), Some(lowest)) if fret > 0 => {
                Some((fret - lowest + 1).clamp(1, FINGERS as Fret) as u8)
            }
            _ => None,
        })
        .collect()
}

/// Project a voicing into render data, looking up role colors in `library`.
pub fn project(voicing: &Voicing, library: &FormulaLibrary) -> Diagram {
    let hints = finger_hints(voicing);
    let strings = voicing
        .strings
        .iter()
        .zip(hints)
        .map(|(voice, finger_hint)| DiagramString {
            string_index: voice.string,
            fret: voice.fret,
            note: voice.note.map(|n| n.to_string()),
            role: voice.role.map(|r| r.to_string()),
            finger_hint,
            color: voice
                .role
                .and_then(|r| library.role_info(r))
                .and_then(|info| info.color.clone()),
        })
        .collect();

    Diagram {
        strings,
        label: voicing.inversion.name(),
        inversion: voicing.inversion,
        start_fret: voicing.start_fret,
        formula_id: voicing.formula_id.clone(),
        root: voicing.root.to_string(),
        stretch: voicing.stretch,
    }
}

pub fn project_all(voicings: &[Voicing], library: &FormulaLibrary) -> Vec<Diagram> {
    voicings.iter().map(|v| project(v, library)).collect()
}

/// Serialize diagrams as a JSON array.
pub fn to_json(diagrams: &[Diagram]) -> Result<String, FretError> {
    serde_json::to_string(diagrams).map_err(|e| FretError::SerializationError(e.to_string()))
}

pub fn to_json_pretty(diagrams: &[Diagram]) -> Result<String, FretError> {
    serde_json::to_string_pretty(diagrams).map_err(|e| FretError::SerializationError(e.to_string()))
}
