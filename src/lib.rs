pub mod api;
pub mod diagram;
pub mod error;
pub mod formula;
pub mod fretboard;
pub mod inversion;
pub mod normalize;
pub mod pitch;
pub mod shape;
pub mod spelling;
pub mod tuning;
pub mod voicing;

pub use api::Fretboard;
pub use diagram::{project, to_json, Diagram, DiagramString};
pub use error::*;
pub use formula::{Formula, FormulaKind, FormulaLibrary, FormulaSubset, Tone};
pub use fretboard::{map_formula, position_box, FretPosition};
pub use inversion::{label_for, order_by_string_set, Inversion, InversionMapper, Rotation};
pub use normalize::{normalize, PlayableRange};
pub use pitch::{Letter, Note, Pitch, PitchClass};
pub use shape::{generate_voicings, ShapeOptions};
pub use spelling::{Role, Speller, SpellingPreference};
pub use tuning::{Fret, StringSet, Tuning, TuningLibrary, STANDARD_GUITAR};
pub use voicing::{StringVoice, Voicing};

/// Diagrams for `formula_id` over `root` on a standard guitar.
/// This is the main entry point for the library.
pub fn diagrams(root: &str, formula_id: &str, string_set: StringSet) -> Result<Vec<Diagram>, FretError> {
    Fretboard::standard()?.diagrams(root, formula_id, string_set)
}

/// Same as [`diagrams`], rendered as a JSON array
pub fn diagrams_json(root: &str, formula_id: &str, string_set: StringSet) -> Result<String, FretError> {
    to_json(&diagrams(root, formula_id, string_set)?)
}
