use wasm_bindgen::prelude::*;
use serde::Serialize;

use fretwork::{
    FormulaLibrary, FretError, Fretboard, ShapeOptions, StringSet, TuningLibrary, STANDARD_GUITAR,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EngineError {
    kind: &'static str,
    message: String,
    /// Per-call errors mean "no diagram for this combination" rather than a broken setup
    recoverable: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormulaSummary {
    id: String,
    name: String,
    kind: fretwork::FormulaKind,
    tones: usize,
}

fn error_kind(e: &FretError) -> &'static str {
    match e {
        FretError::InvalidFormula(_) => "invalidFormula",
        FretError::UnsupportedStringSetSize { .. } => "unsupportedStringSetSize",
        FretError::UnrealizableVoicing(_) => "unrealizableVoicing",
        FretError::AmbiguousSpelling { .. } => "ambiguousSpelling",
        FretError::FormulaDefinition { .. } => "formulaDefinition",
        FretError::InvalidNote(_) => "invalidNote",
        FretError::InvalidRole(_) => "invalidRole",
        FretError::InvalidTuning(_) => "invalidTuning",
        FretError::InvalidStringSet(_) => "invalidStringSet",
        FretError::ConfigError(_) => "configError",
        FretError::SerializationError(_) => "serializationError",
    }
}

fn to_js_error(e: FretError) -> JsValue {
    let error = EngineError {
        kind: error_kind(&e),
        message: e.to_string(),
        recoverable: e.is_recoverable(),
    };
    match serde_json::to_string(&error) {
        Ok(json) => JsValue::from_str(&json),
        Err(_) => JsValue::from_str(&e.to_string()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, FretError> {
    serde_json::to_string(value).map_err(|e| FretError::SerializationError(e.to_string()))
}

fn board(tuning: Option<String>, max_span: Option<i32>) -> Result<Fretboard, FretError> {
    let id = tuning.as_deref().unwrap_or(STANDARD_GUITAR);
    let tuning = TuningLibrary::builtin()?.get(id)?.clone();
    let mut options = ShapeOptions::default();
    if let Some(span) = max_span {
        options = options.with_max_span(span);
    }
    Ok(Fretboard::new(FormulaLibrary::builtin()?, tuning).with_options(options))
}

/// Diagrams for every inversion of a formula on a string set, as a JSON array
#[wasm_bindgen]
pub fn diagrams(
    root: &str,
    formula_id: &str,
    strings: &str,
    tuning: Option<String>,
    max_span: Option<i32>,
) -> Result<String, JsValue> {
    let string_set: StringSet = strings.parse().map_err(to_js_error)?;
    board(tuning, max_span)
        .and_then(|b| b.diagrams(root, formula_id, string_set))
        .and_then(|d| to_json(&d))
        .map_err(to_js_error)
}

/// Diagrams for selected roles of a formula, e.g. `"1,3,b7"`
#[wasm_bindgen]
pub fn diagrams_for_roles(
    root: &str,
    formula_id: &str,
    roles: &str,
    strings: &str,
    tuning: Option<String>,
) -> Result<String, JsValue> {
    let string_set: StringSet = strings.parse().map_err(to_js_error)?;
    let roles: Vec<&str> = roles.split(',').map(str::trim).collect();
    board(tuning, None)
        .and_then(|b| {
            let voicings = b.voicings_for_roles(root, formula_id, &roles, string_set)?;
            Ok(fretwork::diagram::project_all(&voicings, b.formulas()))
        })
        .and_then(|d| to_json(&d))
        .map_err(to_js_error)
}

/// Inversion indices in ascending start-fret order
#[wasm_bindgen]
pub fn inversion_order(root: &str, formula_id: &str, strings: &str, tuning: Option<String>) -> Result<String, JsValue> {
    let string_set: StringSet = strings.parse().map_err(to_js_error)?;
    board(tuning, None)
        .and_then(|b| b.inversion_order(root, formula_id, string_set))
        .and_then(|order| to_json(&order))
        .map_err(to_js_error)
}

/// Every position of a scale or arpeggio from the nut to the 12th fret
#[wasm_bindgen]
pub fn scale_map(root: &str, formula_id: &str, tuning: Option<String>) -> Result<String, JsValue> {
    board(tuning, None)
        .and_then(|b| b.scale_map(root, formula_id))
        .and_then(|positions| to_json(&positions))
        .map_err(to_js_error)
}

#[wasm_bindgen]
pub fn scale_box(
    root: &str,
    formula_id: &str,
    start_fret: i32,
    width: i32,
    tuning: Option<String>,
) -> Result<String, JsValue> {
    board(tuning, None)
        .and_then(|b| b.scale_box(root, formula_id, start_fret, width))
        .and_then(|positions| to_json(&positions))
        .map_err(to_js_error)
}

/// Formula summaries for pickers
#[wasm_bindgen]
pub fn list_formulas() -> Result<JsValue, JsValue> {
    let library = FormulaLibrary::builtin().map_err(to_js_error)?;
    let summaries: Vec<FormulaSummary> = library
        .ids()
        .filter_map(|id| library.get(id).ok())
        .map(|f| FormulaSummary {
            id: f.id.clone(),
            name: f.name.clone(),
            kind: f.kind,
            tones: f.len(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&summaries).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn list_tunings() -> Result<JsValue, JsValue> {
    let library = TuningLibrary::builtin().map_err(to_js_error)?;
    let tunings: Vec<&fretwork::Tuning> = library.iter().collect();
    serde_wasm_bindgen::to_value(&tunings).map_err(|e| JsValue::from_str(&e.to_string()))
}
