//! # Shape Generator
//!
//! Computes voicings of a formula subset on a contiguous string set, one per bass tone.
//!
//! ## Algorithm
//! For `n` tones on a string set, the `k`th voicing puts tone `k` on the lowest string and
//! first tries to stack the following tones upward in close position, wrapping around the
//! subset:
//!
//! ```text
//! C major, strings G B E
//!   k = 0:  G:C  B:E  E:G   root position
//!   k = 1:  G:E  B:G  E:C   first inversion
//!   k = 2:  G:G  B:C  E:E   second inversion
//! ```
//!
//! Each string can reach its tone at one fret per octave. The generator picks the placement
//! whose frets fit inside `max_span` with the lowest start fret (ties go to the lowest top
//! fret).
//!
//! Close four-note shapes rarely fit a hand on adjacent strings. When close position does not
//! fit, the bass tone stays on the lowest string and every ordering of the upper tones is
//! tried, which finds the drop 2 and drop 3 shapes:
//!
//! ```text
//! C7, strings D G B E
//!   close:   D:E  G:G  B:Bb E:C   frets 14 12 11 8   span 6
//!   drop 2:  D:E  G:Bb B:C  E:G   frets 2 3 1 3      span 2
//! ```
//!
//! Only when no ordering fits is the narrowest close placement used and the voicing flagged
//! as a stretch.
//!
//! By default shapes start at fret 1: the result is a set of movable closed shapes, the
//! same positions the triad tables use. Set `lowest_fret` to 0 to allow open strings.

use crate::error::FretError;
use crate::formula::{FormulaSubset, Tone};
use crate::pitch::{Note, PitchClass, SEMITONES_PER_OCTAVE};
use crate::spelling::{Speller, SpellingPreference};
use crate::tuning::{Fret, StringSet, Tuning};
use crate::voicing::{StringVoice, Voicing};

pub const DEFAULT_MAX_SPAN: Fret = 4;
pub const DEFAULT_HIGHEST_FRET: Fret = 24;

/// Generation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeOptions {
    /// Widest allowed distance between the lowest and highest played fret
    pub max_span: Fret,
    pub lowest_fret: Fret,
    pub highest_fret: Fret,
    /// Accidental preference for fallback spellings; derived from the root when `None`
    pub preference: Option<SpellingPreference>,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        ShapeOptions {
            max_span: DEFAULT_MAX_SPAN,
            lowest_fret: 1,
            highest_fret: DEFAULT_HIGHEST_FRET,
            preference: None,
        }
    }
}

impl ShapeOptions {
    pub fn with_max_span(mut self, max_span: Fret) -> Self {
        self.max_span = max_span;
        self
    }

    pub fn allowing_open_strings(mut self) -> Self {
        self.lowest_fret = 0;
        self
    }
}

/// Frets on `string` that sound `target`, within the option's fret range.
pub fn candidate_frets(
    tuning: &Tuning,
    string: usize,
    target: PitchClass,
    options: &ShapeOptions,
) -> Result<Vec<Fret>, FretError> {
    let open = tuning.open_string(string)?.pitch_class();
    let base = open.ascending_distance(target);
    Ok((0..)
        .map(|octave| base + octave * SEMITONES_PER_OCTAVE)
        .take_while(|&fret| fret <= options.highest_fret)
        .filter(|&fret| fret >= options.lowest_fret)
        .collect())
}

/// A chosen fret per string
#[derive(Debug, Clone, PartialEq)]
struct Placement {
    frets: Vec<Fret>,
    low: Fret,
    high: Fret,
    stretch: bool,
}

impl Placement {
    fn new(frets: Vec<Fret>, max_span: Fret) -> Self {
        let low = frets.iter().copied().min().unwrap_or(0);
        let high = frets.iter().copied().max().unwrap_or(0);
        Placement {
            stretch: high - low > max_span,
            frets,
            low,
            high,
        }
    }

    /// Ordering key: fitting placements first, then narrowest stretch, then lowest position.
    fn key(&self) -> (bool, Fret, Fret, Fret) {
        let excess = if self.stretch { self.high - self.low } else { 0 };
        (self.stretch, excess, self.low, self.high)
    }
}

/// Try every combination of candidate frets and keep the best placement.
fn choose_placement(candidates: &[Vec<Fret>], max_span: Fret) -> Option<Placement> {
    if candidates.iter().any(Vec::is_empty) {
        return None;
    }

    let mut best: Option<Placement> = None;
    let mut cursor = vec![0usize; candidates.len()];
    loop {
        let frets: Vec<Fret> = cursor.iter().zip(candidates).map(|(&i, c)| c[i]).collect();
        let placement = Placement::new(frets, max_span);
        if best.as_ref().map_or(true, |b| placement.key() < b.key()) {
            best = Some(placement);
        }

        let mut position = 0;
        loop {
            if position == cursor.len() {
                return best;
            }
            cursor[position] += 1;
            if cursor[position] < candidates[position].len() {
                break;
            }
            cursor[position] = 0;
            position += 1;
        }
    }
}

/// Best placement of `tones` on `strings`, one tone per string in order.
fn place(
    tuning: &Tuning,
    strings: &[usize],
    tones: &[Tone],
    root: PitchClass,
    options: &ShapeOptions,
) -> Result<Option<Placement>, FretError> {
    let mut candidates = Vec::with_capacity(tones.len());
    for (&string, tone) in strings.iter().zip(tones) {
        candidates.push(candidate_frets(tuning, string, tone.pitch_class(root), options)?);
    }
    Ok(choose_placement(&candidates, options.max_span))
}

/// Every ordering of `items`, the given order first.
fn permutations<T: Copy>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        let rest: Vec<T> = items
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, &item)| item)
            .collect();
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            result.push(tail);
        }
    }
    result
}

/// Generate one voicing per choice of lowest tone, sorted by ascending start fret.
///
/// # Example
/// ```rust
/// use fretwork::{generate_voicings, FormulaLibrary, ShapeOptions, StringSet, Tuning};
///
/// let library = FormulaLibrary::builtin()?;
/// let subset = library.get("major-triad")?.full();
/// let voicings = generate_voicings(
///     "C".parse()?,
///     &subset,
///     StringSet::new(3, 3),
///     &Tuning::standard_guitar()?,
///     &ShapeOptions::default(),
/// )?;
///
/// assert_eq!(voicings[0].frets(), vec![5, 5, 3]);
/// # Ok::<(), fretwork::FretError>(())
/// ```
///
/// # Errors
/// - `UnsupportedStringSetSize` when the set has fewer strings than the subset has tones
/// - `InvalidStringSet` when the set does not fit the tuning
/// - `UnrealizableVoicing` when a tone has no fret inside the fret range
pub fn generate_voicings(
    root: Note,
    subset: &FormulaSubset,
    string_set: StringSet,
    tuning: &Tuning,
    options: &ShapeOptions,
) -> Result<Vec<Voicing>, FretError> {
    let n = subset.len();
    if n == 0 {
        return Err(FretError::InvalidFormula(format!(
            "{}: nothing to voice",
            subset.formula_id
        )));
    }
    string_set.check(tuning)?;
    if string_set.len < n {
        return Err(FretError::UnsupportedStringSetSize {
            strings: string_set.len,
            roles: n,
        });
    }

    log::debug!(
        "generating {} {} on strings {} of {}",
        root,
        subset.formula_id,
        string_set,
        tuning.id
    );

    let speller = Speller::new(root, options.preference);
    let root_pc = root.pitch_class();
    let played: Vec<usize> = string_set.indices().take(n).collect();

    let mut voicings = Vec::with_capacity(n);
    for lowest in 0..n {
        let close: Vec<Tone> = (0..n).map(|i| subset.tones[(lowest + i) % n]).collect();
        let mut best = place(tuning, &played, &close, root_pc, options)?;
        let mut tones = close.clone();

        // Open the voicing up (drop 2, drop 3, ...) when close position does not fit.
        if best.as_ref().map_or(false, |p| p.stretch) {
            for upper in permutations(&close[1..]) {
                let mut order = Vec::with_capacity(n);
                order.push(close[0]);
                order.extend(upper);
                if let Some(placement) = place(tuning, &played, &order, root_pc, options)? {
                    let better = best.as_ref().map_or(true, |b| placement.key() < b.key());
                    if !placement.stretch && better {
                        best = Some(placement);
                        tones = order;
                    }
                }
            }
        }

        let placement = best.ok_or_else(|| {
            FretError::UnrealizableVoicing(format!(
                "{} {} has no frets between {} and {} on strings {}",
                root, subset.formula_id, options.lowest_fret, options.highest_fret, string_set
            ))
        })?;
        if placement.stretch {
            log::warn!(
                "{} {} inversion {} spans {} frets (limit {})",
                root,
                subset.formula_id,
                subset.inversion_at(lowest),
                placement.high - placement.low,
                options.max_span
            );
        }

        let mut strings = Vec::with_capacity(string_set.len);
        for (i, &string) in played.iter().enumerate() {
            let tone = tones[i];
            let note = speller.spell(tone.pitch_class(root_pc), tone.spell_as);
            strings.push(StringVoice::played(
                string,
                placement.frets[i],
                note,
                tone.role,
                tone.spell_as,
            ));
        }
        strings.extend(string_set.indices().skip(n).map(StringVoice::muted));

        log::debug!(
            "{} {}: frets {:?}",
            subset.formula_id,
            subset.inversion_at(lowest),
            placement.frets
        );
        voicings.push(Voicing {
            root,
            formula_id: subset.formula_id.clone(),
            strings,
            inversion: subset.inversion_at(lowest),
            start_fret: placement.low,
            stretch: placement.stretch,
        });
    }

    voicings.sort_by_key(|v| (v.start_fret, v.inversion));
    Ok(voicings)
}
