use env_logger::Env;
use std::env;
use std::process;

use fretwork::diagram::to_json_pretty;
use fretwork::{
    FormulaLibrary, FretError, Fretboard, ShapeOptions, StringSet, TuningLibrary, STANDARD_GUITAR,
};

const USAGE: &str = "\
Usage: fretwork [--tuning ID] [--span N] [--open] <root> <formula-id> <strings>
       fretwork [--tuning ID] --map <root> <formula-id>
       fretwork --list

  <strings>  contiguous string set, lowest string is 0: \"3-5\" or \"3,4,5\"";

fn usage() -> ! {
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn fail(context: &str, e: FretError) -> ! {
    eprintln!("{}: {}", context, e);
    process::exit(1);
}

fn list() -> Result<(), FretError> {
    let formulas = FormulaLibrary::builtin()?;
    println!("Formulas:");
    for id in formulas.ids() {
        let formula = formulas.get(id)?;
        println!("  {:<28} {} ({} tones)", id, formula.name, formula.len());
    }
    let mut aliases: Vec<(&str, &str)> = formulas.aliases().collect();
    aliases.sort();
    println!("Aliases:");
    for (alias, target) in aliases {
        println!("  {:<28} -> {}", alias, target);
    }
    println!("Tunings:");
    for tuning in TuningLibrary::builtin()?.iter() {
        println!("  {}", tuning);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        usage();
    }

    let mut tuning_id = STANDARD_GUITAR.to_string();
    let mut options = ShapeOptions::default();
    let mut map = false;
    let mut positional: Vec<&String> = Vec::new();

    // Parse flags
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--list" => {
                if let Err(e) = list() {
                    fail("Error loading libraries", e);
                }
                return;
            }
            "--tuning" => {
                i += 1;
                tuning_id = args.get(i).cloned().unwrap_or_else(|| usage());
            }
            "--span" => {
                i += 1;
                let span = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| usage());
                options = options.with_max_span(span);
            }
            "--open" => options = options.allowing_open_strings(),
            "--map" => map = true,
            "-h" | "--help" => usage(),
            _ => positional.push(&args[i]),
        }
        i += 1;
    }

    let tuning = match TuningLibrary::builtin().and_then(|lib| lib.get(&tuning_id).cloned()) {
        Ok(tuning) => tuning,
        Err(e) => fail("Error loading tuning", e),
    };
    let board = match FormulaLibrary::builtin() {
        Ok(formulas) => Fretboard::new(formulas, tuning).with_options(options),
        Err(e) => fail("Error loading formulas", e),
    };

    let output = if map {
        let &[root, formula_id] = positional.as_slice() else { usage() };
        board
            .scale_map(root, formula_id)
            .and_then(|positions| {
                serde_json::to_string_pretty(&positions)
                    .map_err(|e| FretError::SerializationError(e.to_string()))
            })
    } else {
        let &[root, formula_id, strings] = positional.as_slice() else { usage() };
        let string_set: StringSet = match strings.parse() {
            Ok(set) => set,
            Err(e) => fail("Bad string set", e),
        };
        board
            .diagrams(root, formula_id, string_set)
            .and_then(|diagrams| to_json_pretty(&diagrams))
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => fail("Error", e),
    }
}
