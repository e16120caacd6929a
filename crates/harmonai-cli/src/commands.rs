//! Command handlers

use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context};
use harmonai_core::{
    diatonic_chords, mark_related, modulation_targets, order_by_fifths, related_chords,
    scale_notes, Chord, ExplorationPath, ExplorationStep, HarmonicRelation, KeyMarking,
    ModulationTarget, PitchClass, RelatedChord, SavedProgression, ScaleCategory, ScaleType,
};
use harmonai_services::{OllamaSuggestions, ProgressionStore, SuggestionRequest, SuggestionService};
use tracing::{debug, warn};

use crate::config::{self, AppConfig};
use crate::{Command, KeyArgs, PathsCommand};

pub(crate) fn run(command: Command, config: &AppConfig, config_path: &Path) -> anyhow::Result<()> {
    match command {
        Command::Scales => {
            for category in ScaleCategory::ALL {
                println!("{}", category.label());
                for scale in category.scales() {
                    println!("  {:<18}{}", scale.id(), scale.label());
                }
            }
        }
        Command::Scale { key } => {
            let (root, scale) = resolve_key(&key, config);
            println!("{root} {}: {}", scale.label(), join_names(&scale_notes(root, scale)));
        }
        Command::Chords { key, fifths } => {
            let (root, scale) = resolve_key(&key, config);
            let mut chords = diatonic_chords(root, scale);
            if fifths {
                chords = order_by_fifths(&chords);
            }
            println!("{root} {}", scale.label());
            for chord in &chords {
                println!("  {}", describe(chord));
            }
        }
        Command::Related { chord, key, compare } => {
            let (root, scale) = resolve_key(&key, config);
            let related = related_chords(&chord);
            debug!(chord = %chord, count = related.len(), "Related chords");
            let marks = mark_related(&related, root, scale, compare.map(KeySpec::pair));
            print_related(&related, &marks);
            print_legend(root, scale, compare);
        }
        Command::Modulate { chord, key } => {
            let (root, scale) = resolve_key(&key, config);
            print_targets(&modulation_targets(&chord, root, scale));
        }
        Command::Explore { key, compare, save, steps } => {
            let (root, scale) = resolve_key(&key, config);
            let mut path = ExplorationPath::new(root, scale);
            for token in &steps {
                apply_step(&mut path, parse_step(token)?)?;
            }
            print_path(&path, compare);
            if let Some(name) = save {
                save_path(&path, name, config)?;
            }
        }
        Command::Suggest { chord, key } => {
            let (root, scale) = resolve_key(&key, config);
            let service = OllamaSuggestions::new(
                &config.suggestions.url,
                &config.suggestions.model,
                config.suggestions.timeout(),
            );
            suggest(&service, &SuggestionRequest::new(root, scale, chord.name))?;
        }
        Command::Paths { action } => paths(action, config)?,
        Command::Config { init } => {
            if init {
                if config_path.exists() {
                    bail!("{} already exists", config_path.display());
                }
                config::save_config(config_path, &AppConfig::default())?;
                println!("Wrote {}", config_path.display());
            }
            println!("# {}", config_path.display());
            print!("{}", toml::to_string_pretty(config)?);
        }
    }
    Ok(())
}

fn resolve_key(key: &KeyArgs, config: &AppConfig) -> (PitchClass, ScaleType) {
    (
        key.root.unwrap_or(config.key.root),
        key.scale.unwrap_or(config.key.scale),
    )
}

/// A key written as `ROOT:SCALE`, e.g. `G:major` or `F#:dorian`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeySpec {
    pub root: PitchClass,
    pub scale: ScaleType,
}

impl KeySpec {
    pub fn pair(self) -> (PitchClass, ScaleType) {
        (self.root, self.scale)
    }
}

impl FromStr for KeySpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (root, scale) = s
            .split_once(':')
            .with_context(|| format!("expected ROOT:SCALE, got {s}"))?;
        Ok(Self {
            root: root.parse()?,
            scale: scale.parse()?,
        })
    }
}

// ============================================================================
// Exploration
// ============================================================================

/// One token of an `explore` walk
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Select(Chord),
    Modulate(PitchClass, ScaleType),
    /// Zero-based index of the step to return to
    Back(usize),
    Reset,
}

fn parse_step(token: &str) -> anyhow::Result<Step> {
    if token == "!" {
        return Ok(Step::Reset);
    }
    if let Some(key) = token.strip_prefix('@') {
        let KeySpec { root, scale } = key.parse()?;
        return Ok(Step::Modulate(root, scale));
    }
    if let Some(number) = token.strip_prefix('^') {
        let number: usize = number
            .parse()
            .with_context(|| format!("bad step number in {token}"))?;
        if number == 0 {
            bail!("steps are numbered from 1");
        }
        return Ok(Step::Back(number - 1));
    }
    Ok(Step::Select(token.parse()?))
}

fn apply_step(path: &mut ExplorationPath, step: Step) -> anyhow::Result<()> {
    match step {
        Step::Select(chord) => {
            // Diatonic chords keep their degree label in the current key
            let chord = path
                .diatonic_chords()
                .into_iter()
                .find(|c| c.name == chord.name)
                .unwrap_or(chord);
            path.select_chord(chord);
        }
        Step::Modulate(root, scale) => {
            if path.modulate(root, scale).is_none() {
                bail!("select a chord before modulating to {root} {scale}");
            }
        }
        Step::Back(index) => {
            if index >= path.len() {
                bail!("there is no step {}", index + 1);
            }
            path.go_back(index);
        }
        Step::Reset => path.reset(),
    }
    Ok(())
}

fn save_path(path: &ExplorationPath, name: String, config: &AppConfig) -> anyhow::Result<()> {
    let store = progression_store(config);
    let mut library = store.load()?;

    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    let id = now.as_millis().to_string();
    let name = if name.is_empty() {
        SavedProgression::default_name(path.root, path.scale)
    } else {
        name
    };

    let saved = library
        .save(id, name, now.as_secs(), path)
        .context("nothing to save")?;
    println!("Saved \"{}\" as {}", saved.name, saved.id);
    store.save(&library)?;
    Ok(())
}

fn paths(action: PathsCommand, config: &AppConfig) -> anyhow::Result<()> {
    let store = progression_store(config);
    let mut library = store.load()?;

    match action {
        PathsCommand::List => {
            if library.is_empty() {
                println!("No saved progressions in {}.", store.path().display());
            }
            for p in library.iter() {
                println!("{}  {}  ({} {})  {}", p.id, p.name, p.root, p.scale, p.summary());
            }
        }
        PathsCommand::Show { id } => {
            let progression = library
                .get(&id)
                .with_context(|| format!("no saved progression {id}"))?;
            println!("{}", progression.name);
            print_path(&ExplorationPath::from_progression(progression), None);
        }
        PathsCommand::Delete { id } => {
            let removed = library
                .remove(&id)
                .with_context(|| format!("no saved progression {id}"))?;
            store.save(&library)?;
            println!("Deleted \"{}\"", removed.name);
        }
    }
    Ok(())
}

fn progression_store(config: &AppConfig) -> ProgressionStore {
    let path = config
        .storage
        .path
        .clone()
        .unwrap_or_else(ProgressionStore::default_path);
    ProgressionStore::new(path)
}

// ============================================================================
// Suggestions
// ============================================================================

fn suggest(service: &dyn SuggestionService, request: &SuggestionRequest) -> anyhow::Result<()> {
    match service.suggest(request) {
        Ok(suggestions) if suggestions.is_empty() => println!("The model had no suggestions."),
        Ok(suggestions) => {
            for (i, s) in suggestions.iter().enumerate() {
                println!("{}. {}", i + 1, s.sequence);
                println!("   {}", s.explanation);
            }
        }
        Err(e) => {
            warn!(error = %e, "Suggestion request failed");
            bail!(e.user_message());
        }
    }
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn join_names(notes: &[PitchClass]) -> String {
    notes.iter().map(|n| n.name()).collect::<Vec<_>>().join(" ")
}

fn describe(chord: &Chord) -> String {
    if chord.degree.is_empty() {
        format!("{:<5} [{}]", chord.name, join_names(&chord.notes))
    } else {
        format!("{:<5} {:<6} [{}]", chord.name, chord.degree, join_names(&chord.notes))
    }
}

/// Scale notes with the chord's tones bracketed: `[C] D [E] F [G] A B`
fn highlight_notes(notes: &[PitchClass], chord: &Chord) -> String {
    notes
        .iter()
        .map(|&n| {
            if chord.contains(n) {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Am* (new: ii)`: `*` for in-key, the comparison degree when there is one
fn marked_name(chord: &Chord, mark: &KeyMarking) -> String {
    let mut label = chord.name.clone();
    if mark.in_key {
        label.push('*');
    }
    if let Some(degree) = &mark.comparison_degree {
        label.push_str(&format!(" (new: {degree})"));
    }
    label
}

fn names_with(
    related: &[RelatedChord],
    marks: &[KeyMarking],
    relation: HarmonicRelation,
) -> String {
    related
        .iter()
        .zip(marks)
        .filter(|(r, _)| r.relation == relation)
        .map(|(r, mark)| marked_name(&r.chord, mark))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_related(related: &[RelatedChord], marks: &[KeyMarking]) {
    for relation in [HarmonicRelation::Close, HarmonicRelation::Intermediate] {
        println!("{:<13} {}", format!("{}:", relation.name()), names_with(related, marks, relation));
    }
}

fn print_legend(root: PitchClass, scale: ScaleType, compare: Option<KeySpec>) {
    match compare {
        Some(KeySpec { root: to, scale: to_scale }) => println!(
            "* in {root} {}; (new: ...) degree in {to} {}",
            scale.label(),
            to_scale.label()
        ),
        None => println!("* in {root} {}", scale.label()),
    }
}

fn print_targets(targets: &[ModulationTarget]) {
    if targets.is_empty() {
        println!("No modulation targets.");
    }
    for target in targets {
        println!("  {}", target.label);
    }
}

fn print_step(number: usize, step: &ExplorationStep, marks: &[KeyMarking]) {
    println!("{number}. {}", describe(&step.center_chord));
    println!(
        "   close:        {}",
        names_with(&step.related_chords, marks, HarmonicRelation::Close)
    );
    let labels: Vec<&str> = step.modulation_targets.iter().map(|t| t.label.as_str()).collect();
    if !labels.is_empty() {
        println!("   modulations:  {}", labels.join(", "));
    }
}

fn print_path(path: &ExplorationPath, compare: Option<KeySpec>) {
    for (i, step) in path.steps().iter().enumerate() {
        let comparison = compare.map(KeySpec::pair);
        let marks = mark_related(&step.related_chords, path.root, path.scale, comparison);
        print_step(i + 1, step, &marks);
    }
    println!("Key: {} {}", path.root, path.scale.label());
    if let Some(chord) = path.current_chord() {
        println!("Scale: {}", highlight_notes(&scale_notes(path.root, path.scale), chord));
    }
    print_legend(path.root, path.scale, compare);
}
