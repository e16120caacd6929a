//! harmonai-core: Music-theory engine for chord exploration
//!
//! Everything in this crate is a pure function of its inputs. Lookups that
//! cannot be resolved degrade to empty results instead of failing; only the
//! string parsers at the boundary return [`HarmonyError`].

pub mod chord;
pub mod diatonic;
mod error;
pub mod exploration;
pub mod modulation;
pub mod pitch;
pub mod progression;
pub mod relation;
pub mod scale;

pub use chord::{build_chord, Chord, ChordQuality, NON_DIATONIC};
pub use diatonic::{
    diatonic_chords, diatonic_chords_named, diatonic_degree, order_by_fifths, FIFTHS_ORDER,
};
pub use error::{HarmonyError, Result};
pub use exploration::{ExplorationPath, ExplorationStep};
pub use modulation::{modulation_targets, pivot_chord, ModulationTarget, MODULATION_SCALES};
pub use pitch::PitchClass;
pub use progression::{ProgressionLibrary, SavedProgression};
pub use relation::{
    classify, mark_related, related_chords, HarmonicRelation, KeyMarking, RelatedChord,
    RELATED_QUALITIES,
};
pub use scale::{scale_notes, scale_notes_named, ScaleCategory, ScaleFormula, ScaleType};
