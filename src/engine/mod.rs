pub mod pacing;
pub mod sequencer;
pub mod walkthrough;

pub use pacing::{FixedPacing, ImmediatePacing, RevealPacing};
pub use sequencer::{SequencerEvent, StepSequencer};
pub use walkthrough::{run_walkthrough, WalkthroughStep};
