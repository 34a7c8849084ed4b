//! Capability contracts for the collaborators around the engine.
//!
//! Rendering, audio, input and seeding are all outside the engine. These
//! traits are the narrow interfaces a host implements to plug them in.

mod present;
mod seed;

pub use present::{
    run_session, AudioPlayer, InputSource, Presenter, Renderer, ScriptedInput, SessionSummary,
};
pub use seed::{EntropySeed, FixedSeed, SeedProvider};
