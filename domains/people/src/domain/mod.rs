//! People domain layer: entities, leave workflow, scoping, enrichment

pub mod enrichment;
pub mod entities;
pub mod scoping;
pub mod state;
