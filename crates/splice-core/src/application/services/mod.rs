//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a controller" or "guard a handler".

pub mod generator_service;
pub mod validation_guard;

pub use generator_service::{
    GenerationOutcome, GenerationPreview, GeneratorService, PendingRegistration,
    RegistrationOutcome,
};
pub use validation_guard::ValidationGuard;
