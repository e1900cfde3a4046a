pub mod common;
pub mod dispatch;
pub mod input;
pub mod layout;
pub mod registration;
pub mod request;

pub use crate::domain::DomainError;
pub use input::InputBag;
pub use layout::ProjectLayout;
pub use registration::RegistryEdit;
pub use request::GenerationRequest;
