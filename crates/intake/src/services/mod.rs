pub mod collaborator;

pub use collaborator::{Collaborator, DEFAULT_ENDPOINT, HttpCollaborator, TransportError};
