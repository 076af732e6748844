pub mod derive;
pub mod extract;
