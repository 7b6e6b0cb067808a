pub mod derive;
pub mod fields;
pub mod statement;
