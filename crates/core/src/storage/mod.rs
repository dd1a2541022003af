pub mod document;
pub mod encryption;
pub mod keyfile;
pub mod paths;
