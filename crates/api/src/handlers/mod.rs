pub mod admin;
pub mod facility;
pub mod family;
pub mod species;
