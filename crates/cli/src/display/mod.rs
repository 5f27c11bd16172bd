//! Affichage des résultats

pub mod summary;
