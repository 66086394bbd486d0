// ============================================================================
// Module : currency
// ============================================================================
// Coeur métier de l'application : tout ce qui touche aux devises.
// Quatre sous-modules purs et sans état :
// - tables : tables statiques (pays -> devise, symboles, zones géographiques)
// - resolver : détection de la devise locale d'un lieu
// - format : formatage et parsing des prix selon la devise
// - convert : conversion entre devises via la table de taux (base EUR)
// ============================================================================

pub mod tables;    // Tables statiques immuables
pub mod resolver;  // Détection de devise (adresse, coordonnées, locale)
pub mod format;    // Formatage / parsing des prix
pub mod convert;   // Conversion via taux de change

// Re-export des fonctions principales pour simplifier les imports
pub use convert::convert_price;
pub use format::{display_with_conversion, format_price, parse_price, PriceError};
pub use resolver::{detect_currency, CountryLookup};
pub use tables::{currency_symbol, is_zero_decimal};
