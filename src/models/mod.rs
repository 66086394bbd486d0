// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod exchange_rates; // Snapshot des taux de change (base EUR)
pub mod location;       // Signaux de localisation d'un lieu
pub mod place;          // Lieu et statistiques de prix

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use coffeetrack::models::exchange_rates::ExchangeRates;
// On peut faire : use coffeetrack::models::ExchangeRates;
pub use exchange_rates::ExchangeRates;
pub use location::LocationSignal;
pub use place::{PlaceInfo, PriceStats};
