// ============================================================================
// CoffeeTrack - Library
// ============================================================================
// Expose les modules publics pour le binaire CLI et les tests
// ============================================================================

pub mod currency;  // Coeur métier : résolution, formatage, conversion de devises
pub mod models;    // Structures de données
pub mod api;       // Clients API (Supabase, exchangerate-api)
pub mod storage;   // Configuration et cache des taux sur disque
