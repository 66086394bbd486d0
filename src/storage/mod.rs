// ============================================================================
// Module : storage
// ============================================================================
// Persistance locale : fichier de configuration et cache disque des taux
// de change. Tout est du JSON dans les répertoires standards de la
// plateforme (via dirs).
// ============================================================================

pub mod rates_cache; // Cache des taux avec politique de 30 jours
pub mod settings;    // Configuration (Supabase, devise préférée)

// Re-export des entrées principales
pub use rates_cache::ensure_fresh_rates;
pub use settings::Settings;
