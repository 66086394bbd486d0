// ============================================================================
// Module : api
// ============================================================================
// Ce module contient les clients HTTP vers les services distants :
// - rates : taux de change publics (exchangerate-api.com, base EUR)
// - prices : backend Supabase des soumissions de prix
// ============================================================================

pub mod prices; // Client REST Supabase (moyenne, soumission, test)
pub mod rates;  // Client des taux de change

// Re-export des entrées principales
pub use prices::PriceClient;
pub use rates::fetch_exchange_rates;
