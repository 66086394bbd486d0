// ============================================================================
// Structure : ExchangeRates
// ============================================================================
// Snapshot immuable de la table des taux de change, base EUR.
// rates["USD"] = combien d'USD vaut 1 EUR.
//
// CONCEPTS RUST :
// 1. HashMap<String, f64> : table de taux à clés dynamiques (l'API peut
//    retourner des devises qu'on ne connaît pas, on les garde telles quelles)
// 2. DateTime<Utc> avec serde : horodatage sérialisé dans le cache disque
// ============================================================================

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot des taux de change relatifs à l'EUR
///
/// INVARIANT : la devise de référence est l'EUR pour toute la durée de
/// vie d'une instance. Le coeur ne fait que lire ce snapshot ; le
/// rafraîchissement appartient à storage::rates_cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// Devise -> taux (1 EUR = taux unités de la devise)
    pub rates: HashMap<String, f64>,

    /// Date du dernier rafraîchissement
    pub last_updated: DateTime<Utc>,
}

impl ExchangeRates {
    /// Crée un snapshot horodaté maintenant
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self {
            rates,
            last_updated: Utc::now(),
        }
    }

    /// Taux d'une devise, None si absente de la table
    pub fn rate(&self, currency_code: &str) -> Option<f64> {
        self.rates.get(currency_code).copied()
    }

    /// Âge du snapshot en jours entiers
    pub fn age_days(&self) -> i64 {
        (Utc::now() - self.last_updated).num_days()
    }

    /// Vrai si le snapshot est plus vieux que max_age_days
    pub fn is_stale(&self, max_age_days: i64) -> bool {
        self.age_days() > max_age_days
    }
}

// ============================================================================
// Tests
// ============================================================================
