// ============================================================================
// Conversion de devises
// ============================================================================
// Convertit un montant entre deux devises via la table de taux en cache.
// Tous les taux sont exprimés par rapport à l'EUR (devise de base) :
// rates["USD"] = combien d'USD vaut 1 EUR.
//
// CONCEPT RUST : Option<f64> plutôt qu'une erreur
// - Un taux manquant n'est pas une panne : l'appelant omet simplement
//   l'affichage converti et le flux principal continue
// ============================================================================

use tracing::debug;

use crate::models::ExchangeRates;

/// Convertit un montant entre deux devises
///
/// Quatre cas, dans l'ordre :
/// - même devise : montant inchangé (aucun taux consulté, marche même
///   avec une table vide)
/// - depuis l'EUR : `montant * taux[vers]`
/// - vers l'EUR : `montant / taux[depuis]`
/// - taux croisé : passage par l'EUR, `(montant / taux[depuis]) * taux[vers]`
///
/// None dès qu'un taux requis manque. Aucun arrondi ici : l'appelant
/// applique la politique d'arrondi de la devise cible à l'affichage.
pub fn convert_price(
    amount: f64,
    from_currency: &str,
    to_currency: &str,
    rates: &ExchangeRates,
) -> Option<f64> {
    if from_currency == to_currency {
        return Some(amount);
    }

    let result = if from_currency == "EUR" {
        // Ex: 5 EUR vers USD avec taux 1.16 = 5 * 1.16 = 5.80 USD
        rates.rate(to_currency).map(|rate| amount * rate)
    } else if to_currency == "EUR" {
        // Ex: 5 USD vers EUR avec taux 1.16 = 5 / 1.16 = 4.31 EUR
        rates.rate(from_currency).map(|rate| amount / rate)
    } else {
        // Taux croisé via l'EUR
        // Ex: 5 USD vers GBP = (5 / 1.16) * 0.86
        match (rates.rate(from_currency), rates.rate(to_currency)) {
            (Some(from_rate), Some(to_rate)) => Some(amount / from_rate * to_rate),
            _ => None,
        }
    };

    match result {
        Some(value) => {
            debug!(amount, from = %from_currency, to = %to_currency, value, "Converted price");
        }
        None => {
            debug!(from = %from_currency, to = %to_currency, "Missing rate, conversion omitted");
        }
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
