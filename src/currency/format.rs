// ============================================================================
// Formatage et parsing des prix
// ============================================================================
// Produit la chaîne d'affichage canonique d'un montant selon sa devise
// (placement du symbole, arrondi) et reparse la saisie utilisateur vers
// une valeur numérique canonique sous la même politique d'arrondi.
//
// CONCEPTS RUST :
// 1. thiserror : erreur typée sur laquelle l'appelant peut matcher
// 2. Deux arrondis distincts : parse arrondit, format ré-arrondit à
//    l'affichage — deux étapes volontairement séparées et testables
// ============================================================================

use thiserror::Error;

use crate::currency::convert::convert_price;
use crate::currency::tables::{currency_symbol, is_zero_decimal};
use crate::models::ExchangeRates;

/// Erreur du coeur prix, jamais fatale pour le flux principal
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// Saisie non numérique, non finie, nulle ou négative
    #[error("montant invalide : {0:?}")]
    InvalidAmount(String),
}

/// Formate un montant selon sa devise
///
/// - Devise sans décimales : arrondi à l'entier, `symbole + entier`
///   (ex: "¥6")
/// - Sinon : deux décimales, `symbole + montant` (ex: "$5.00")
/// - EXCEPTION : pour l'EUR le symbole est ajouté APRÈS le montant
///   ("5.00€"), convention régionale. Cas particulier volontaire,
///   aucune autre devise n'a le symbole en suffixe.
///
/// Les codes inconnus sont formatés avec le code comme symbole
/// ("XXX5.00"), jamais rejetés.
pub fn format_price(amount: f64, currency_code: &str) -> String {
    let symbol = currency_symbol(currency_code);

    if is_zero_decimal(currency_code) {
        return format!("{}{}", symbol, amount.round() as i64);
    }

    if currency_code == "EUR" {
        format!("{:.2}{}", amount, symbol)
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

/// Parse une saisie utilisateur vers un montant canonique
///
/// Échoue avec InvalidAmount si la saisie n'est pas un nombre fini
/// strictement positif, puis arrondit selon la politique de la devise
/// (entier pour les devises sans décimales, deux décimales sinon).
/// Retourne la valeur numérique, pas une chaîne : l'affichage repasse
/// par format_price.
pub fn parse_price(input: &str, currency_code: &str) -> Result<f64, PriceError> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| PriceError::InvalidAmount(input.to_string()))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(PriceError::InvalidAmount(input.to_string()));
    }

    if is_zero_decimal(currency_code) {
        Ok(amount.round())
    } else {
        Ok((amount * 100.0).round() / 100.0)
    }
}

/// Affichage natif + conversion optionnelle vers la devise préférée
///
/// Retourne le prix formaté dans sa devise d'origine et, si la devise
/// préférée diffère (et vaut autre chose que "none") et que la table de
/// taux couvre la paire, un second affichage "≈ converti". L'absence de
/// taux dégrade silencieusement : on omet la conversion, on n'échoue pas.
pub fn display_with_conversion(
    amount: f64,
    currency_code: &str,
    preferred_currency: &str,
    rates: Option<&ExchangeRates>,
) -> (String, Option<String>) {
    let native = format_price(amount, currency_code);

    if preferred_currency == "none" || preferred_currency == currency_code {
        return (native, None);
    }

    let converted = rates
        .and_then(|table| convert_price(amount, currency_code, preferred_currency, table))
        .map(|value| format!("≈{}", format_price(value, preferred_currency)));

    (native, converted)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn rates(pairs: &[(&str, f64)]) -> ExchangeRates {
        ExchangeRates {
            rates: pairs
                .iter()
                .map(|&(code, rate)| (code.to_string(), rate))
                .collect::<HashMap<_, _>>(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_format_zero_decimal() {
        assert_eq!(format_price(5.0, "JPY"), "¥5");
        assert_eq!(format_price(5.5, "JPY"), "¥6"); // arrondi à l'entier
        assert_eq!(format_price(1200.0, "KRW"), "₩1200");
    }

    #[test]
    fn test_format_two_decimals_prefix() {
        assert_eq!(format_price(5.0, "USD"), "$5.00");
        assert_eq!(format_price(3.456, "GBP"), "£3.46");
    }

    #[test]
    fn test_format_eur_suffix() {
        // Seule devise avec le symbole en suffixe
        assert_eq!(format_price(5.0, "EUR"), "5.00€");
        assert_eq!(format_price(2.5, "EUR"), "2.50€");
    }

    #[test]
    fn test_format_unknown_code_fallback() {
        assert_eq!(format_price(5.0, "XXX"), "XXX5.00");
    }

    #[test]
    fn test_parse_rounds_per_currency() {
        assert_eq!(parse_price("5.004", "USD"), Ok(5.0));
        assert_eq!(parse_price("5.006", "USD"), Ok(5.01));
        assert_eq!(parse_price("5.6", "JPY"), Ok(6.0));
        assert_eq!(parse_price(" 4.20 ", "EUR"), Ok(4.2));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(parse_price("abc", "USD").is_err());
        assert!(parse_price("", "USD").is_err());
        assert!(parse_price("0", "USD").is_err());
        assert!(parse_price("-3.50", "USD").is_err());
        assert!(parse_price("inf", "USD").is_err());
        assert!(parse_price("NaN", "USD").is_err());
    }

    #[test]
    fn test_parse_format_idempotence() {
        // parse(format(x, c), c) == arrondi(x, c) pour la politique de la
        // devise
        for &x in &[0.01, 1.0, 2.5, 5.004, 1234.567] {
            let usd = parse_price(&format_price(x, "USD").replace('$', ""), "USD").unwrap();
            assert!((usd - (x * 100.0).round() / 100.0).abs() < 1e-9, "x = {}", x);
        }
        for &x in &[1.0, 5.6, 499.5] {
            let jpy = parse_price(&format_price(x, "JPY").replace('¥', ""), "JPY").unwrap();
            assert_eq!(jpy, x.round(), "x = {}", x);
        }
        // L'EUR a le symbole en suffixe
        let eur = parse_price(&format_price(2.346, "EUR").replace('€', ""), "EUR").unwrap();
        assert_eq!(eur, 2.35);
    }

    #[test]
    fn test_display_with_conversion() {
        let table = rates(&[("USD", 1.16)]);
        let (native, converted) =
            display_with_conversion(5.0, "EUR", "USD", Some(&table));
        assert_eq!(native, "5.00€");
        assert_eq!(converted.as_deref(), Some("≈$5.80"));
    }

    #[test]
    fn test_display_same_currency_no_conversion() {
        let table = rates(&[("USD", 1.16)]);
        let (native, converted) =
            display_with_conversion(5.0, "USD", "USD", Some(&table));
        assert_eq!(native, "$5.00");
        assert_eq!(converted, None);
    }

    #[test]
    fn test_display_preferred_none_disables_conversion() {
        let table = rates(&[("USD", 1.16)]);
        let (_, converted) = display_with_conversion(5.0, "EUR", "none", Some(&table));
        assert_eq!(converted, None);
    }

    #[test]
    fn test_display_missing_rates_omits_conversion() {
        // Pas de table : on omet la conversion, l'affichage natif reste
        let (native, converted) = display_with_conversion(5.0, "EUR", "USD", None);
        assert_eq!(native, "5.00€");
        assert_eq!(converted, None);

        // Table sans la devise cible : idem
        let table = rates(&[("GBP", 0.86)]);
        let (_, converted) = display_with_conversion(5.0, "EUR", "USD", Some(&table));
        assert_eq!(converted, None);
    }
}
