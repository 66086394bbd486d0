// ============================================================================
// Résolution de devise
// ============================================================================
// Détermine la devise locale d'un lieu à partir de signaux libres :
// segment de pays d'une adresse, coordonnées GPS, locale du navigateur.
// Ne retourne jamais d'erreur : défaut "USD" quand aucun signal ne matche.
//
// CONCEPTS RUST :
// 1. Enum à données : CountryLookup distingue "trouvé USD" de
//    "défaut USD" (ambiguïté que le type rend explicite)
// 2. Option<&'static str> : absence de résultat sans valeur sentinelle
// 3. Chaîne de priorité : adresse > coordonnées > locale > défaut
// ============================================================================

use tracing::debug;

use crate::currency::tables::{country_to_currency, GEO_REGIONS};
use crate::models::LocationSignal;

/// Devise retournée quand aucun signal n'est exploitable
pub const DEFAULT_CURRENCY: &str = "USD";

/// Résultat d'une recherche pays -> devise
///
/// La table retourne "USD" aussi bien pour les États-Unis que comme
/// valeur par défaut d'une entrée inconnue. Ce type sépare les deux cas
/// et laisse l'appelant décider s'il les traite pareil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryLookup {
    /// L'entrée correspond à une clé de la table
    Matched(&'static str),
    /// Aucune clé ne correspond : défaut USD
    Default,
}

impl CountryLookup {
    /// Réduit le résultat à un code de devise (Default -> "USD")
    pub fn code(&self) -> &'static str {
        match self {
            CountryLookup::Matched(code) => code,
            CountryLookup::Default => DEFAULT_CURRENCY,
        }
    }

    /// Vrai si l'entrée a effectivement matché une clé de la table
    pub fn is_matched(&self) -> bool {
        matches!(self, CountryLookup::Matched(_))
    }
}

/// Cherche la devise d'un pays (nom libre ou code ISO)
///
/// Recherche exacte puis insensible à la casse ; une entrée vide ou
/// inconnue retourne Default, jamais une erreur.
pub fn currency_from_country(country: &str) -> CountryLookup {
    if country.is_empty() {
        return CountryLookup::Default;
    }

    match country_to_currency(country) {
        Some(code) => CountryLookup::Matched(code),
        None => CountryLookup::Default,
    }
}

/// Devise approximative d'un point GPS
///
/// Parcourt les zones dans l'ordre (spécifique avant large, voir
/// tables::GEO_REGIONS) et retourne la première qui contient le point.
/// None si aucune zone ne matche : l'appelant passe au signal suivant,
/// on ne force pas le défaut USD ici.
pub fn currency_from_coordinates(lat: f64, lng: f64) -> Option<&'static str> {
    GEO_REGIONS
        .iter()
        .find(|region| region.contains(lat, lng))
        .map(|region| region.currency)
}

/// Devise déduite d'un tag de locale (ex: "en-GB" -> GBP)
///
/// Seul le sous-tag de région est consulté. Un résultat USD n'est pas
/// accepté : une locale sans région informative ne prouve pas les
/// États-Unis.
pub fn currency_from_locale(locale: &str) -> Option<&'static str> {
    let region = locale.split('-').nth(1)?;
    let region = region.to_uppercase();

    match currency_from_country(&region) {
        CountryLookup::Matched(code) if code != DEFAULT_CURRENCY => Some(code),
        _ => None,
    }
}

/// Détecte la devise locale d'un lieu
///
/// Essaie chaque signal dans l'ordre jusqu'au premier résultat probant :
/// 1. Segment de pays de l'adresse (dernier segment après la virgule).
///    Accepté dès que la table matche — y compris un match USD explicite
///    ("United States", "US", ...), contrairement au défaut.
/// 2. Coordonnées GPS (zones ordonnées).
/// 3. Sous-tag de région de la locale (USD non accepté).
/// 4. Défaut "USD".
///
/// Ne retourne jamais d'erreur : une mauvaise devise dégrade l'affichage,
/// elle ne bloque jamais le flux principal.
pub fn detect_currency(signal: &LocationSignal) -> &'static str {
    // 1. Adresse : segment de pays
    if let Some(country) = signal.country_segment() {
        let lookup = currency_from_country(country);
        if let CountryLookup::Matched(code) = lookup {
            debug!(country = %country, currency = %code, "Currency detected from address");
            return code;
        }
    }

    // 2. Coordonnées GPS
    if let Some((lat, lng)) = signal.coordinates {
        if let Some(code) = currency_from_coordinates(lat, lng) {
            debug!(lat, lng, currency = %code, "Currency detected from coordinates");
            return code;
        }
    }

    // 3. Locale du navigateur
    if let Some(locale) = signal.locale.as_deref() {
        if let Some(code) = currency_from_locale(locale) {
            debug!(locale = %locale, currency = %code, "Currency detected from locale");
            return code;
        }
    }

    // 4. Défaut
    debug!("No currency detected, defaulting to USD");
    DEFAULT_CURRENCY
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_match_vs_default() {
        assert_eq!(currency_from_country("Japan"), CountryLookup::Matched("JPY"));
        assert_eq!(
            currency_from_country("United States"),
            CountryLookup::Matched("USD")
        );
        // "Matché USD" et "défaut USD" donnent le même code mais restent
        // distinguables
        assert_eq!(currency_from_country("Atlantis"), CountryLookup::Default);
        assert_eq!(currency_from_country("Atlantis").code(), "USD");
        assert!(!currency_from_country("Atlantis").is_matched());
        assert!(currency_from_country("USA").is_matched());
    }

    #[test]
    fn test_country_empty_is_default() {
        assert_eq!(currency_from_country(""), CountryLookup::Default);
    }

    #[test]
    fn test_coordinates_singapore_before_broader_boxes() {
        // Singapour est couverte par les boîtes Malaisie et Indonésie,
        // mais sa zone passe en premier
        assert_eq!(currency_from_coordinates(1.3, 103.8), Some("SGD"));
    }

    #[test]
    fn test_coordinates_japan_east_of_128() {
        // Kyoto : dans la boîte Chine aussi, mais le Japon (>= 128°)
        // est évalué avant
        assert_eq!(currency_from_coordinates(35.0, 135.0), Some("JPY"));
    }

    #[test]
    fn test_coordinates_west_of_128_falls_to_china() {
        // À l'ouest de 128°, la boîte Japon ne s'applique plus
        assert_eq!(currency_from_coordinates(35.0, 126.0), Some("KRW")); // Séoul
        assert_eq!(currency_from_coordinates(40.0, 116.0), Some("CNY")); // Pékin
    }

    #[test]
    fn test_coordinates_other_regions() {
        assert_eq!(currency_from_coordinates(22.3, 114.2), Some("HKD"));
        assert_eq!(currency_from_coordinates(48.85, 2.35), Some("EUR")); // Paris
        assert_eq!(currency_from_coordinates(51.5, -0.1), Some("GBP")); // Londres
        assert_eq!(currency_from_coordinates(40.7, -74.0), Some("USD")); // New York
        assert_eq!(currency_from_coordinates(-33.9, 151.2), Some("AUD")); // Sydney
    }

    #[test]
    fn test_coordinates_no_match() {
        // Milieu de l'Atlantique sud : aucune zone, pas de défaut forcé
        assert_eq!(currency_from_coordinates(-30.0, -20.0), None);
    }

    #[test]
    fn test_locale_with_region() {
        assert_eq!(currency_from_locale("en-GB"), Some("GBP"));
        assert_eq!(currency_from_locale("fr-FR"), Some("EUR"));
        assert_eq!(currency_from_locale("ja-jp"), Some("JPY")); // casse tolérée
    }

    #[test]
    fn test_locale_usd_not_trusted() {
        // en-US donne USD via la table, mais on ne s'y fie pas
        assert_eq!(currency_from_locale("en-US"), None);
        // Pas de sous-tag de région
        assert_eq!(currency_from_locale("en"), None);
    }

    #[test]
    fn test_detect_empty_signal_defaults_usd() {
        let signal = LocationSignal::default();
        assert_eq!(detect_currency(&signal), "USD");
    }

    #[test]
    fn test_detect_address_wins() {
        let signal = LocationSignal {
            address: Some("1 Chome Ginza, Chuo City, Tokyo, Japan".to_string()),
            coordinates: Some((48.85, 2.35)), // contredirait (Paris)
            locale: Some("en-GB".to_string()),
        };
        assert_eq!(detect_currency(&signal), "JPY");
    }

    #[test]
    fn test_detect_explicit_united_states_address() {
        // Match USD explicite : accepté directement, pas un défaut
        let signal = LocationSignal {
            address: Some("123 Main St, Portland, United States".to_string()),
            coordinates: None,
            locale: Some("en-GB".to_string()),
        };
        assert_eq!(detect_currency(&signal), "USD");
    }

    #[test]
    fn test_detect_unknown_address_falls_to_coordinates() {
        let signal = LocationSignal {
            address: Some("Somewhere, Atlantis".to_string()),
            coordinates: Some((1.3, 103.8)),
            locale: None,
        };
        assert_eq!(detect_currency(&signal), "SGD");
    }

    #[test]
    fn test_detect_falls_to_locale() {
        let signal = LocationSignal {
            address: None,
            coordinates: Some((-30.0, -20.0)), // aucune zone
            locale: Some("en-GB".to_string()),
        };
        assert_eq!(detect_currency(&signal), "GBP");
    }
}
