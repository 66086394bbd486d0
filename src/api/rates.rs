// ============================================================================
// API Client : Taux de change
// ============================================================================
// Récupère les taux de change depuis exchangerate-api.com (free tier,
// pas de clé API). Tous les taux sont demandés relatifs à l'EUR : la
// table retournée respecte l'invariant de base du convertisseur.
//
// CONCEPTS RUST :
// 1. async/await : programmation asynchrone (non-bloquante)
// 2. Serde : désérialisation JSON automatique de la réponse
// 3. anyhow::Context : contexte d'erreur à chaque étape réseau
// ============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::models::ExchangeRates;

/// Devise de base de tous les taux demandés
const BASE_CURRENCY: &str = "EUR";

// ============================================================================
// Structures pour parser la réponse JSON
// ============================================================================

/// Réponse de l'API exchangerate-api
/// Format : { "base": "EUR", "rates": { "USD": 1.16, ... }, ... }
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: std::collections::HashMap<String, f64>,
}

// ============================================================================
// Fonctions publiques
// ============================================================================

/// Construit l'URL de l'API de taux (base EUR fixe)
fn build_rates_url() -> String {
    format!(
        "https://api.exchangerate-api.com/v4/latest/{}",
        BASE_CURRENCY
    )
}

/// Récupère un snapshot frais des taux de change (base EUR)
///
/// Le snapshot est horodaté maintenant ; la politique de cache (30 jours)
/// appartient à storage::rates_cache, pas à ce client.
///
/// CONCEPT RUST : #[instrument]
/// - Macro tracing qui ajoute automatiquement un span
/// - Tous les logs à l'intérieur auront le contexte de la fonction
#[instrument]
pub async fn fetch_exchange_rates() -> Result<ExchangeRates> {
    let url = build_rates_url();
    debug!(url = %url, "Fetching exchange rates");

    let client = reqwest::Client::builder()
        .build()
        .context("Échec de la création du client HTTP")?;

    let response = client
        .get(&url)
        .send()
        .await
        .context("Échec de la requête HTTP vers l'API de taux")?;

    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        error!(status = %status, "Rates API returned error status");
        anyhow::bail!("L'API de taux a retourné une erreur : HTTP {}", status);
    }

    let rates_response: RatesResponse = response
        .json()
        .await
        .context("Échec du parsing JSON de la réponse de taux")?;

    if rates_response.rates.is_empty() {
        anyhow::bail!("L'API de taux a retourné une table vide");
    }

    info!(
        currencies = rates_response.rates.len(),
        "Exchange rates fetched successfully"
    );

    Ok(ExchangeRates::new(rates_response.rates))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rates_url() {
        let url = build_rates_url();
        assert!(url.contains("exchangerate-api.com"));
        assert!(url.ends_with("/latest/EUR")); // base EUR fixe
    }

    #[test]
    fn test_parse_rates_response() {
        // Échantillon du format réel de l'API
        let json = r#"{
            "base": "EUR",
            "date": "2026-08-01",
            "rates": { "USD": 1.16, "GBP": 0.86, "JPY": 172.4 }
        }"#;

        let parsed: RatesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.rates.len(), 3);
        assert_eq!(parsed.rates.get("USD"), Some(&1.16));
    }

    // Test async nécessite tokio test runtime
    // CONCEPT RUST : #[tokio::test]
    // - Macro qui setup un runtime tokio pour le test
    // - Permet d'utiliser .await dans les tests
    #[tokio::test]
    async fn test_fetch_exchange_rates() {
        // Test avec un vrai appel API (peut échouer si pas de connexion)
        let result = fetch_exchange_rates().await;

        match result {
            Ok(snapshot) => {
                assert!(snapshot.rate("USD").is_some());
                println!("✓ Récupéré {} taux", snapshot.rates.len());
            }
            Err(e) => {
                println!("⚠ Test skippé (pas de connexion?) : {}", e);
            }
        }
    }
}
