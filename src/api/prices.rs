// ============================================================================
// API Client : Backend de prix (Supabase REST)
// ============================================================================
// Lit et écrit les soumissions de prix sur le backend hébergé :
// - moyenne par lieu via la RPC get_average_price
// - insertion d'une soumission dans price_submissions
// - test de connexion (page de configuration)
//
// CONCEPTS RUST :
// 1. Struct client : le client HTTP et les credentials voyagent ensemble
// 2. #[serde(untagged)] : tolère les numériques Postgres renvoyés en
//    chaîne OU en nombre selon la colonne
// 3. Option<PriceStats> : "pas encore de prix" n'est pas une erreur
// ============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use crate::models::PriceStats;

/// Client du backend Supabase
#[derive(Debug, Clone)]
pub struct PriceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

// ============================================================================
// Structures pour parser les réponses JSON
// ============================================================================

/// Valeur numérique renvoyée en nombre ou en chaîne
///
/// Les colonnes numeric de Postgres arrivent souvent en chaîne dans le
/// JSON de Supabase ; on accepte les deux formes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(value) => Some(*value),
            NumberOrText::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Une ligne de la RPC get_average_price
#[derive(Debug, Deserialize)]
struct AveragePriceRow {
    avg_price: Option<NumberOrText>,
    submission_count: Option<NumberOrText>,
    currency_code: Option<String>,
}

/// Convertit les lignes de la RPC en statistiques
///
/// Première ligne avec un avg_price exploitable, sinon None (aucun prix
/// soumis pour ce lieu). Devise absente -> "USD".
fn rows_to_stats(rows: Vec<AveragePriceRow>) -> Option<PriceStats> {
    let row = rows.into_iter().next()?;
    let avg_price = row.avg_price.as_ref().and_then(NumberOrText::as_f64)?;

    let count = row
        .submission_count
        .as_ref()
        .and_then(NumberOrText::as_f64)
        .map(|value| value as u32)
        .unwrap_or(0);

    Some(PriceStats {
        avg_price,
        count,
        currency_code: row.currency_code.unwrap_or_else(|| "USD".to_string()),
    })
}

impl PriceClient {
    /// Crée un client pour un projet Supabase
    ///
    /// base_url : URL du projet (ex: "https://xyz.supabase.co"),
    /// api_key : clé anon du projet.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// URL de la RPC de moyenne
    fn rpc_url(&self) -> String {
        format!("{}/rest/v1/rpc/get_average_price", self.base_url)
    }

    /// URL de la table des soumissions
    fn submissions_url(&self) -> String {
        format!("{}/rest/v1/price_submissions", self.base_url)
    }

    /// Récupère le prix moyen d'un lieu
    ///
    /// Ok(None) quand le lieu n'a encore aucune soumission : le flux
    /// d'affichage continue avec un message "pas encore de prix".
    #[instrument(skip(self))]
    pub async fn get_average_price(&self, place_id: &str) -> Result<Option<PriceStats>> {
        debug!(place_id = %place_id, "Fetching average price");

        let response = self
            .client
            .post(self.rpc_url())
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=representation")
            .json(&json!({ "p_place_id": place_id }))
            .send()
            .await
            .context("Échec de la requête vers le backend de prix")?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Price backend returned error status");
            anyhow::bail!("Le backend de prix a retourné une erreur : HTTP {}", status);
        }

        let rows: Vec<AveragePriceRow> = response
            .json()
            .await
            .context("Échec du parsing JSON de la réponse de prix")?;

        let stats = rows_to_stats(rows);
        match &stats {
            Some(stats) => {
                info!(
                    avg_price = stats.avg_price,
                    count = stats.count,
                    currency = %stats.currency_code,
                    "Average price fetched"
                );
            }
            None => {
                info!(place_id = %place_id, "No price data yet for this place");
            }
        }

        Ok(stats)
    }

    /// Soumet une observation de prix pour un lieu
    ///
    /// Le montant est un payload opaque pour le backend : la validation
    /// (positivité, arrondi par devise) est faite en amont par
    /// currency::parse_price.
    #[instrument(skip(self, place_name))]
    pub async fn submit_price(
        &self,
        place_id: &str,
        place_name: &str,
        price: f64,
        currency_code: &str,
    ) -> Result<()> {
        debug!(place_id = %place_id, price, currency = %currency_code, "Submitting price");

        let response = self
            .client
            .post(self.submissions_url())
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(&json!({
                "place_id": place_id,
                "place_name": place_name,
                "price": price,
                "currency_code": currency_code,
            }))
            .send()
            .await
            .context("Échec de la soumission du prix")?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Price submission rejected");
            anyhow::bail!("La soumission a été refusée : HTTP {}", status);
        }

        info!(place_id = %place_id, price, currency = %currency_code, "Price submitted");
        Ok(())
    }

    /// Teste la connexion au backend
    ///
    /// Un GET sur la racine REST : un succès HTTP ou un 404 signifient
    /// que le projet répond (le 404 vient du routing REST, pas d'une
    /// panne).
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/rest/v1/", self.base_url);
        debug!(url = %url, "Testing backend connection");

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .context("Échec de la requête de test de connexion")?;

        let status = response.status();
        let reachable = status.is_success() || status.as_u16() == 404;
        if !reachable {
            warn!(status = %status, "Backend connection test failed");
        }

        Ok(reachable)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
