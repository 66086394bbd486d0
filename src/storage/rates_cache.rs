// ============================================================================
// Cache disque des taux de change
// ============================================================================
// Persiste le snapshot des taux (base EUR) et décide quand le
// rafraîchir : au plus une fois par mois, sauf rafraîchissement forcé.
// La vérification a lieu à chaque lancement du programme.
//
// Emplacement :
// - Linux : ~/.local/share/coffeetrack/exchange_rates.json
// - macOS : ~/Library/Application Support/coffeetrack/exchange_rates.json
// - Windows : C:\Users\<user>\AppData\Roaming\coffeetrack\exchange_rates.json
//
// CONCEPT : disponibilité avant fraîcheur
// - Si le fetch échoue mais qu'un cache périmé existe, on sert le cache
//   périmé : une conversion approximative vaut mieux que pas de
//   conversion du tout
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::rates::fetch_exchange_rates;
use crate::models::ExchangeRates;

/// Âge maximal du cache avant rafraîchissement (cadence mensuelle)
pub const MAX_RATE_AGE_DAYS: i64 = 30;

/// Chemin standard du fichier de cache
pub fn cache_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Répertoire de données introuvable")?;
    Ok(data_dir.join("coffeetrack").join("exchange_rates.json"))
}

/// Lit le snapshot en cache, None si le fichier n'existe pas
pub fn load_snapshot(path: &Path) -> Result<Option<ExchangeRates>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Échec de la lecture de {}", path.display()))?;

    let snapshot = serde_json::from_str(&contents)
        .with_context(|| format!("Cache de taux invalide : {}", path.display()))?;

    Ok(Some(snapshot))
}

/// Écrit le snapshot au chemin donné (crée les répertoires parents)
pub fn save_snapshot(path: &Path, snapshot: &ExchangeRates) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Échec de la création de {}", parent.display()))?;
    }

    let contents =
        serde_json::to_string(snapshot).context("Échec de la sérialisation des taux")?;

    fs::write(path, contents)
        .with_context(|| format!("Échec de l'écriture de {}", path.display()))?;

    debug!(path = %path.display(), currencies = snapshot.rates.len(), "Rates cache saved");
    Ok(())
}

/// Décide si un rafraîchissement est nécessaire
fn needs_refresh(cached: Option<&ExchangeRates>, force: bool) -> bool {
    if force {
        return true;
    }
    match cached {
        None => true,
        Some(snapshot) => snapshot.is_stale(MAX_RATE_AGE_DAYS),
    }
}

/// Retourne un snapshot de taux utilisable, en le rafraîchissant si besoin
///
/// - Cache présent et récent (et pas de force) : retourné tel quel,
///   avec son âge en log.
/// - Sinon : fetch réseau, cache mis à jour.
/// - Fetch en échec avec un cache existant : le cache (même périmé)
///   est servi.
/// - Fetch en échec sans aucun cache : erreur, l'appelant dégrade en
///   omettant la conversion.
pub async fn ensure_fresh_rates(force: bool) -> Result<ExchangeRates> {
    ensure_fresh_rates_at(&cache_path()?, force).await
}

/// Variante paramétrée par le chemin (testable)
pub async fn ensure_fresh_rates_at(path: &Path, force: bool) -> Result<ExchangeRates> {
    let cached = load_snapshot(path).unwrap_or_else(|e| {
        // Cache corrompu : on le considère absent et on re-fetch
        warn!(error = %e, "Unreadable rates cache, refetching");
        None
    });

    let cached = match cached {
        Some(snapshot) if !needs_refresh(Some(&snapshot), force) => {
            info!(age_days = snapshot.age_days(), "Exchange rates are up to date");
            return Ok(snapshot);
        }
        other => other,
    };

    info!(force, "Fetching new exchange rates");
    match fetch_exchange_rates().await {
        Ok(snapshot) => {
            save_snapshot(path, &snapshot)?;
            info!(
                currencies = snapshot.rates.len(),
                sample_usd = ?snapshot.rate("USD"),
                "Exchange rates updated successfully"
            );
            Ok(snapshot)
        }
        Err(e) => match cached {
            // Cache périmé mais présent : on le sert quand même
            Some(snapshot) => {
                warn!(
                    error = %e,
                    age_days = snapshot.age_days(),
                    "Rate fetch failed, serving stale cache"
                );
                Ok(snapshot)
            }
            None => Err(e.context("Aucun taux en cache et le fetch a échoué")),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::collections::HashMap;

    fn sample_snapshot(age_days: i64) -> ExchangeRates {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), 1.16);
        ExchangeRates {
            rates,
            last_updated: Utc::now() - Duration::days(age_days),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("coffeetrack-test-{}-{}", name, std::process::id()))
            .join("exchange_rates.json")
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_path("cache-round-trip");
        let snapshot = sample_snapshot(0);

        save_snapshot(&path, &snapshot).unwrap();
        let loaded = load_snapshot(&path).unwrap().unwrap();
        assert_eq!(loaded.rate("USD"), Some(1.16));
        assert_eq!(loaded.last_updated, snapshot.last_updated);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_missing_is_none() {
        let loaded = load_snapshot(Path::new("/nonexistent/rates.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_needs_refresh_policy() {
        // Pas de cache : refresh
        assert!(needs_refresh(None, false));

        // Cache récent : pas de refresh
        let fresh = sample_snapshot(2);
        assert!(!needs_refresh(Some(&fresh), false));

        // Cache de plus de 30 jours : refresh
        let stale = sample_snapshot(31);
        assert!(needs_refresh(Some(&stale), false));

        // Force : refresh même avec un cache frais
        assert!(needs_refresh(Some(&fresh), true));
    }

    #[tokio::test]
    async fn test_fresh_cache_served_without_network() {
        // Un cache frais est servi tel quel : aucun appel réseau, donc
        // ce test est déterministe même hors ligne
        let path = temp_path("fresh-cache");
        let snapshot = sample_snapshot(2);
        save_snapshot(&path, &snapshot).unwrap();

        let served = ensure_fresh_rates_at(&path, false).await.unwrap();
        assert_eq!(served.last_updated, snapshot.last_updated);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
