// ============================================================================
// Configuration persistée
// ============================================================================
// Les réglages de l'utilisateur : credentials du backend Supabase et
// devise d'affichage préférée. Stockés en JSON dans le répertoire de
// configuration de la plateforme :
// - Linux : ~/.config/coffeetrack/settings.json
// - macOS : ~/Library/Application Support/coffeetrack/settings.json
// - Windows : C:\Users\<user>\AppData\Roaming\coffeetrack\settings.json
//
// CONCEPTS RUST :
// 1. serde defaults : un fichier partiel ou absent donne des réglages
//    par défaut, jamais une erreur
// 2. Fonctions paramétrées par le chemin : testables sans toucher au
//    vrai répertoire de configuration
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Devise d'affichage préférée par défaut
fn default_preferred_currency() -> String {
    "EUR".to_string()
}

/// Réglages persistés de l'application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// URL du projet Supabase (ex: "https://xyz.supabase.co")
    pub supabase_url: Option<String>,

    /// Clé anon du projet Supabase
    pub supabase_key: Option<String>,

    /// Devise d'affichage préférée ("none" désactive la conversion)
    #[serde(default = "default_preferred_currency")]
    pub preferred_currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_key: None,
            preferred_currency: default_preferred_currency(),
        }
    }
}

impl Settings {
    /// Vrai si les credentials du backend sont renseignés
    pub fn is_backend_configured(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_key.is_some()
    }

    /// Charge les réglages depuis le chemin donné
    ///
    /// Fichier absent -> réglages par défaut (premier lancement).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Échec de la lecture de {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Fichier de configuration invalide : {}", path.display()))
    }

    /// Écrit les réglages au chemin donné (crée les répertoires parents)
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Échec de la création de {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Échec de la sérialisation des réglages")?;

        fs::write(path, contents)
            .with_context(|| format!("Échec de l'écriture de {}", path.display()))?;

        debug!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Charge les réglages depuis l'emplacement standard
    pub fn load() -> Result<Self> {
        Self::load_from(&settings_path()?)
    }

    /// Écrit les réglages à l'emplacement standard
    pub fn save(&self) -> Result<()> {
        self.save_to(&settings_path()?)
    }
}

/// Chemin standard du fichier de configuration
pub fn settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Répertoire de configuration introuvable")?;
    Ok(config_dir.join("coffeetrack").join("settings.json"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("coffeetrack-test-{}-{}", name, std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/settings.json")).unwrap();
        assert!(!settings.is_backend_configured());
        assert_eq!(settings.preferred_currency, "EUR");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_path("round-trip");

        let settings = Settings {
            supabase_url: Some("https://xyz.supabase.co".to_string()),
            supabase_key: Some("anon-key".to_string()),
            preferred_currency: "JPY".to_string(),
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert!(loaded.is_backend_configured());
        assert_eq!(loaded.supabase_url.as_deref(), Some("https://xyz.supabase.co"));
        assert_eq!(loaded.preferred_currency, "JPY");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_fills_default_currency() {
        // Ancien fichier sans preferred_currency : défaut EUR
        let path = temp_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "supabase_url": "https://a.co", "supabase_key": "k" }"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.preferred_currency, "EUR");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
