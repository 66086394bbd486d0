// ============================================================================
// CoffeeTrack - CLI
// ============================================================================
// Outil en ligne de commande du tracker de prix du café :
// - détecte la devise locale d'un lieu (adresse, GPS, locale)
// - affiche le prix moyen d'un lieu avec conversion optionnelle
// - soumet une observation de prix au backend
// - gère le cache des taux de change et la configuration
//
// CONCEPTS RUST CLÉS :
// 1. Async dans sync : tokio::runtime::Runtime pour les appels API
// 2. Logging fichier : tracing + rotation quotidienne
// 3. Erreurs utilisateur vs erreurs programme : une saisie invalide
//    s'affiche et se corrige, elle ne remonte pas en panic
// ============================================================================

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use coffeetrack::api::PriceClient;
use coffeetrack::currency::{
    detect_currency, display_with_conversion, format_price, parse_price,
};
use coffeetrack::models::LocationSignal;
use coffeetrack::storage::{ensure_fresh_rates, Settings};

// ============================================================================
// Initialisation du logging
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// CONCEPT RUST : Tracing subscriber
/// - Registry : point central des logs
/// - Layer : transforme et route les logs
/// - EnvFilter : filtre par niveau (RUST_LOG env var)
/// - RollingFileAppender : rotation quotidienne
///
/// Les logs sont écrits dans :
/// - Linux : ~/.local/share/coffeetrack/logs/coffeetrack.log
/// - macOS : ~/Library/Application Support/coffeetrack/logs/coffeetrack.log
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/coffeetrack/logs/coffeetrack.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run -- detect --address "..., Japan"
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_dir()
        .map(|dir| dir.join("coffeetrack").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"));

    // Crée le répertoire s'il n'existe pas
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "coffeetrack.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: coffeetrack::api::rates)
                .with_line_number(true), // Inclut le numéro de ligne
        )
        .with(
            // Filtre les logs par niveau
            // - RUST_LOG=debug : tous les logs debug+
            // - Par défaut : debug pour coffeetrack, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coffeetrack=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Parsing des arguments
// ============================================================================
// Pas de framework CLI : quelques flags optionnels suffisent. Les flags
// de localisation alimentent un LocationSignal pour le résolveur de
// devise.
// ============================================================================

/// Arguments décomposés d'une commande
#[derive(Debug, Default)]
struct ParsedArgs {
    /// Arguments positionnels (ex: place-id, nom, prix)
    positional: Vec<String>,
    /// Signaux de localisation (--address, --coords, --locale)
    signal: LocationSignal,
    /// Devise imposée (--currency), prioritaire sur la détection
    currency: Option<String>,
    /// Rafraîchissement forcé (--force)
    force: bool,
}

/// Découpe "lat,lng" en coordonnées décimales
fn parse_coords(value: &str) -> Result<(f64, f64)> {
    let (lat, lng) = value
        .split_once(',')
        .context("--coords attend le format LAT,LNG (ex: 1.3,103.8)")?;

    let lat: f64 = lat.trim().parse().context("Latitude invalide")?;
    let lng: f64 = lng.trim().parse().context("Longitude invalide")?;
    Ok((lat, lng))
}

/// Sépare flags et positionnels
fn parse_args(args: &[String]) -> Result<ParsedArgs> {
    let mut parsed = ParsedArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--address" => {
                let value = iter.next().context("--address attend une valeur")?;
                parsed.signal.address = Some(value.clone());
            }
            "--coords" => {
                let value = iter.next().context("--coords attend une valeur")?;
                parsed.signal.coordinates = Some(parse_coords(value)?);
            }
            "--locale" => {
                let value = iter.next().context("--locale attend une valeur")?;
                parsed.signal.locale = Some(value.clone());
            }
            "--currency" => {
                let value = iter.next().context("--currency attend une valeur")?;
                parsed.currency = Some(value.to_uppercase());
            }
            "--force" => parsed.force = true,
            _ => parsed.positional.push(arg.clone()),
        }
    }

    Ok(parsed)
}

fn print_usage() {
    println!("CoffeeTrack - prix moyen du café, en crowdsourcing");
    println!();
    println!("USAGE :");
    println!("  coffeetrack detect [--address A] [--coords LAT,LNG] [--locale L]");
    println!("  coffeetrack price <place-id> [flags de localisation]");
    println!("  coffeetrack submit <place-id> <nom> <prix> [--currency C | flags]");
    println!("  coffeetrack rates [--force]");
    println!("  coffeetrack configure <supabase-url> <supabase-key>");
    println!("  coffeetrack prefer <devise|none>");
    println!("  coffeetrack test");
}

// ============================================================================
// Point d'entrée
// ============================================================================
// CONCEPT RUST : Async dans sync
// - main() est synchrone, les commandes réseau passent par block_on
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging FIRST
    // - Si init échoue, on affiche l'erreur et continue quand même
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        return Ok(());
    }

    let command = args[0].as_str();
    let parsed = parse_args(&args[1..])?;
    info!(command, "CoffeeTrack starting up");

    let runtime = tokio::runtime::Runtime::new()?;

    let result = match command {
        "detect" => cmd_detect(&parsed),
        "price" => runtime.block_on(cmd_price(&parsed)),
        "submit" => runtime.block_on(cmd_submit(&parsed)),
        "rates" => runtime.block_on(cmd_rates(&parsed)),
        "configure" => cmd_configure(&parsed),
        "prefer" => cmd_prefer(&parsed),
        "test" => runtime.block_on(cmd_test()),
        _ => {
            print_usage();
            anyhow::bail!("Commande inconnue : {}", command)
        }
    };

    match &result {
        Ok(_) => info!("Command completed"),
        Err(e) => error!(error = ?e, "Command failed"),
    }

    result
}

// ============================================================================
// Commandes
// ============================================================================

/// Détecte la devise locale à partir des signaux fournis
fn cmd_detect(parsed: &ParsedArgs) -> Result<()> {
    let currency = detect_currency(&parsed.signal);
    println!("☕ Devise détectée : {}", currency);

    if parsed.signal.address.is_none()
        && parsed.signal.coordinates.is_none()
        && parsed.signal.locale.is_none()
    {
        println!("   (aucun signal fourni : défaut USD)");
    }

    Ok(())
}

/// Affiche le prix moyen d'un lieu, avec conversion vers la devise préférée
async fn cmd_price(parsed: &ParsedArgs) -> Result<()> {
    let place_id = parsed
        .positional
        .first()
        .context("Usage : coffeetrack price <place-id>")?;

    let settings = Settings::load()?;
    let Some(client) = backend_client(&settings)? else {
        return Ok(());
    };

    let stats = client.get_average_price(place_id).await?;

    match stats {
        Some(stats) => {
            // Devise des données si présente, sinon devise détectée
            // localement à partir des signaux fournis
            let currency = if stats.currency_code.is_empty() {
                detect_currency(&parsed.signal).to_string()
            } else {
                stats.currency_code.clone()
            };

            // Les taux sont optionnels : sans eux on omet juste la
            // conversion, l'affichage natif reste
            let rates = match ensure_fresh_rates(false).await {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(error = %e, "No exchange rates available, skipping conversion");
                    None
                }
            };

            let (native, converted) = display_with_conversion(
                stats.avg_price,
                &currency,
                &settings.preferred_currency,
                rates.as_ref(),
            );

            match converted {
                Some(converted) => {
                    println!("☕ Prix moyen du café : {} {}", native, converted)
                }
                None => println!("☕ Prix moyen du café : {}", native),
            }
            println!("   {}", stats.count_label());
        }
        None => {
            println!("☕ Pas encore de prix pour ce lieu.");
            println!("   Soyez le premier : coffeetrack submit {} <nom> <prix>", place_id);
        }
    }

    Ok(())
}

/// Soumet une observation de prix pour un lieu
async fn cmd_submit(parsed: &ParsedArgs) -> Result<()> {
    let [place_id, place_name, price_input] = parsed.positional.as_slice() else {
        anyhow::bail!("Usage : coffeetrack submit <place-id> <nom> <prix>");
    };

    // Devise imposée par --currency, sinon détectée des signaux
    let currency = parsed
        .currency
        .clone()
        .unwrap_or_else(|| detect_currency(&parsed.signal).to_string());

    // Validation de la saisie : erreur corrigeable par l'utilisateur,
    // on ne propage pas
    let price = match parse_price(price_input, &currency) {
        Ok(price) => price,
        Err(e) => {
            warn!(input = %price_input, error = %e, "Invalid price input");
            println!("❌ Prix invalide : entrez un nombre strictement positif");
            return Ok(());
        }
    };

    let settings = Settings::load()?;
    let Some(client) = backend_client(&settings)? else {
        return Ok(());
    };

    client
        .submit_price(place_id, place_name, price, &currency)
        .await?;

    println!("✓ Prix envoyé ! ({})", format_price(price, &currency));
    Ok(())
}

/// Rafraîchit ou affiche l'état du cache des taux
async fn cmd_rates(parsed: &ParsedArgs) -> Result<()> {
    let snapshot = ensure_fresh_rates(parsed.force).await?;

    println!(
        "📊 Taux de change : {} devises, mis à jour le {} ({} jours)",
        snapshot.rates.len(),
        snapshot.last_updated.format("%Y-%m-%d"),
        snapshot.age_days()
    );

    if let Some(usd) = snapshot.rate("USD") {
        println!("   Exemple : 1 EUR = {:.4} USD", usd);
    }

    Ok(())
}

/// Enregistre les credentials du backend
fn cmd_configure(parsed: &ParsedArgs) -> Result<()> {
    let [url, key] = parsed.positional.as_slice() else {
        anyhow::bail!("Usage : coffeetrack configure <supabase-url> <supabase-key>");
    };

    let mut settings = Settings::load()?;
    settings.supabase_url = Some(url.trim().to_string());
    settings.supabase_key = Some(key.trim().to_string());
    settings.save()?;

    println!("✅ Configuration enregistrée");
    println!("   Vérifiez la connexion avec : coffeetrack test");
    Ok(())
}

/// Enregistre la devise d'affichage préférée
fn cmd_prefer(parsed: &ParsedArgs) -> Result<()> {
    let value = parsed
        .positional
        .first()
        .context("Usage : coffeetrack prefer <devise|none>")?;

    // "none" désactive la conversion ; tout code est conservé tel quel
    // (les codes inconnus ne sont jamais rejetés)
    let preferred = if value.eq_ignore_ascii_case("none") {
        "none".to_string()
    } else {
        value.to_uppercase()
    };

    let mut settings = Settings::load()?;
    settings.preferred_currency = preferred.clone();
    settings.save()?;

    println!("✅ Devise préférée : {}", preferred);
    Ok(())
}

/// Teste la connexion au backend configuré
async fn cmd_test() -> Result<()> {
    let settings = Settings::load()?;
    let Some(client) = backend_client(&settings)? else {
        return Ok(());
    };

    if client.test_connection().await? {
        println!("✅ Connexion au backend réussie !");
    } else {
        println!("❌ Le backend a répondu avec une erreur");
    }

    Ok(())
}

/// Construit le client backend, ou explique comment le configurer
///
/// CONCEPT : credentials manquants = message utilisateur, pas une erreur
/// - L'utilisateur corrige avec `configure`, rien à propager
fn backend_client(settings: &Settings) -> Result<Option<PriceClient>> {
    match (&settings.supabase_url, &settings.supabase_key) {
        (Some(url), Some(key)) => Ok(Some(PriceClient::new(url.as_str(), key.as_str())?)),
        _ => {
            println!("⚠️  Backend non configuré.");
            println!("   Lancez : coffeetrack configure <supabase-url> <supabase-key>");
            Ok(None)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn to_args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_coords() {
        assert_eq!(parse_coords("1.3,103.8").unwrap(), (1.3, 103.8));
        assert_eq!(parse_coords(" 35.0 , 135.0 ").unwrap(), (35.0, 135.0));
        assert!(parse_coords("pas-des-coords").is_err());
        assert!(parse_coords("1.3;103.8").is_err());
    }

    #[test]
    fn test_parse_args_flags_and_positionals() {
        let args = to_args(&[
            "place-1",
            "--address",
            "Tokyo, Japan",
            "--coords",
            "35.0,135.0",
            "--currency",
            "jpy",
        ]);
        let parsed = parse_args(&args).unwrap();

        assert_eq!(parsed.positional, vec!["place-1"]);
        assert_eq!(parsed.signal.address.as_deref(), Some("Tokyo, Japan"));
        assert_eq!(parsed.signal.coordinates, Some((35.0, 135.0)));
        assert_eq!(parsed.currency.as_deref(), Some("JPY")); // mis en majuscules
        assert!(!parsed.force);
    }

    #[test]
    fn test_parse_args_missing_flag_value() {
        let args = to_args(&["--address"]);
        assert!(parse_args(&args).is_err());
    }

    #[test]
    fn test_parse_args_force() {
        let parsed = parse_args(&to_args(&["--force"])).unwrap();
        assert!(parsed.force);
        assert!(parsed.positional.is_empty());
    }
}
