// ============================================================================
// Tables statiques de devises
// ============================================================================
// Toutes les données de référence du coeur métier : immuables, construites
// à la compilation, jamais modifiées à l'exécution.
//
// CONCEPTS RUST :
// 1. &'static : données embarquées dans le binaire, durée de vie du programme
// 2. Slices constantes : parcours linéaire suffisant pour ~80 entrées
// 3. Lifetime elision : currency_symbol retourne soit une entrée 'static,
//    soit le code d'entrée lui-même (fallback)
// ============================================================================

/// Devises affichées sans décimales (pas de centimes)
pub const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "JPY", // Yen japonais
    "KRW", // Won sud-coréen
    "VND", // Dong vietnamien
    "CLP", // Peso chilien
    "ISK", // Couronne islandaise
    "TWD", // Nouveau dollar de Taïwan
    "PYG", // Guaraní paraguayen
    "UGX", // Shilling ougandais
    "BIF", // Franc burundais
    "DJF", // Franc djiboutien
    "GNF", // Franc guinéen
    "KMF", // Franc comorien
    "RWF", // Franc rwandais
    "XAF", // Franc CFA (Afrique centrale)
    "XOF", // Franc CFA (Afrique de l'Ouest)
    "XPF", // Franc CFP
];

/// Correspondance pays -> devise (nom ou code ISO du pays)
///
/// Chaque pays apparaît sous plusieurs clés (code ISO, nom complet,
/// variantes usuelles). La recherche est d'abord exacte, puis
/// insensible à la casse (voir country_to_currency).
pub const COUNTRY_TO_CURRENCY: &[(&str, &str)] = &[
    ("US", "USD"),
    ("USA", "USD"),
    ("United States", "USD"),
    ("United States of America", "USD"),
    ("CA", "CAD"),
    ("Canada", "CAD"),
    ("GB", "GBP"),
    ("United Kingdom", "GBP"),
    ("UK", "GBP"),
    ("AU", "AUD"),
    ("Australia", "AUD"),
    ("NZ", "NZD"),
    ("New Zealand", "NZD"),
    ("JP", "JPY"),
    ("Japan", "JPY"),
    ("KR", "KRW"),
    ("South Korea", "KRW"),
    ("Korea", "KRW"),
    ("CN", "CNY"),
    ("China", "CNY"),
    ("IN", "INR"),
    ("India", "INR"),
    ("SG", "SGD"),
    ("Singapore", "SGD"),
    ("MY", "MYR"),
    ("Malaysia", "MYR"),
    ("TH", "THB"),
    ("Thailand", "THB"),
    ("ID", "IDR"),
    ("Indonesia", "IDR"),
    ("PH", "PHP"),
    ("Philippines", "PHP"),
    ("VN", "VND"),
    ("Vietnam", "VND"),
    ("MX", "MXN"),
    ("Mexico", "MXN"),
    ("BR", "BRL"),
    ("Brazil", "BRL"),
    ("AR", "ARS"),
    ("Argentina", "ARS"),
    ("CL", "CLP"),
    ("Chile", "CLP"),
    ("CO", "COP"),
    ("Colombia", "COP"),
    ("PE", "PEN"),
    ("Peru", "PEN"),
    ("ZA", "ZAR"),
    ("South Africa", "ZAR"),
    ("EG", "EGP"),
    ("Egypt", "EGP"),
    ("NG", "NGN"),
    ("Nigeria", "NGN"),
    ("KE", "KES"),
    ("Kenya", "KES"),
    ("TU", "TRY"),
    ("Turkey", "TRY"),
    ("Türkiye", "TRY"),
    ("RU", "RUB"),
    ("Russia", "RUB"),
    ("PL", "PLN"),
    ("Poland", "PLN"),
    ("CZ", "CZK"),
    ("Czech Republic", "CZK"),
    ("Czechia", "CZK"),
    ("HU", "HUF"),
    ("Hungary", "HUF"),
    ("RO", "RON"),
    ("Romania", "RON"),
    ("SE", "SEK"),
    ("Sweden", "SEK"),
    ("NO", "NOK"),
    ("Norway", "NOK"),
    ("DK", "DKK"),
    ("Denmark", "DKK"),
    ("CH", "CHF"),
    ("Switzerland", "CHF"),
    ("IL", "ILS"),
    ("Israel", "ILS"),
    ("AE", "AED"),
    ("United Arab Emirates", "AED"),
    ("UAE", "AED"),
    ("SA", "SAR"),
    ("Saudi Arabia", "SAR"),
    ("HK", "HKD"),
    ("Hong Kong", "HKD"),
    ("TW", "TWD"),
    ("Taiwan", "TWD"),
    ("IS", "ISK"),
    ("Iceland", "ISK"),
    // Zone euro
    ("DE", "EUR"),
    ("Germany", "EUR"),
    ("FR", "EUR"),
    ("France", "EUR"),
    ("IT", "EUR"),
    ("Italy", "EUR"),
    ("ES", "EUR"),
    ("Spain", "EUR"),
    ("PT", "EUR"),
    ("Portugal", "EUR"),
    ("NL", "EUR"),
    ("Netherlands", "EUR"),
    ("BE", "EUR"),
    ("Belgium", "EUR"),
    ("AT", "EUR"),
    ("Austria", "EUR"),
    ("IE", "EUR"),
    ("Ireland", "EUR"),
    ("FI", "EUR"),
    ("Finland", "EUR"),
    ("GR", "EUR"),
    ("Greece", "EUR"),
    ("LU", "EUR"),
    ("Luxembourg", "EUR"),
    ("SK", "EUR"),
    ("Slovakia", "EUR"),
    ("SI", "EUR"),
    ("Slovenia", "EUR"),
    ("EE", "EUR"),
    ("Estonia", "EUR"),
    ("LV", "EUR"),
    ("Latvia", "EUR"),
    ("LT", "EUR"),
    ("Lithuania", "EUR"),
    ("MT", "EUR"),
    ("Malta", "EUR"),
    ("CY", "EUR"),
    ("Cyprus", "EUR"),
];

/// Symboles d'affichage par devise
///
/// Les codes absents de la table utilisent le code lui-même comme symbole
/// (ex: "XXX5.00" pour une devise inconnue).
pub const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("CAD", "CA$"),
    ("AUD", "A$"),
    ("NZD", "NZ$"),
    ("GBP", "£"),
    ("EUR", "€"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("KRW", "₩"),
    ("INR", "₹"),
    ("SGD", "S$"),
    ("MYR", "RM"),
    ("THB", "฿"),
    ("IDR", "Rp"),
    ("PHP", "₱"),
    ("VND", "₫"),
    ("MXN", "MX$"),
    ("BRL", "R$"),
    ("ARS", "AR$"),
    ("CLP", "CL$"),
    ("COP", "CO$"),
    ("PEN", "S/"),
    ("ZAR", "R"),
    ("EGP", "E£"),
    ("NGN", "₦"),
    ("KES", "KSh"),
    ("TRY", "₺"),
    ("RUB", "₽"),
    ("PLN", "zł"),
    ("CZK", "Kč"),
    ("HUF", "Ft"),
    ("RON", "lei"),
    ("SEK", "kr"),
    ("NOK", "kr"),
    ("DKK", "kr"),
    ("CHF", "CHF"),
    ("ILS", "₪"),
    ("AED", "د.إ"),
    ("SAR", "ر.س"),
    ("HKD", "HK$"),
    ("TWD", "NT$"),
    ("ISK", "kr"),
];

/// Rectangle géographique approximant une zone monétaire
///
/// CONCEPT RUST : struct avec données 'static
/// - Chaque zone est une constante embarquée dans le binaire
/// - Les bornes sont inclusives des deux côtés
#[derive(Debug, Clone, Copy)]
pub struct GeoRegion {
    /// Devise de la zone
    pub currency: &'static str,
    /// Latitude min/max (degrés décimaux)
    pub lat: (f64, f64),
    /// Longitude min/max (degrés décimaux)
    pub lng: (f64, f64),
}

impl GeoRegion {
    /// Vérifie si un point est dans le rectangle (bornes incluses)
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.lat.0 && lat <= self.lat.1 && lng >= self.lng.0 && lng <= self.lng.1
    }
}

/// Zones géographiques ordonnées, évaluées de haut en bas
///
/// INVARIANT : l'ordre fait partie du contrat. Les zones précises
/// (Singapour, Hong Kong) sont testées avant les zones larges (Chine,
/// Europe) ; réordonner change le résultat pour les zones qui se
/// chevauchent. La boîte Japon commence à 128° de longitude pour exclure
/// la partie ouest qui chevauche la Corée et la Chine ; la boîte Taïwan
/// est entièrement couverte par la boîte Chine qui la précède.
pub const GEO_REGIONS: &[GeoRegion] = &[
    // Singapour (très spécifique)
    GeoRegion { currency: "SGD", lat: (1.1, 1.5), lng: (103.6, 104.1) },
    // Hong Kong
    GeoRegion { currency: "HKD", lat: (22.1, 22.6), lng: (113.8, 114.4) },
    // Corée du Sud (péninsule)
    GeoRegion { currency: "KRW", lat: (33.0, 39.0), lng: (124.0, 132.0) },
    // Japon (archipel, borne ouest à 128°)
    GeoRegion { currency: "JPY", lat: (24.0, 46.0), lng: (128.0, 154.0) },
    // Chine (continent)
    GeoRegion { currency: "CNY", lat: (18.0, 54.0), lng: (73.0, 135.0) },
    // Taïwan
    GeoRegion { currency: "TWD", lat: (21.9, 25.3), lng: (120.0, 122.0) },
    // USA (continental)
    GeoRegion { currency: "USD", lat: (24.0, 49.0), lng: (-125.0, -66.0) },
    // Canada
    GeoRegion { currency: "CAD", lat: (41.0, 83.0), lng: (-141.0, -52.0) },
    // Royaume-Uni
    GeoRegion { currency: "GBP", lat: (49.0, 61.0), lng: (-11.0, 2.0) },
    // Europe (simplifiée - ouest/centre)
    GeoRegion { currency: "EUR", lat: (36.0, 71.0), lng: (-10.0, 30.0) },
    // Australie
    GeoRegion { currency: "AUD", lat: (-44.0, -10.0), lng: (113.0, 154.0) },
    // Inde
    GeoRegion { currency: "INR", lat: (8.0, 38.0), lng: (68.0, 97.0) },
    // Thaïlande
    GeoRegion { currency: "THB", lat: (5.0, 21.0), lng: (97.0, 106.0) },
    // Vietnam
    GeoRegion { currency: "VND", lat: (8.0, 24.0), lng: (102.0, 110.0) },
    // Malaisie
    GeoRegion { currency: "MYR", lat: (0.8, 7.5), lng: (99.0, 120.0) },
    // Indonésie
    GeoRegion { currency: "IDR", lat: (-11.0, 6.0), lng: (95.0, 141.0) },
    // Philippines
    GeoRegion { currency: "PHP", lat: (4.5, 21.0), lng: (116.0, 127.0) },
];

// ============================================================================
// Fonctions de consultation
// ============================================================================

/// Vérifie si une devise s'affiche sans décimales
pub fn is_zero_decimal(currency_code: &str) -> bool {
    ZERO_DECIMAL_CURRENCIES.contains(&currency_code)
}

/// Cherche la devise d'un pays (nom ou code ISO)
///
/// Recherche exacte d'abord, puis insensible à la casse sur toutes les
/// clés de la table. L'entrée est trimée avant la recherche insensible.
pub fn country_to_currency(country: &str) -> Option<&'static str> {
    // Recherche exacte
    if let Some(&(_, code)) = COUNTRY_TO_CURRENCY.iter().find(|(key, _)| *key == country) {
        return Some(code);
    }

    // Recherche insensible à la casse
    let normalized = country.trim().to_lowercase();
    COUNTRY_TO_CURRENCY
        .iter()
        .find(|(key, _)| key.to_lowercase() == normalized)
        .map(|&(_, code)| code)
}

/// Retourne le symbole d'affichage d'une devise
///
/// Fallback : le code lui-même si absent de la table (les codes inconnus
/// sont conservés tels quels, jamais rejetés).
pub fn currency_symbol(currency_code: &str) -> &str {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(code, _)| *code == currency_code)
        .map(|&(_, symbol)| symbol)
        .unwrap_or(currency_code)
}

// ============================================================================
// Tests
// ============================================================================
