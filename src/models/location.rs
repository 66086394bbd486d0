// ============================================================================
// Structure : LocationSignal
// ============================================================================
// Signaux de localisation d'un lieu, tous optionnels : adresse libre,
// coordonnées GPS extraites d'une URL de carte, locale du navigateur.
// C'est l'entrée du résolveur de devise (currency::resolver).
//
// CONCEPT RUST : Option<T> pour des signaux dont n'importe quel
// sous-ensemble peut manquer
// ============================================================================

/// Signaux de localisation fournis par le collaborateur de scraping
#[derive(Debug, Clone, Default)]
pub struct LocationSignal {
    /// Adresse libre (ex: "1 Chome Ginza, Chuo City, Tokyo, Japan")
    pub address: Option<String>,

    /// (latitude, longitude) en degrés décimaux
    pub coordinates: Option<(f64, f64)>,

    /// Tag de locale (ex: "en-GB")
    pub locale: Option<String>,
}

impl LocationSignal {
    /// Signal réduit à une adresse
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }

    /// Dernier segment de l'adresse, où se trouve généralement le pays
    ///
    /// L'adresse est découpée sur les virgules et le dernier segment est
    /// trimé. None si pas d'adresse ou segment vide.
    pub fn country_segment(&self) -> Option<&str> {
        let address = self.address.as_deref()?;
        let last = address.rsplit(',').next()?.trim();
        if last.is_empty() {
            None
        } else {
            Some(last)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
