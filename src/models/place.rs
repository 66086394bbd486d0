// ============================================================================
// Structures : PlaceInfo et PriceStats
// ============================================================================
// Un lieu identifié (id opaque côté backend) et les statistiques de prix
// agrégées que le backend retourne pour ce lieu.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Un lieu identifié par le collaborateur de scraping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceInfo {
    /// Identifiant opaque du lieu (clé côté backend)
    pub id: String,

    /// Nom affiché (ex: "Blue Bottle Coffee")
    pub name: String,

    /// Adresse complète si disponible
    pub address: Option<String>,
}

impl PlaceInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
        }
    }
}

/// Statistiques de prix agrégées pour un lieu
///
/// Les trois seuls champs attendus du backend ; le reste de son schéma
/// n'est pas validé ici.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    /// Prix moyen observé, dans la devise du lieu
    pub avg_price: f64,

    /// Nombre de soumissions
    pub count: u32,

    /// Devise des soumissions (ex: "JPY")
    pub currency_code: String,
}

impl PriceStats {
    /// Libellé du nombre de soumissions ("1 submission" / "3 submissions")
    pub fn count_label(&self) -> String {
        if self.count == 1 {
            "1 submission".to_string()
        } else {
            format!("{} submissions", self.count)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_info_new() {
        let place = PlaceInfo::new("0x123:0x456", "Blue Bottle Coffee");
        assert_eq!(place.id, "0x123:0x456");
        assert!(place.address.is_none());
    }

    #[test]
    fn test_count_label() {
        let mut stats = PriceStats {
            avg_price: 4.5,
            count: 1,
            currency_code: "USD".to_string(),
        };
        assert_eq!(stats.count_label(), "1 submission");

        stats.count = 3;
        assert_eq!(stats.count_label(), "3 submissions");
    }
}
