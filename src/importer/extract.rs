//! Building `Property` records from listing pages and canned data.
//!
//! Nothing here fails: any field the page does not provide is filled with
//! a fixed placeholder.

use crate::models::{Platform, Price, Property};
use chrono::Utc;
use scraper::{Html, Selector};

pub const DEFAULT_NAME: &str = "Apartamento Importado";
pub const DEFAULT_ADDRESS: &str = "Dirección no disponible";
pub const DEFAULT_DESCRIPTION: &str = "Descripción no disponible";

const PHOTO_LIVING: &str = "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=500";
const PHOTO_BEDROOM: &str = "https://images.unsplash.com/photo-1560448204-603b3fc33ddc?w=500";

/// Fields read off a listing page. `None` means the marker was not found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFields {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl ListingFields {
    /// Query a Booking.com page: first `<h1>`, the address block and the
    /// description meta tag.
    pub fn from_booking_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        Self {
            name: first_text(&document, "h1"),
            address: first_text(&document, r#"[data-testid="address"]"#),
            description: first_attr(&document, r#"meta[name="description"]"#, "content"),
        }
    }
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Record for a Booking.com page; house details beyond the scraped
/// fields are not on the page and use fixed values.
pub fn booking_property(html: &str, original_url: &str) -> Property {
    let fields = ListingFields::from_booking_html(html);

    Property {
        name: fields.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        address: fields.address.unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
        description: fields
            .description
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        check_in_time: "15:00".to_string(),
        check_out_time: "11:00".to_string(),
        wifi: "WiFi disponible".to_string(),
        parking: true,
        max_guests: 4,
        rules: strings(&[
            "No fumar",
            "No mascotas",
            "Respetar a los vecinos",
            "Mantener limpio el apartamento",
        ]),
        amenities: strings(&["WiFi", "Aire acondicionado", "Cocina equipada", "TV", "Lavadora"]),
        images: strings(&[PHOTO_LIVING, PHOTO_BEDROOM]),
        price: Price {
            base: 120.0,
            currency: "EUR".to_string(),
        },
        platform: Platform::Booking,
        original_url: original_url.to_string(),
        imported_at: Utc::now(),
    }
}

/// Record for an Airbnb page. The page content is not read.
pub fn airbnb_property(original_url: &str) -> Property {
    Property {
        name: "Apartamento Airbnb".to_string(),
        address: "Dirección Airbnb".to_string(),
        description: "Hermoso apartamento en Airbnb".to_string(),
        check_in_time: "16:00".to_string(),
        check_out_time: "10:00".to_string(),
        wifi: "WiFi gratuito".to_string(),
        parking: false,
        max_guests: 2,
        rules: strings(&["No fumar", "No fiestas", "Respetar el horario de silencio"]),
        amenities: strings(&["WiFi", "Cocina", "TV", "Calefacción"]),
        images: strings(&[PHOTO_LIVING]),
        price: Price {
            base: 100.0,
            currency: "EUR".to_string(),
        },
        platform: Platform::Airbnb,
        original_url: original_url.to_string(),
        imported_at: Utc::now(),
    }
}

/// Canned record returned by simulated imports
pub fn demo_property(platform: Platform, original_url: &str) -> Property {
    Property {
        name: "Apartamento en el centro".to_string(),
        address: "Calle Principal 123, Madrid, España".to_string(),
        description: "Hermoso apartamento en el corazón de la ciudad con todas las comodidades."
            .to_string(),
        check_in_time: "15:00".to_string(),
        check_out_time: "11:00".to_string(),
        wifi: "WiFi gratuito disponible".to_string(),
        parking: true,
        max_guests: 4,
        rules: strings(&[
            "No fumar",
            "No mascotas",
            "Respetar a los vecinos",
            "Mantener limpio el apartamento",
        ]),
        amenities: strings(&["WiFi", "Aire acondicionado", "Cocina equipada", "TV", "Lavadora"]),
        images: strings(&[PHOTO_LIVING, PHOTO_BEDROOM]),
        price: Price {
            base: 120.0,
            currency: "EUR".to_string(),
        },
        platform,
        original_url: original_url.to_string(),
        imported_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOKING_PAGE: &str = r#"
        <html>
          <head>
            <meta name="description" content=" Luminoso piso junto a la Plaza Mayor. ">
          </head>
          <body>
            <h1 class="pp-header__title">  Casa Sol Madrid </h1>
            <div data-testid="address">Calle Mayor 10, 28013 Madrid</div>
            <h1>Second heading</h1>
          </body>
        </html>"#;

    #[test]
    fn test_booking_fields_found() {
        let fields = ListingFields::from_booking_html(BOOKING_PAGE);
        assert_eq!(fields.name.as_deref(), Some("Casa Sol Madrid"));
        assert_eq!(fields.address.as_deref(), Some("Calle Mayor 10, 28013 Madrid"));
        assert_eq!(
            fields.description.as_deref(),
            Some("Luminoso piso junto a la Plaza Mayor.")
        );
    }

    #[test]
    fn test_missing_markers_use_defaults() {
        let property = booking_property(
            "<html><body><p>nothing</p></body></html>",
            "https://www.booking.com/x",
        );
        assert_eq!(property.name, DEFAULT_NAME);
        assert_eq!(property.address, DEFAULT_ADDRESS);
        assert_eq!(property.description, DEFAULT_DESCRIPTION);
        assert_eq!(property.platform, Platform::Booking);
        assert_eq!(property.rules.len(), 4);
    }

    #[test]
    fn test_empty_heading_is_skipped() {
        let fields = ListingFields::from_booking_html("<h1>   </h1><h1>Real name</h1>");
        assert_eq!(fields.name.as_deref(), Some("Real name"));
    }

    #[test]
    fn test_demo_property_carries_platform_and_url() {
        let property = demo_property(Platform::Vrbo, "https://www.vrbo.com/1");
        assert_eq!(property.platform, Platform::Vrbo);
        assert_eq!(property.original_url, "https://www.vrbo.com/1");
        assert_eq!(property.price.currency, "EUR");
    }
}
