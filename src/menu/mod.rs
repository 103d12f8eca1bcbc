//! Menu Module - Menu items and the card add-to-cart flow

mod card;

pub use card::{CardActions, MenuCardController, DEFAULT_ADD_FEEDBACK};

/// One dish or drink offered by a canteen stall.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in whole rupiah
    pub price: u32,
    pub image: String,
    pub rating: Option<f32>,
    pub tags: Vec<String>,
    pub in_stock: bool,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u32, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            image: image.into(),
            rating: None,
            tags: Vec::new(),
            in_stock: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }
}

/// Format a rupiah amount with dot thousands separators: `Rp 15.000`.
pub fn format_rupiah(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(500), "Rp 500");
        assert_eq!(format_rupiah(5000), "Rp 5.000");
        assert_eq!(format_rupiah(15000), "Rp 15.000");
        assert_eq!(format_rupiah(1250000), "Rp 1.250.000");
    }

    #[test]
    fn test_builder() {
        let item = MenuItem::new("1", "Nasi Gudeg Spesial", 15000, "gudeg.jpg")
            .with_description("Nasi gudeg dengan ayam dan telur")
            .with_rating(4.8)
            .with_tags(["Tradisional", "Pedas"])
            .out_of_stock();

        assert_eq!(item.tags, vec!["Tradisional".to_string(), "Pedas".to_string()]);
        assert_eq!(item.rating, Some(4.8));
        assert!(!item.in_stock);
    }
}
