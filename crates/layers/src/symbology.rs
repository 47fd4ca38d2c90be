use scene::entity::Category;

/// Render style for an entity's geometry layer.
///
/// Hiding keeps the layer mounted and zeroes the opacities, so re-showing
/// is a style mutation rather than a layer rebuild.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub opacity: f64,
    pub fill_opacity: f64,
    pub weight: u32,
}

impl LayerStyle {
    pub const fn new(color: &'static str, opacity: f64, fill_opacity: f64) -> Self {
        Self {
            color,
            fill_color: color,
            opacity,
            fill_opacity,
            weight: 3,
        }
    }

    /// Same layer, zero opacity.
    pub const fn faded(self) -> Self {
        Self {
            color: self.color,
            fill_color: self.fill_color,
            opacity: 0.0,
            fill_opacity: 0.0,
            weight: self.weight,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 || self.fill_opacity > 0.0
    }
}

/// Dark green, matching the paw marker icon.
pub const DOG_PARK_STYLE: LayerStyle = LayerStyle::new("#2E7D32", 0.9, 0.2);
/// Blue for veterinary locations.
pub const VET_STYLE: LayerStyle = LayerStyle::new("#1565C0", 0.9, 0.2);
pub const OTHER_STYLE: LayerStyle = LayerStyle::new("#4285F4", 0.9, 0.2);

pub const fn category_style(category: Category) -> LayerStyle {
    match category {
        Category::DogPark => DOG_PARK_STYLE,
        Category::Vet => VET_STYLE,
        Category::Other => OTHER_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::{category_style, DOG_PARK_STYLE, VET_STYLE};
    use scene::entity::Category;

    #[test]
    fn categories_map_to_distinct_colors() {
        assert_ne!(DOG_PARK_STYLE.color, VET_STYLE.color);
        assert_eq!(category_style(Category::DogPark), DOG_PARK_STYLE);
    }

    #[test]
    fn faded_zeroes_opacity_but_keeps_the_palette() {
        let hidden = DOG_PARK_STYLE.faded();
        assert!(!hidden.is_visible());
        assert_eq!(hidden.color, DOG_PARK_STYLE.color);
        assert_eq!(hidden.weight, DOG_PARK_STYLE.weight);
    }
}
