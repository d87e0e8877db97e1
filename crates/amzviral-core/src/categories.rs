use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tag applied to products found through the "hot deals" search.
pub const DEALS_CATEGORY: &str = "deals";

/// Search phrases used by the "hot deals" discovery variant.
pub const DEAL_SEARCH_TERMS: &[&str] = &[
    "deals today",
    "best sellers",
    "trending products",
    "lightning deals",
];

/// The product categories that discovery knows how to search.
///
/// Declaration order matters: multi-category discovery walks [`Category::ALL`]
/// front to back, and the deals fallback draws from the first three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Mobile,
    Home,
    Fashion,
    Beauty,
    Fitness,
    Kitchen,
}

/// Display metadata for one category, as served by the categories endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Electronics,
        Category::Mobile,
        Category::Home,
        Category::Fashion,
        Category::Beauty,
        Category::Fitness,
        Category::Kitchen,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Mobile => "mobile",
            Category::Home => "home",
            Category::Fashion => "fashion",
            Category::Beauty => "beauty",
            Category::Fitness => "fitness",
            Category::Kitchen => "kitchen",
        }
    }

    /// Search phrases; discovery picks one at random per call.
    #[must_use]
    pub fn search_terms(self) -> &'static [&'static str] {
        match self {
            Category::Electronics => &[
                "wireless earbuds",
                "smartwatch under 2000",
                "power bank 20000mah",
                "bluetooth speaker",
                "headphones",
            ],
            Category::Mobile => &[
                "smartphone under 15000",
                "mobile 5G phone",
                "redmi phone",
                "samsung phone",
                "realme phone",
            ],
            Category::Home => &[
                "air purifier",
                "water purifier",
                "mixer grinder",
                "vacuum cleaner",
                "ceiling fan",
            ],
            Category::Fashion => &[
                "men casual shoes",
                "women handbag",
                "men wallet leather",
                "women kurta set",
                "sports shoes men",
            ],
            Category::Beauty => &[
                "face serum vitamin c",
                "hair dryer",
                "trimmer for men",
                "sunscreen",
                "lipstick",
            ],
            Category::Fitness => &[
                "yoga mat",
                "dumbbells",
                "resistance band",
                "protein powder",
                "gym gloves",
            ],
            Category::Kitchen => &[
                "non stick pan",
                "pressure cooker",
                "lunch box steel",
                "water bottle",
                "knife set",
            ],
        }
    }

    #[must_use]
    pub fn info(self) -> CategoryInfo {
        let (name, icon, description) = match self {
            Category::Electronics => ("Electronics", "📱", "Gadgets & Audio"),
            Category::Mobile => ("Mobiles", "📲", "Smartphones"),
            Category::Home => ("Home", "🏠", "Appliances"),
            Category::Fashion => ("Fashion", "👗", "Clothing & Shoes"),
            Category::Beauty => ("Beauty", "💄", "Skincare"),
            Category::Fitness => ("Fitness", "💪", "Sports & Health"),
            Category::Kitchen => ("Kitchen", "🍳", "Cookware"),
        };
        CategoryInfo {
            id: self.as_str(),
            name,
            icon,
            description,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown category \"{s}\""))
    }
}
