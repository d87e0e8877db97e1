//! Static sample listings used when live discovery returns nothing.

use amzviral_core::{Category, ProductRecord};

use crate::asin::canonical_url;

struct Sample {
    asin: &'static str,
    title: &'static str,
    price: &'static str,
    original_price: &'static str,
    discount: &'static str,
    rating: f64,
    review_count: u64,
    features: &'static [&'static str],
}

impl Sample {
    fn to_record(&self) -> ProductRecord {
        ProductRecord {
            title: self.title.to_owned(),
            price: self.price.to_owned(),
            original_price: self.original_price.to_owned(),
            discount: Some(self.discount.to_owned()),
            rating: self.rating,
            review_count: self.review_count,
            image_url: None,
            features: self.features.iter().map(|f| (*f).to_owned()).collect(),
            canonical_url: canonical_url(self.asin),
            source_id: self.asin.to_owned(),
        }
    }
}

const ELECTRONICS: &[Sample] = &[
    Sample {
        asin: "B0BDHWDR12",
        title: "boAt Airdopes 141 Bluetooth Truly Wireless in Ear Earbuds with 42H Playtime",
        price: "₹1,299",
        original_price: "₹4,490",
        discount: "71% OFF",
        rating: 4.1,
        review_count: 245_678,
        features: &[
            "42 hours total playback",
            "BEAST Mode for gaming",
            "IPX4 water resistance",
            "IWP technology",
        ],
    },
    Sample {
        asin: "B09G9FPHY6",
        title: "Noise ColorFit Pulse Grand Smart Watch with 1.69\" HD Display",
        price: "₹1,499",
        original_price: "₹4,999",
        discount: "70% OFF",
        rating: 4.0,
        review_count: 89_234,
        features: &[
            "1.69\" HD display",
            "150+ watch faces",
            "24/7 heart rate monitoring",
            "SpO2 monitoring",
        ],
    },
];

const MOBILE: &[Sample] = &[Sample {
    asin: "B0CHX1W1XY",
    title: "Redmi 13C 5G (Starshine Green, 4GB RAM, 128GB Storage)",
    price: "₹10,999",
    original_price: "₹14,999",
    discount: "27% OFF",
    rating: 4.2,
    review_count: 34_567,
    features: &[
        "MediaTek Dimensity 6100+",
        "50MP AI Dual Camera",
        "5000mAh Battery",
        "90Hz Display",
    ],
}];

const HOME: &[Sample] = &[Sample {
    asin: "B08R68T5RG",
    title: "Philips Air Purifier AC0819/20, Removes 99.5% Particles",
    price: "₹6,999",
    original_price: "₹9,995",
    discount: "30% OFF",
    rating: 4.3,
    review_count: 12_890,
    features: &[
        "Removes 99.5% particles",
        "HEPA filter",
        "Smart air sensor",
        "Quiet operation",
    ],
}];

const FASHION: &[Sample] = &[Sample {
    asin: "B07FJ5YL8Q",
    title: "Campus Men's Oxyfit Running Shoes",
    price: "₹649",
    original_price: "₹1,499",
    discount: "57% OFF",
    rating: 4.0,
    review_count: 45_678,
    features: &[
        "Lightweight",
        "Memory foam insole",
        "Anti-skid sole",
        "Breathable mesh",
    ],
}];

const BEAUTY: &[Sample] = &[Sample {
    asin: "B0845XSLTV",
    title: "Mamaearth Vitamin C Face Wash with Vitamin C and Turmeric, 100ml",
    price: "₹199",
    original_price: "₹349",
    discount: "43% OFF",
    rating: 4.1,
    review_count: 156_789,
    features: &[
        "With Vitamin C & Turmeric",
        "Cleanses skin impurities",
        "Made Safe certified",
        "Paraben free",
    ],
}];

const FITNESS: &[Sample] = &[Sample {
    asin: "B0B7QWFBVH",
    title: "Boldfit Yoga Mat for Women and Men, 6mm Extra Thick",
    price: "₹299",
    original_price: "₹999",
    discount: "70% OFF",
    rating: 4.2,
    review_count: 23_456,
    features: &[
        "6mm thick for comfort",
        "Anti-slip surface",
        "Lightweight & portable",
        "Easy to clean",
    ],
}];

const KITCHEN: &[Sample] = &[Sample {
    asin: "B09JQMJHXY",
    title: "Prestige Omega Deluxe Induction Base Non-Stick Kitchen Set, 3 Pcs",
    price: "₹1,149",
    original_price: "₹2,795",
    discount: "59% OFF",
    rating: 4.3,
    review_count: 34_567,
    features: &[
        "Induction base",
        "Non-stick coating",
        "Cool touch handles",
        "Dishwasher safe",
    ],
}];

fn samples(category: Category) -> &'static [Sample] {
    match category {
        Category::Electronics => ELECTRONICS,
        Category::Mobile => MOBILE,
        Category::Home => HOME,
        Category::Fashion => FASHION,
        Category::Beauty => BEAUTY,
        Category::Fitness => FITNESS,
        Category::Kitchen => KITCHEN,
    }
}

/// The canned listings for `category`, in table order.
#[must_use]
pub fn fallback_products(category: Category) -> Vec<ProductRecord> {
    samples(category).iter().map(Sample::to_record).collect()
}
