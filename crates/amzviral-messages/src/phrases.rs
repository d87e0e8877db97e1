/// Attention-grabbing openers; one is chosen per message.
pub const HOOKS: [&str; 10] = [
    "🔥 LOOT DEAL ALERT",
    "😱 PRICE CRASH",
    "⚡ FLASH SALE LIVE",
    "🎯 TRENDING NOW",
    "💎 BESTSELLER ALERT",
    "🚨 LAST FEW LEFT",
    "🔥 MEGA DISCOUNT",
    "💰 UNBELIEVABLE PRICE",
    "⏰ LIMITED TIME OFFER",
    "🛒 MUST GRAB DEAL",
];

/// Urgency lines placed before the hashtags.
pub const CLOSINGS: [&str; 7] = [
    "⚠️ Limited stock - Jaldi grab karo!",
    "⏰ Offer jaldi khatam ho jayega!",
    "🏃‍♂️ Miss mat karo ye deal!",
    "💨 Fast selling - Hurry up!",
    "⚡ Don't miss this deal!",
    "🔥 Selling out fast!",
    "⭐ Top rated product!",
];

pub const WHATSAPP_HASHTAGS: &str = "#AmazonIndia #Deals #Shopping #Loot";
pub const TELEGRAM_HASHTAGS: &str = "#Amazon #India #Deals #Shopping #OnlineShopping";
