//! System instruction for the boutique's sommelier
//!
//! The instruction is rebuilt for every request so that it always describes
//! the product the shopper had selected when they pressed send.

use crate::chat::ProductContext;
use std::fmt::Write;

/// Opening assistant message of every session
pub const GREETING: &str =
    "Greetings. I am EssenceBot, your fragrance sommelier. Ask me about our collection.";

const PERSONA: &str = r#"You are "EssenceBot", a world-class perfume sommelier for a luxury digital boutique called Luxe Essence.
Your tone is elegant, sophisticated, and sensory-focused. Use vocabulary related to scent, memory, and emotion.
Keep answers concise (under 100 words) unless asked for detailed notes."#;

const GUIDANCE: &str = r#"If the user asks about the perfume, describe its notes and the mood it evokes.
If the user asks about pricing, mention it is in "USD"."#;

const BROWSING: &str = "The user is browsing the main fragrance collection.";

/// Sentence describing what the shopper is looking at
pub fn product_context(product: Option<&ProductContext>) -> String {
    let Some(product) = product else {
        return BROWSING.to_string();
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "The user is currently examining the fragrance \"{}\".",
        product.name
    );
    let _ = writeln!(out, "Price: {}.", product.price);
    let _ = writeln!(out, "Notes: {}.", product.notes);
    let _ = write!(out, "Description: {}", product.description);
    out
}

pub fn build_system_prompt(product: Option<&ProductContext>) -> String {
    format!("{PERSONA}\n{}\n{GUIDANCE}", product_context(product))
}
