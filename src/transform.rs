//! Mapping from catalog cards to `cards` table rows.

use crate::models::{CardRow, ScryfallCard};

/// Map one catalog card to its row. Pure and total.
///
/// Missing or empty optional strings become `None`. Keywords are joined
/// with `", "` and stay an empty string when there are none.
pub fn transform_card(card: &ScryfallCard) -> CardRow {
    CardRow {
        scryfall_id: card.id.clone(),
        name: card.name.clone(),
        mana_cost: non_empty(&card.mana_cost),
        cmc: card.cmc,
        type_line: card.type_line.clone(),
        colors: card.colors.clone(),
        color_identity: card.color_identity.clone(),
        power: non_empty(&card.power),
        toughness: non_empty(&card.toughness),
        rarity: card.rarity.clone(),
        set_code: card.set.clone(),
        collector_number: non_empty(&card.collector_number),
        keywords: card.keywords.join(", "),
        image_uris: card.image_uris.clone(),
        card_object_uri: card.uri.clone(),
        scryfall_uri: non_empty(&card.scryfall_uri),
    }
}

/// Element-wise [`transform_card`], preserving order.
pub fn transform_cards(cards: &[ScryfallCard]) -> Vec<CardRow> {
    cards.iter().map(transform_card).collect()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}
