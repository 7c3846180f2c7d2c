//! Built-in lane content used when the config lists no items

/// Label of the leading icon card
pub const ICON_LABEL: &str = "◆ Icon 1";

/// Number of demo cards
pub const DEMO_ITEM_COUNT: usize = 14;

/// An icon card followed by alternating paragraph and text cards
pub fn demo_labels() -> Vec<String> {
    std::iter::once(ICON_LABEL.to_string())
        .chain((2..=DEMO_ITEM_COUNT).map(|n| {
            if n % 2 == 0 {
                format!("Paragraph Item {n}")
            } else {
                format!("Text Item {n}")
            }
        }))
        .collect()
}
