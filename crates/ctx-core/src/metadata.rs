//! Item metadata supplied alongside evaluation diffs

use std::collections::BTreeMap;

/// Property name to value for a single item
pub type ItemMetadata = BTreeMap<String, String>;

/// Include path to that item's metadata
pub type ProjectMetadata = BTreeMap<String, ItemMetadata>;

/// Default property marking an item as excluded from the active configuration
pub const EXCLUDE_FROM_CURRENT_CONFIGURATION: &str = "ExcludeFromCurrentConfiguration";

static EMPTY_ITEM: ItemMetadata = BTreeMap::new();

/// Metadata recorded for `include_path`, or an empty map.
pub fn item_metadata<'a>(metadata: &'a ProjectMetadata, include_path: &str) -> &'a ItemMetadata {
    metadata.get(include_path).unwrap_or(&EMPTY_ITEM)
}

/// Parse a boolean property. Only `true`/`false` (any case) are recognized.
pub fn bool_property(metadata: &ItemMetadata, name: &str) -> Option<bool> {
    let value = metadata.get(name)?.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// False only when the item's metadata sets `exclusion_property` to true.
pub fn is_item_in_current_configuration(
    include_path: &str,
    metadata: &ProjectMetadata,
    exclusion_property: &str,
) -> bool {
    bool_property(item_metadata(metadata, include_path), exclusion_property) != Some(true)
}
