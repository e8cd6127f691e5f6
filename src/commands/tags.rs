use crate::api::{ApiError, JournalApi};
use crate::journal::{AppState, TradeListView};
use crate::models::{CreateTagInput, Tag, DEFAULT_TAG_COLOR};

use super::trades::load_trades;

/// Refresh the mistake-tag catalogue. Returns how many tags exist.
pub async fn load_tags(api: &dyn JournalApi, state: &mut AppState) -> Result<usize, ApiError> {
    let tags = api.fetch_tags().await?;
    let count = tags.len();
    state.replace_tags(tags);
    Ok(count)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagOption {
    pub tag: Tag,
    pub selected: bool,
}

/// The tag chooser for one trade: the whole catalogue, with the trade's
/// current tags marked
#[derive(Debug, Clone, PartialEq)]
pub struct TagPicker {
    pub trade_id: i64,
    pub options: Vec<TagOption>,
}

impl TagPicker {
    pub fn is_selected(&self, tag_id: i64) -> bool {
        self.options.iter().any(|o| o.tag.id == tag_id && o.selected)
    }

    /// Find a catalogue tag by id or case-insensitive name
    pub fn find(&self, key: &str) -> Option<&Tag> {
        let key = key.trim();
        let id = key.parse::<i64>().ok();
        self.options
            .iter()
            .map(|o| &o.tag)
            .find(|t| Some(t.id) == id || t.name.eq_ignore_ascii_case(key))
    }
}

pub async fn open_tag_picker(api: &dyn JournalApi, state: &mut AppState, trade_id: i64) -> Result<TagPicker, ApiError> {
    if state.tags().is_empty() {
        load_tags(api, state).await?;
    }
    let attached = api.fetch_trade_tags(trade_id).await?;

    Ok(TagPicker {
        trade_id,
        options: state
            .tags()
            .iter()
            .map(|tag| TagOption {
                selected: attached.iter().any(|a| a.id == tag.id),
                tag: tag.clone(),
            })
            .collect(),
    })
}

/// Attach or detach a tag. The selection only flips once the backend has
/// accepted the change. Returns the new selection state.
pub async fn toggle_tag(api: &dyn JournalApi, picker: &mut TagPicker, tag_id: i64) -> Result<bool, ApiError> {
    let trade_id = picker.trade_id;
    let option = picker
        .options
        .iter_mut()
        .find(|o| o.tag.id == tag_id)
        .ok_or_else(|| ApiError::InvalidInput(format!("Unknown tag {}", tag_id)))?;

    let response = if option.selected {
        api.remove_tag(trade_id, tag_id).await?
    } else {
        api.add_tag(trade_id, tag_id).await?
    };
    if !response.success {
        return Err(ApiError::Rejected(
            response.error.unwrap_or_else(|| format!("Tag {} not changed on trade {}", tag_id, trade_id)),
        ));
    }

    option.selected = !option.selected;
    log::info!(
        "{} tag '{}' on trade {}",
        if option.selected { "Added" } else { "Removed" },
        option.tag.name,
        trade_id
    );
    Ok(option.selected)
}

/// Closing the picker reloads the trades so the cards show the new tags
pub async fn close_tag_picker(api: &dyn JournalApi, state: &mut AppState) -> Result<TradeListView, ApiError> {
    load_trades(api, state).await
}

/// Add a tag to the catalogue. The colour defaults to red.
pub async fn create_tag(
    api: &dyn JournalApi,
    state: &mut AppState,
    name: &str,
    color: Option<&str>,
) -> Result<i64, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput("Tag name is required".to_string()));
    }
    let input = CreateTagInput {
        name: name.to_string(),
        color: color.unwrap_or(DEFAULT_TAG_COLOR).to_string(),
    };

    let response = api.create_tag(&input).await?;
    let tag_id = match (response.success, response.tag_id) {
        (true, Some(id)) => id,
        _ => return Err(ApiError::Rejected(format!("Tag '{}' was not created", name))),
    };
    log::info!("Created tag '{}' ({})", input.name, tag_id);

    if let Err(e) = load_tags(api, state).await {
        log::error!("Failed to reload tags: {}", e);
    }
    Ok(tag_id)
}
