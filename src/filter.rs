// Filter panel state and `/filter?...` query construction.
// Selections are keyed by the canonical option value; display names are only
// looked up for rendering.

use serde::Serialize;
use url::form_urlencoded;
use wasm_bindgen::prelude::*;

use crate::catalog::{catalog, find_group, wire_param, SelectionMode};
use crate::error::UiError;

/// Parameters the listing endpoint expects on every request, with their defaults.
const REQUIRED_PARAMS: [(&str, &str); 3] = [("type", ""), ("country", ""), ("sort", "default")];

/// What is selected for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Selection {
    One(String),
    /// Insertion-ordered, no duplicates.
    Many(Vec<String>),
}

/// Filter criteria plus the free-text keyword, and the single open dropdown.
#[derive(Debug, Clone, Default)]
pub struct FilterQueryBuilder {
    keyword: String,
    /// Kept in the order groups were first touched; that order drives the query.
    selections: Vec<(String, Selection)>,
    open_dropdown: Option<String>,
}

impl FilterQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the current page's query string, taking `keyword` from it.
    pub fn from_location(search: &str) -> Self {
        let keyword = form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == "keyword")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();

        FilterQueryBuilder {
            keyword,
            ..Self::default()
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn set_keyword(&mut self, text: &str) {
        self.keyword = text.to_string();
    }

    pub fn open_dropdown(&self) -> Option<&str> {
        self.open_dropdown.as_deref()
    }

    /// Open `group_id`, or close it when it is already the open one.
    pub fn toggle_dropdown(&mut self, group_id: &str) {
        if self.open_dropdown.as_deref() == Some(group_id) {
            self.open_dropdown = None;
        } else {
            self.open_dropdown = Some(group_id.to_string());
        }
        log::debug!("filter dropdown open: {:?}", self.open_dropdown);
    }

    pub fn close_dropdown(&mut self) {
        self.open_dropdown = None;
    }

    /// Toggle `value` in a multi-select group, or replace the value of a
    /// single-select group and close the dropdown.
    ///
    /// Ids outside the catalog behave as single-select pass-through groups.
    pub fn select(&mut self, group_id: &str, value: &str) {
        let mode = find_group(group_id).map_or(SelectionMode::Single, |g| g.mode);

        match mode {
            SelectionMode::Multi => {
                let entry = self.entry(group_id);
                if !matches!(entry, Selection::Many(_)) {
                    *entry = Selection::Many(Vec::new());
                }
                if let Selection::Many(values) = entry {
                    if let Some(pos) = values.iter().position(|v| v == value) {
                        values.remove(pos);
                    } else {
                        values.push(value.to_string());
                    }
                }
            }
            SelectionMode::Single => {
                *self.entry(group_id) = Selection::One(value.to_string());
                self.open_dropdown = None;
            }
        }
        log::debug!("filter select {group_id}={value} ({mode:?})");
    }

    /// Like [`select`](Self::select) but addressed by the label shown to the
    /// user. Labels the group does not know are used as the value unchanged.
    pub fn select_by_name(&mut self, group_id: &str, display_name: &str) {
        let value = find_group(group_id)
            .and_then(|g| g.option_by_name(display_name))
            .map_or(display_name, |o| o.value.as_str());
        self.select(group_id, value);
    }

    /// Drop every selection. The keyword is left alone.
    pub fn clear(&mut self) {
        self.selections.clear();
        self.open_dropdown = None;
    }

    pub fn selection(&self, group_id: &str) -> Option<&Selection> {
        self.selections
            .iter()
            .find(|(id, _)| id == group_id)
            .map(|(_, s)| s)
    }

    pub fn is_selected(&self, group_id: &str, value: &str) -> bool {
        match self.selection(group_id) {
            Some(Selection::One(v)) => v == value,
            Some(Selection::Many(values)) => values.iter().any(|v| v == value),
            None => false,
        }
    }

    /// Text for a closed dropdown: the chosen labels, or the group's own name.
    pub fn dropdown_label(&self, group_id: &str) -> String {
        let Some(group) = find_group(group_id) else {
            return match self.selection(group_id) {
                Some(Selection::One(v)) => v.clone(),
                Some(Selection::Many(values)) => values.join(", "),
                None => group_id.to_string(),
            };
        };
        let label_of = |value: &str| {
            group
                .option_by_value(value)
                .map_or(value, |o| o.display_name.as_str())
                .to_string()
        };

        match self.selection(group_id) {
            Some(Selection::One(v)) => label_of(v.as_str()),
            Some(Selection::Many(values)) if !values.is_empty() => values
                .iter()
                .map(|v| label_of(v.as_str()))
                .collect::<Vec<_>>()
                .join(", "),
            _ => group.filter_name.to_string(),
        }
    }

    /// Serialize the current state into the listing URL.
    ///
    /// Groups appear in the order they were first selected. Multi-select
    /// values missing from the catalog are dropped; single-select values
    /// missing from the catalog are sent as-is. `type`, `country` and `sort`
    /// are always present.
    pub fn build_query(&self) -> String {
        let mut params: Vec<(&str, &str)> = vec![("keyword", self.keyword.as_str())];

        for (group_id, selection) in &self.selections {
            let Some(param) = wire_param(group_id) else {
                continue;
            };
            let group = find_group(group_id);

            match selection {
                Selection::Many(values) => {
                    for value in values {
                        if let Some(option) = group.and_then(|g| g.option_by_value(value)) {
                            params.push((param, option.value.as_str()));
                        }
                    }
                }
                Selection::One(value) => {
                    let token = group
                        .and_then(|g| g.option_by_value(value))
                        .map_or(value.as_str(), |o| o.value.as_str());
                    params.push((param, token));
                }
            }
        }

        for (key, default) in REQUIRED_PARAMS {
            if !params.iter().any(|(k, _)| *k == key) {
                params.push((key, default));
            }
        }

        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        format!("/filter?{encoded}")
    }

    /// Snapshot for rendering the panel.
    pub fn view(&self) -> FilterPanelView {
        let groups = catalog()
            .iter()
            .map(|group| GroupView {
                id: group.id,
                filter_name: group.filter_name,
                mode: group.mode,
                label: self.dropdown_label(group.id),
                open: self.open_dropdown.as_deref() == Some(group.id),
                options: group
                    .options
                    .iter()
                    .map(|o| OptionView {
                        display_name: o.display_name.clone(),
                        value: o.value.clone(),
                        checked: self.is_selected(group.id, &o.value),
                    })
                    .collect(),
            })
            .collect();

        FilterPanelView {
            keyword: self.keyword.clone(),
            open_dropdown: self.open_dropdown.clone(),
            groups,
            query: self.build_query(),
        }
    }

    fn entry(&mut self, group_id: &str) -> &mut Selection {
        let pos = match self.selections.iter().position(|(id, _)| id == group_id) {
            Some(pos) => pos,
            None => {
                self.selections
                    .push((group_id.to_string(), Selection::Many(Vec::new())));
                self.selections.len() - 1
            }
        };
        &mut self.selections[pos].1
    }
}

/// Render model for the whole filter panel.
#[derive(Debug, Clone, Serialize)]
pub struct FilterPanelView {
    pub keyword: String,
    pub open_dropdown: Option<String>,
    pub groups: Vec<GroupView>,
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupView {
    pub id: &'static str,
    pub filter_name: &'static str,
    pub mode: SelectionMode,
    pub label: String,
    pub open: bool,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub display_name: String,
    pub value: String,
    pub checked: bool,
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// WASM-exposed filter panel. JS forwards clicks and input events here and
/// renders from [`FilterPanel::view`].
#[wasm_bindgen]
pub struct FilterPanel {
    inner: FilterQueryBuilder,
}

#[wasm_bindgen]
impl FilterPanel {
    /// Create the panel from `location.search`; its `keyword` seeds the title box.
    #[wasm_bindgen(constructor)]
    pub fn new(search: &str) -> FilterPanel {
        FilterPanel {
            inner: FilterQueryBuilder::from_location(search),
        }
    }

    pub fn toggle_dropdown(&mut self, group_id: &str) {
        self.inner.toggle_dropdown(group_id);
    }

    pub fn select(&mut self, group_id: &str, value: &str) {
        self.inner.select(group_id, value);
    }

    pub fn select_by_name(&mut self, group_id: &str, display_name: &str) {
        self.inner.select_by_name(group_id, display_name);
    }

    pub fn set_keyword(&mut self, text: &str) {
        self.inner.set_keyword(text);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// URL to navigate to when the user presses "Filter".
    pub fn build_query(&self) -> String {
        self.inner.build_query()
    }

    /// Panel render model as JSON.
    pub fn view(&self) -> Result<String, JsValue> {
        let json = serde_json::to_string(&self.inner.view()).map_err(UiError::from)?;
        Ok(json)
    }
}
