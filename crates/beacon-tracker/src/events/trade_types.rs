//! Trade types picker payloads.
//!
//! The picker reports a different field set per `action`, and
//! `choose_trade_type` further depends on which subform the choice came
//! from. Both discriminators are modelled as internally tagged enums so the
//! wire shape stays flat.

use serde::{Deserialize, Serialize};

/// Payload for `ce_trade_types_form`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TradeTypesForm {
    /// Picker opened.
    Open(TradeTypesFormView),
    /// Picker closed.
    Close(TradeTypesFormView),
    /// Info panel closed.
    InfoClose(TradeTypesFormView),
    /// A trade type was picked.
    ChooseTradeType(ChooseTradeType),
    /// User searched the list.
    Search {
        /// Search text.
        search_string: String,
    },
    /// Info panel opened for a trade type.
    InfoOpen {
        /// Tab the panel was opened from.
        tab_name: String,
        /// Trade type shown.
        trade_type_name: String,
    },
    /// Info panel switched between description and glossary.
    #[serde(rename = "info-switcher")]
    InfoSwitcher {
        /// Mode switched to.
        info_switcher_mode: String,
        /// Trade type shown.
        trade_type_name: String,
    },
}

impl TradeTypesForm {
    /// `open` with no extra fields.
    pub fn open() -> Self {
        Self::Open(TradeTypesFormView::default())
    }

    /// `close` with no extra fields.
    pub fn close() -> Self {
        Self::Close(TradeTypesFormView::default())
    }

    /// `search` for `query`.
    pub fn search(query: impl Into<String>) -> Self {
        Self::Search {
            search_string: query.into(),
        }
    }
}

/// Optional context shared by `open`, `close` and `info_close`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeTypesFormView {
    /// Trade type in focus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_type_name: Option<String>,
    /// Active tab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_name: Option<String>,
    /// Where the picker was opened from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_source: Option<String>,
    /// Form identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
    /// Subform identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subform_name: Option<String>,
}

/// Where a trade type was chosen, keyed by `subform_name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "subform_name", rename_all = "snake_case")]
pub enum ChooseTradeType {
    /// Chosen from the legacy info panel.
    InfoOld {
        /// Form identifier.
        form_name: String,
        /// Trade type chosen.
        trade_type_name: String,
    },
    /// Chosen from the new info panel.
    InfoNew {
        /// Form identifier.
        form_name: String,
        /// Trade type chosen.
        trade_type_name: String,
    },
    /// Chosen from the trade type list.
    TradeType {
        /// Tab the list was showing.
        tab_name: String,
        /// Form identifier.
        form_name: String,
        /// Trade type chosen.
        trade_type_name: String,
    },
}
