use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    ZhHk,
}

/// Per-locale strings: the `Accept-Language` value sent to the API and the
/// label shown while the rider collects another customer's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleStrings {
    pub language: &'static str,
    pub multi_order_label: &'static str,
}

const LOCALE_TABLE: [(Locale, LocaleStrings); 2] = [
    (
        Locale::En,
        LocaleStrings {
            language: "en",
            multi_order_label: "Picking up another order",
        },
    ),
    (
        Locale::ZhHk,
        LocaleStrings {
            language: "zh-HK",
            multi_order_label: "正在提取另一張訂單",
        },
    ),
];

impl Locale {
    pub fn strings(&self) -> LocaleStrings {
        LOCALE_TABLE
            .iter()
            .find(|(locale, _)| locale == self)
            .map(|(_, strings)| *strings)
            .unwrap_or(LOCALE_TABLE[0].1)
    }

    pub fn language(&self) -> &'static str {
        self.strings().language
    }

    pub fn multi_order_label(&self) -> &'static str {
        self.strings().multi_order_label
    }
}
