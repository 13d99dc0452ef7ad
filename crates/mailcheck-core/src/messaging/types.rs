/// Inline keyboard (buttons) attached to the menu message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub buttons: Vec<InlineButton>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineKeyboard {
    /// Convenience for "one button per row" layouts from `(label, data)` pairs.
    pub fn one_per_row<'a>(options: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let buttons = options
            .into_iter()
            .map(|(label, data)| InlineButton {
                label: label.to_string(),
                callback_data: data.to_string(),
            })
            .collect();
        Self { buttons }
    }
}
