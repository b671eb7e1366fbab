// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use cosmic::{Apply, Element, widget::menu};

use crate::{
    app::{Message, context_page::ContextPage},
    fl,
};

/// Represents a Action that executes after clicking on the application Menu
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuAction {
    /// Open the About [`ContextPage`] of the application
    About,
    /// Open the Settings [`ContextPage`] of the application
    Settings,
}

impl menu::action::MenuAction for MenuAction {
    type Message = Message;

    fn message(&self) -> Self::Message {
        match self {
            MenuAction::About => Message::ToggleContextPage(ContextPage::About),
            MenuAction::Settings => Message::ToggleContextPage(ContextPage::Settings),
        }
    }
}

/// The "View" menu shown at the start of the header bar
pub fn menu_bar<'a>(key_binds: &HashMap<menu::KeyBind, MenuAction>) -> Element<'a, Message> {
    menu::bar(vec![menu::Tree::with_children(
        menu::root(fl!("view")).apply(Element::from),
        menu::items(
            key_binds,
            vec![
                menu::Item::Button(fl!("about"), None, MenuAction::About),
                menu::Item::Button(fl!("settings"), None, MenuAction::Settings),
            ],
        ),
    )])
    .into()
}
