use crate::config::Layout;

use super::input::{parse_in_range, InputError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a menu entry does. View-then-save is its own action instead of two
/// entries that happen to run back to back.
pub enum MenuAction {
    CreateClass,
    ViewDetails,
    ViewThenSave,
    Save,
    Load,
    Cost,
    Quit,
}

const FULL_MENU: &[MenuAction] = &[
    MenuAction::CreateClass,
    MenuAction::ViewDetails,
    MenuAction::ViewThenSave,
    MenuAction::Save,
    MenuAction::Load,
    MenuAction::Cost,
    MenuAction::Quit,
];

const CLASSIC_MENU: &[MenuAction] = &[
    MenuAction::CreateClass,
    MenuAction::ViewThenSave,
    MenuAction::Save,
    MenuAction::Load,
    MenuAction::Cost,
    MenuAction::Quit,
];

/// Entries in the order they are numbered, starting at 1.
pub fn actions(layout: Layout) -> &'static [MenuAction] {
    match layout {
        Layout::Classic => CLASSIC_MENU,
        Layout::Full => FULL_MENU,
    }
}

impl MenuAction {
    pub fn label(self, layout: Layout) -> &'static str {
        match (self, layout) {
            (MenuAction::CreateClass, Layout::Classic) => "Add Students",
            (MenuAction::CreateClass, Layout::Full) => "Create Class",
            (MenuAction::ViewDetails, _) => "View Class Details",
            (MenuAction::ViewThenSave, Layout::Classic) => "View Class",
            (MenuAction::ViewThenSave, Layout::Full) => "View Student List",
            (MenuAction::Save, _) => "Save Class as File",
            (MenuAction::Load, _) => "Load Class File",
            (MenuAction::Cost, _) => "Cost of Class",
            (MenuAction::Quit, _) => "Quit",
        }
    }
}

pub fn render(layout: Layout) -> String {
    let mut text = String::from("Welcome to the class management system!\n");
    for (idx, action) in actions(layout).iter().enumerate() {
        text.push_str(&format!("\t{}) {}\n", idx + 1, action.label(layout)));
    }
    text
}

/// Map one line of input to a menu entry.
pub fn parse_choice(layout: Layout, raw: &str) -> Result<MenuAction, InputError> {
    let entries = actions(layout);
    let choice = parse_in_range(raw, 1, entries.len() as i64)?;
    Ok(entries[(choice - 1) as usize])
}
