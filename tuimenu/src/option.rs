use std::collections::HashSet;

use crate::error::MenuError;

/// One entry in a menu, possibly carrying a nested submenu.
///
/// An option is a leaf iff it has no children. Ownership of the children
/// makes the tree acyclic by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub children: Vec<MenuOption>,
}

impl MenuOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            description: None,
            children: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn child(mut self, child: MenuOption) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = MenuOption>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Check that every id in the tree is non-empty and unique.
pub fn validate_tree(options: &[MenuOption]) -> Result<(), MenuError> {
    let mut seen = HashSet::new();
    validate_level(options, &mut seen)
}

fn validate_level<'a>(
    options: &'a [MenuOption],
    seen: &mut HashSet<&'a str>,
) -> Result<(), MenuError> {
    for option in options {
        if option.id.is_empty() {
            return Err(MenuError::EmptyOptionId {
                label: option.label.clone(),
            });
        }
        if !seen.insert(option.id.as_str()) {
            return Err(MenuError::DuplicateOptionId(option.id.clone()));
        }
        validate_level(&option.children, seen)?;
    }
    Ok(())
}

/// Find an option by id anywhere in the tree (depth-first).
pub fn find_option<'a>(options: &'a [MenuOption], id: &str) -> Option<&'a MenuOption> {
    for option in options {
        if option.id == id {
            return Some(option);
        }
        if let Some(found) = find_option(&option.children, id) {
            return Some(found);
        }
    }
    None
}
