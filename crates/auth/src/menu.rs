//! Route/menu tree filtering.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{PermissionCode, PermissionSet, has_permission};

/// A navigable route or menu entry.
///
/// `permission` and `children` are explicit optional fields. A node declares a
/// branch by carrying `Some(children)`, even an empty one; `None` is a leaf.
/// Any other attributes (icon, component, ...) ride along untouched in `meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<PermissionCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuNode>>,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl MenuNode {
    pub fn leaf(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            permission: None,
            children: None,
            meta: Map::new(),
        }
    }

    pub fn branch(path: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            children: Some(children),
            ..Self::leaf(path)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_permission(mut self, code: PermissionCode) -> Self {
        self.permission = Some(code);
        self
    }
}

/// Keep only the nodes `user_codes` may see.
///
/// Children are filtered first. A node whose own permission is not held is
/// dropped with its subtree. A branch without its own permission is dropped
/// once no child survives. Surviving nodes keep their order.
pub fn filter_menu(nodes: &[MenuNode], user_codes: &PermissionSet) -> Vec<MenuNode> {
    nodes
        .iter()
        .filter_map(|node| filter_node(node, user_codes))
        .collect()
}

fn filter_node(node: &MenuNode, user_codes: &PermissionSet) -> Option<MenuNode> {
    if !has_permission(user_codes, node.permission.as_ref()) {
        return None;
    }

    let children = match &node.children {
        None => None,
        Some(children) => {
            let kept = filter_menu(children, user_codes);
            if kept.is_empty() && node.permission.is_none() {
                return None;
            }
            Some(kept)
        }
    };

    Some(MenuNode {
        path: node.path.clone(),
        title: node.title.clone(),
        permission: node.permission.clone(),
        children,
        meta: node.meta.clone(),
    })
}
