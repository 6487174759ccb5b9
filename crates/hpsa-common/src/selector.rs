use serde::{Deserialize, Serialize};
use std::fmt;

/// Accessible role of a UI node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Button,
    Link,
    StaticText,
    TextField,
    Image,
    Window,
    #[serde(untagged)]
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Button => "button",
            Role::Link => "link",
            Role::StaticText => "static_text",
            Role::TextField => "text_field",
            Role::Image => "image",
            Role::Window => "window",
            Role::Other(role) => role,
        }
    }
}

/// How the accessible name of a node is compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "value", rename_all = "snake_case")]
pub enum NameMatch {
    Exact(String),
    Contains(String),
}

/// Structural fingerprint of a UI element: CSS class list, role and
/// accessible name. Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NameMatch>,
}

impl Selector {
    /// Match nodes carrying every class in the space separated `class` list.
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    pub fn with_role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(NameMatch::Exact(name.into()));
        self
    }

    pub fn name_containing(mut self, text: impl Into<String>) -> Self {
        self.name = Some(NameMatch::Contains(text.into()));
        self
    }

    /// A selector with no constraint, or only blank ones, matches everything
    /// and is never what a caller meant.
    pub fn is_empty(&self) -> bool {
        let class_blank = self.class.as_deref().is_none_or(|c| c.trim().is_empty());
        let name_blank = match &self.name {
            None => true,
            Some(NameMatch::Exact(n)) | Some(NameMatch::Contains(n)) => n.is_empty(),
        };
        class_blank && self.role.is_none() && name_blank
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(class) = &self.class {
            parts.push(format!("class={:?}", class));
        }
        if let Some(role) = &self.role {
            parts.push(format!("role={}", role.as_str()));
        }
        match &self.name {
            Some(NameMatch::Exact(name)) => parts.push(format!("name={:?}", name)),
            Some(NameMatch::Contains(text)) => parts.push(format!("name~={:?}", text)),
            None => {}
        }
        if parts.is_empty() {
            write!(f, "<any>")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

/// A symbolic element loaded from a fixture table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    pub name: String,
    pub selector: Selector,
    /// Zero-based index among the selector's matches.
    pub nth: usize,
}

impl ElementDescriptor {
    pub fn new(name: impl Into<String>, selector: Selector, nth: usize) -> Self {
        Self {
            name: name.into(),
            selector,
            nth,
        }
    }

    /// Same element, first match only.
    pub fn first(&self) -> Self {
        Self {
            nth: 0,
            ..self.clone()
        }
    }
}

impl fmt::Display for ElementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} #{}]", self.name, self.selector, self.nth)
    }
}
