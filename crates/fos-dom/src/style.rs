//! Inline Style
//!
//! Parsed `style` attribute declarations. Computed values are resolved by
//! [`DomTree::computed_style`](crate::DomTree::computed_style).

/// Parsed inline style declarations, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parse inline style string into property-value pairs
    pub fn parse(style: &str) -> Self {
        let declarations = style
            .split(';')
            .filter_map(|decl| {
                let decl = decl.trim();
                if decl.is_empty() {
                    return None;
                }

                let mut parts = decl.splitn(2, ':');
                let name = parts.next()?.trim();
                let value = parts.next()?.trim();
                let value = value.strip_suffix("!important").unwrap_or(value).trim();

                if name.is_empty() || value.is_empty() {
                    return None;
                }

                Some((name.to_ascii_lowercase(), value.to_string()))
            })
            .collect();

        Self { declarations }
    }

    /// Get a specific property value (last declaration wins)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Properties that inherit by default
pub fn is_inherited_property(name: &str) -> bool {
    matches!(name,
        "color" |
        "font-size" |
        "font-weight" |
        "font-family" |
        "font-style" |
        "line-height" |
        "visibility" |
        "text-align"
    )
}

/// UA default `display` for elements that never render
pub(crate) fn default_display(local_name: &str) -> Option<&'static str> {
    match local_name {
        "base" | "head" | "link" | "meta" | "script" | "style" | "template" | "title" => {
            Some("none")
        }
        _ => None,
    }
}
