//! Markdown rendering of the documentation tabs.

use super::{ApiDocs, DocItem, DocTab, DocTabKind};

/// Generate Markdown documentation for an element.
///
/// Hidden tabs are skipped. An undocumented element renders its warning
/// instead of any section.
pub fn generate_api_markdown(docs: &ApiDocs) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# `<");
    md.push_str(&docs.name);
    md.push_str(">`\n\n");

    if let Some(desc) = &docs.description {
        md.push_str(desc);
        md.push_str("\n\n");
    }

    if let Some(warning) = docs.warning() {
        md.push_str("> ");
        md.push_str(&warning);
        md.push('\n');
        return md;
    }

    for tab in docs.visible_tabs() {
        md.push_str("## ");
        md.push_str(tab.heading());
        md.push_str("\n\n");
        md.push_str(&generate_tab(tab));
        md.push('\n');
    }

    md
}

fn generate_tab(tab: &DocTab) -> String {
    let mut md = String::with_capacity(512);

    match tab.kind {
        DocTabKind::Properties => {
            md.push_str("| Name | Type | Attribute | Default | Description |\n");
            md.push_str("|------|------|-----------|---------|-------------|\n");
            for item in &tab.items {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    code(&item.name),
                    optional_code(item.value_type.as_deref()),
                    optional_code(item.attribute.as_deref()),
                    optional_code(item.default.as_deref()),
                    escape_cell(item.description.as_deref().unwrap_or("")),
                ));
            }
        }
        DocTabKind::Attributes => {
            md.push_str("| Name | Type | Description |\n");
            md.push_str("|------|------|-------------|\n");
            for item in &tab.items {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    code(&item.name),
                    optional_code(item.value_type.as_deref()),
                    escape_cell(item.description.as_deref().unwrap_or("")),
                ));
            }
        }
        _ => {
            for item in &tab.items {
                md.push_str(&list_item(tab.kind, item));
            }
        }
    }

    md
}

fn list_item(kind: DocTabKind, item: &DocItem) -> String {
    let name = if kind == DocTabKind::Slots && item.name.is_empty() {
        "*default*".to_string()
    } else {
        code(&item.name)
    };

    match &item.description {
        Some(desc) => format!("- {} - {}\n", name, desc),
        None => format!("- {}\n", name),
    }
}

#[inline]
fn code(s: &str) -> String {
    format!("`{}`", escape_cell(s))
}

#[inline]
fn optional_code(s: Option<&str>) -> String {
    s.map(code).unwrap_or_default()
}

/// Escape pipes so union types do not split table cells.
#[inline]
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
