//! Keycodes command: browse the keycode catalogue.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::keycode::KeyCategory;
use crate::keycode_db::{KeycodeCategory, KeycodeDb, KeycodeDefinition};
use clap::Args;
use serde::Serialize;

/// List, filter and search keycodes
#[derive(Debug, Clone, Args)]
pub struct KeycodesArgs {
    /// Only keycodes in this category (e.g., "navigation")
    #[arg(long, value_name = "ID")]
    pub category: Option<String>,

    /// Search code, alias, label and description
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// List categories instead of keycodes
    #[arg(long, conflicts_with_all = ["category", "search"])]
    pub categories: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct KeycodeList<'a> {
    keycodes: Vec<&'a KeycodeDefinition>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct CategoryList {
    categories: Vec<KeycodeCategory>,
}

impl KeycodesArgs {
    /// Execute the keycodes command
    pub fn execute(&self) -> CliResult<()> {
        let keycode_db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;

        if self.categories {
            let categories = keycode_db.categories();
            if self.json {
                print_json(&CategoryList { categories })?;
            } else {
                for category in categories {
                    println!("{:<12} {:<16} {:>3}", category.id, category.name, category.count);
                }
            }
            return Ok(());
        }

        let category = self
            .category
            .as_deref()
            .map(|id| {
                KeyCategory::from_id(id).ok_or_else(|| {
                    let ids: Vec<&str> = KeyCategory::ALL.iter().map(|c| c.id()).collect();
                    CliError::validation(format!(
                        "Unknown category '{id}'. Expected one of: {}",
                        ids.join(", ")
                    ))
                })
            })
            .transpose()?;

        let keycodes = select(&keycode_db, category, self.search.as_deref());

        if self.json {
            print_json(&KeycodeList {
                count: keycodes.len(),
                keycodes,
            })?;
        } else if keycodes.is_empty() {
            println!("No keycodes found");
        } else {
            for keycode in &keycodes {
                println!(
                    "{:<14} {:<6} {}",
                    keycode.code, keycode.label, keycode.description
                );
            }
            println!("\n{} keycodes", keycodes.len());
        }

        Ok(())
    }
}

/// Applies the category filter and search, keeping search ranking.
fn select<'a>(
    keycode_db: &'a KeycodeDb,
    category: Option<KeyCategory>,
    search: Option<&str>,
) -> Vec<&'a KeycodeDefinition> {
    let candidates = match search {
        Some(query) => keycode_db.search(query),
        None => keycode_db.all().iter().collect(),
    };

    candidates
        .into_iter()
        .filter(|k| category.is_none_or(|c| k.category == c.id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::Key;

    #[test]
    fn test_select_all() {
        let db = KeycodeDb::load().unwrap();
        assert_eq!(select(&db, None, None).len(), db.all().len());
    }

    #[test]
    fn test_select_category_and_search() {
        let db = KeycodeDb::load().unwrap();

        let navigation = select(&db, Some(KeyCategory::Navigation), None);
        assert!(navigation.iter().all(|k| k.category == "navigation"));
        assert!(navigation.iter().any(|k| k.key == Key::Home));

        let searched = select(&db, Some(KeyCategory::Navigation), Some("up"));
        assert_eq!(searched[0].key, Key::Up);
        assert!(searched.iter().all(|k| k.category == "navigation"));
    }
}
