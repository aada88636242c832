//! Markdown rendering of repository categories.

use std::collections::BTreeMap;

use crate::constants::KEY_TITLE;
use crate::contributions::{Category, RepositorySets};
use crate::i18n::Translator;

/// Renders [`RepositorySets`] into a contributions README.
///
/// The output is deterministic: sections appear in a fixed order and bullets
/// are sorted by repository full name.
pub struct ReadmeRenderer<'a> {
    translator: &'a dyn Translator,
}

impl<'a> ReadmeRenderer<'a> {
    pub fn new(translator: &'a dyn Translator) -> Self {
        Self { translator }
    }

    /// Render the document for `username`.
    ///
    /// `comments` maps repository full names to annotations appended to the
    /// matching bullet.
    pub fn render(&self, username: &str, sets: &RepositorySets, comments: &BTreeMap<String, String>) -> String {
        let mut lines = vec![format!("# {} : {username}\n", self.translator.get_text(KEY_TITLE))];

        for (category, _) in sets.iter() {
            let section = self.render_section(category, sets, comments);
            if section.is_empty() {
                continue;
            }
            if category != Category::CommitOnly {
                lines.push(String::new());
            }
            lines.extend(section);
        }

        lines.join("\n")
    }

    fn render_section(
        &self,
        category: Category,
        sets: &RepositorySets,
        comments: &BTreeMap<String, String>,
    ) -> Vec<String> {
        let repos = sets.get(category);
        if repos.is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::with_capacity(repos.len() + 1);
        lines.push(format!("## {}\n", self.translator.get_text(category.translation_key())));

        for repo in repos {
            let mut line = format!("- [{}]({})", repo.full_name, repo.url);
            if let Some(comment) = comments.get(&repo.full_name) {
                line.push_str(" — ");
                line.push_str(comment);
            }
            lines.push(line);
        }

        lines
    }
}
