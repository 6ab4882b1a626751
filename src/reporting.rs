use crate::trie::{TokenNode, TokenTrie};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Logs the token counts as a tree, directories first summed.
pub fn print_stats(token_counts: &HashMap<PathBuf, usize>) {
    debug!("Printing token statistics for {} files", token_counts.len());
    let mut trie = TokenTrie::new();
    for (path, &count) in token_counts {
        trie.insert(path, count);
    }

    info!("Overall ({} tokens)", trie.root().total_tokens());
    for line in tree_lines(trie.root(), "") {
        info!("{}", line);
    }
}

fn tree_lines(node: &TokenNode, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "┗━━" } else { "┣━━" };
        if let Some(tokens) = child.token_count {
            lines.push(format!(
                "{}{} {} {} ({} tokens)",
                prefix,
                connector,
                file_icon(Path::new(name)),
                name,
                tokens
            ));
        } else {
            lines.push(format!(
                "{}{}📂 {} ({} tokens)",
                prefix,
                connector,
                name,
                child.total_tokens()
            ));
            let child_prefix = format!("{}{}    ", prefix, if is_last { " " } else { "┃" });
            lines.extend(tree_lines(child, &child_prefix));
        }
    }
    lines
}

pub fn file_icon(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("js") => "🟨",
        Some("ts") => "🔷",
        Some("css") | Some("scss") => "🎨",
        Some("astro") => "🚀",
        Some("svelte") => "🧡",
        Some("json") => "🔖",
        Some("md") => "📝",
        Some("lock") | Some("yaml") => "🔒",
        _ => "📄",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_lines_layout() {
        let mut trie = TokenTrie::new();
        trie.insert(Path::new("src/app.ts"), 7);
        trie.insert(Path::new("src/style.css"), 3);
        trie.insert(Path::new("main.js"), 1);

        let lines = tree_lines(trie.root(), "");
        assert_eq!(
            lines,
            vec![
                "┣━━ 🟨 main.js (1 tokens)".to_string(),
                "┗━━📂 src (10 tokens)".to_string(),
                "     ┣━━ 🔷 app.ts (7 tokens)".to_string(),
                "     ┗━━ 🎨 style.css (3 tokens)".to_string(),
            ]
        );
    }

    #[test]
    fn test_file_icon_fallback() {
        assert_eq!(file_icon(Path::new("LICENSE")), "📄");
        assert_eq!(file_icon(Path::new("Page.ASTRO")), "🚀");
    }
}
