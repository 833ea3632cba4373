use crate::history::{HistoryStore, HISTORY_DISPLAY_LIMIT};
use crate::renderer::MarkdownRenderer;

pub const EMPTY_HISTORY: &str = "No prompts yet. Submit a prompt to see history.";

/// Boxed heading line, e.g. `┌─ Refined Output ───…┐`.
pub fn title_bar(title: &str, width: usize) -> String {
    let used = title.chars().count() + 5;
    format!("┌─ {} {}┐", title, "─".repeat(width.saturating_sub(used)))
}

pub fn bottom_bar(width: usize) -> String {
    format!("└{}┘", "─".repeat(width.saturating_sub(2)))
}

/// The result block shown after a successful submission.
pub fn render_result(renderer: &MarkdownRenderer, text: &str, title: &str) -> String {
    let width = renderer.width();
    format!(
        "{}\n\n{}\n\n{}",
        title_bar(title, width),
        renderer.render(text),
        bottom_bar(width)
    )
}

/// The history panel: at most ten entries, newest first.
pub fn render_history(renderer: &MarkdownRenderer, history: &HistoryStore) -> String {
    let width = renderer.width();
    let mut out = title_bar("Prompt History", width);
    out.push_str("\n\n");

    if history.is_empty() {
        out.push_str("  ");
        out.push_str(EMPTY_HISTORY);
        out.push_str("\n\n");
    }

    for (number, entry) in history.recent(HISTORY_DISPLAY_LIMIT) {
        out.push_str(&format!("  Prompt #{}\n", number));
        out.push_str(&format!("  Role: {}\n", entry.role));
        out.push_str(&format!("  Task: {}\n", entry.task.trim()));
        out.push_str("  Response:\n");
        out.push_str(&renderer.render(&entry.output));
        out.push_str("\n\n");
    }

    out.push_str(&bottom_bar(width));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryEntry;

    fn store_with(count: usize) -> HistoryStore {
        let mut store = HistoryStore::new();
        for n in 1..=count {
            store.append(HistoryEntry {
                role: format!("Role{}", n),
                task: format!("Task{}", n),
                output: format!("Output{}", n),
            });
        }
        store
    }

    #[test]
    fn empty_history_shows_hint() {
        let renderer = MarkdownRenderer::plain(60);
        let panel = render_history(&renderer, &HistoryStore::new());
        assert!(panel.contains(EMPTY_HISTORY));
        assert!(!panel.contains("Prompt #"));
    }

    #[test]
    fn shows_last_ten_newest_first() {
        let renderer = MarkdownRenderer::plain(60);
        let panel = render_history(&renderer, &store_with(12));

        assert_eq!(panel.matches("Prompt #").count(), 10);
        assert!(!panel.contains("Prompt #2\n"));
        assert!(!panel.contains("Role2\n"));

        let newest = panel.find("Prompt #12\n").unwrap();
        let oldest_shown = panel.find("Prompt #3\n").unwrap();
        assert!(newest < oldest_shown);
        assert!(panel.contains("Role: Role12"));
        assert!(panel.contains("Task: Task12"));
        assert!(panel.contains("Output12"));
    }

    #[test]
    fn result_block_wraps_rendered_text() {
        let renderer = MarkdownRenderer::plain(40);
        let block = render_result(&renderer, "Hello", "Refined Output");
        assert!(block.starts_with("┌─ Refined Output "));
        assert!(block.contains("  Hello"));
        assert!(block.ends_with('┘'));
        assert_eq!(block.lines().next().unwrap().chars().count(), 40);
    }
}
