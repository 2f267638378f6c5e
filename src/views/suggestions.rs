use std::fmt::Write;

use meetai_models::suggestion::{Suggestion, SuggestionKind};

pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Suggested for You");

    if suggestions.is_empty() {
        let _ = writeln!(out, "  Nothing to suggest right now");
        return out;
    }

    for (number, suggestion) in suggestions.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. [{}] {}",
            number + 1,
            badge(suggestion.kind),
            suggestion.title
        );
        let _ = writeln!(out, "     {}", suggestion.description);
        let _ = writeln!(out, "     → {}", suggestion.action);
    }

    out
}

fn badge(kind: SuggestionKind) -> &'static str {
    match kind {
        SuggestionKind::Netflix => "Netflix",
        SuggestionKind::Spotify => "Spotify",
        SuggestionKind::Local => "Nearby",
    }
}
