//! Text and JSON output of rendered threads.

use clap::ValueEnum;
use enigmatick_common::AppResult;
use enigmatick_core::RenderedNote;

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Indented conversation tree
    #[default]
    Text,
    /// Pretty-printed render projection
    Json,
}

/// Format rendered top-level notes and their replies.
pub fn format_thread(notes: &[RenderedNote], format: Format) -> AppResult<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(notes)?),
        Format::Text => {
            let mut out = String::new();
            for note in notes {
                write_note(&mut out, note, 0);
            }
            Ok(out)
        }
    }
}

fn write_note(out: &mut String, note: &RenderedNote, depth: usize) {
    let indent = "  ".repeat(depth);

    if let Some(boost) = &note.boost {
        out.push_str(&format!("{indent}boosted by {}", boost.name));
        if !boost.others.is_empty() {
            out.push_str(&format!(" {}", boost.others));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{indent}{} [{}] {}",
        note.author.handle, note.kind, note.age
    ));
    if !note.public {
        out.push_str(" (direct)");
    }
    out.push('\n');

    if let Some(title) = &note.title {
        out.push_str(&format!("{indent}# {title}\n"));
    }
    if let Some(summary) = note.summary.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("{indent}CW: {summary}\n"));
    }
    out.push_str(&format!("{indent}{}\n", note.preview.trim()));
    if let Some(link) = &note.link_title {
        out.push_str(&format!("{indent}-> {link}\n"));
    }
    if note.reply_count > 0 {
        out.push_str(&format!("{indent}{} replies\n", note.reply_count));
    }

    for reply in &note.replies {
        write_note(out, reply, depth + 1);
    }
}
