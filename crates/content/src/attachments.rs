//! Attachment markup.

use enigmatick_federation::{ApAttachment, AttachmentKind};

use crate::markup::html_escape;

fn size_attrs(attachment: &ApAttachment) -> String {
    let mut attrs = String::new();
    if let Some(width) = attachment.width {
        attrs.push_str(&format!(" width=\"{width}\""));
    }
    if let Some(height) = attachment.height {
        attrs.push_str(&format!(" height=\"{height}\""));
    }
    attrs
}

fn render_one(attachment: &ApAttachment) -> Option<String> {
    if attachment.kind != AttachmentKind::Document {
        return None;
    }
    let media_type = attachment.media_type.as_deref()?;
    let url = html_escape(attachment.url.as_deref()?);

    let (major, minor) = media_type.split_once('/')?;
    if minor.is_empty() {
        return None;
    }

    match major {
        "image" => Some(format!(
            "<div><img src=\"{url}\"{}/></div>",
            size_attrs(attachment)
        )),
        "video" => Some(format!(
            "<div><video{} controls><source src=\"{url}\" type=\"{}\"></video></div>",
            size_attrs(attachment),
            html_escape(media_type)
        )),
        _ => None,
    }
}

/// Markup for image and video `Document` attachments, in order.
///
/// Other attachments are skipped.
#[must_use]
pub fn render_attachments(attachments: &[ApAttachment]) -> String {
    attachments.iter().filter_map(render_one).collect()
}
