//! Title classification for the IT-specialist views.

/// Highlight color for IT-specialist titles
pub const IT_COLOR: &str = "#A34131";
/// Color for every other title
pub const OTHER_COLOR: &str = "#4FB477";

/// Whether a title names an IT specialist or IT program manager role
#[must_use]
pub fn is_it_title(title: &str) -> bool {
    let title = title.to_uppercase();
    let mentions_it = || title.contains("IT") || title.contains("INFORMATION TECHNOLOGY");

    (title.contains("SPECIALIST") && mentions_it())
        || (title.contains("PROGRAM MANAGER") && mentions_it())
        || title.contains("ITSPEC")
}

#[must_use]
pub fn title_color(title: &str) -> &'static str {
    if is_it_title(title) { IT_COLOR } else { OTHER_COLOR }
}
