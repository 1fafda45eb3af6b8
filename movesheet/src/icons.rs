//! Icon file names for move types and damage categories.

pub const TYPES_DIR: &str = "types";
pub const CATEGORIES_DIR: &str = "categories";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryIcon {
    Physical,
    Special,
    Status,
}

impl CategoryIcon {
    /// Anything that is not physical or special is drawn as status.
    pub fn from_category(category: &str) -> Self {
        match category.trim().to_lowercase().as_str() {
            "physical" => CategoryIcon::Physical,
            "special" => CategoryIcon::Special,
            _ => CategoryIcon::Status,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            CategoryIcon::Physical => "physical.png",
            CategoryIcon::Special => "special.png",
            CategoryIcon::Status => "status.png",
        }
    }
}

pub fn type_icon(kind: &str) -> String {
    format!("{}.png", kind.trim().to_lowercase())
}

pub fn category_icon(category: &str) -> &'static str {
    CategoryIcon::from_category(category).file_name()
}

/// `images_base` may be a directory or a URL prefix.
pub fn type_icon_path(images_base: &str, kind: &str) -> String {
    format!(
        "{}/{TYPES_DIR}/{}",
        images_base.trim_end_matches('/'),
        type_icon(kind)
    )
}

pub fn category_icon_path(images_base: &str, category: &str) -> String {
    format!(
        "{}/{CATEGORIES_DIR}/{}",
        images_base.trim_end_matches('/'),
        category_icon(category)
    )
}
