/// Lowercase a display name and turn spaces into hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

pub fn province_slug(name: &str) -> String {
    slugify(name)
}

/// Like [`province_slug`], with apostrophes removed as well.
pub fn municipality_slug(name: &str) -> String {
    slugify(name).replace('\'', "")
}
