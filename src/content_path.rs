/// Directory-style address in a space's content tree.
///
/// Always ends in `/`: `spaces/{spaceId}/content/v/master/url/` optionally
/// followed by one `{groupSlug}/` segment. Pages under it are addressed
/// without a trailing separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath(String);

impl ContentPath {
    /// Root of the master revision of a space.
    pub fn space_root(space_id: &str) -> Self {
        ContentPath(format!("spaces/{space_id}/content/v/master/url/"))
    }

    /// The nested directory `{self}{slug}/`.
    pub fn child_dir(&self, slug: &str) -> Self {
        ContentPath(format!("{}{}/", self.0, slug))
    }

    /// A single page directly under this directory: `{self}{slug}`.
    pub fn page(&self, slug: &str) -> String {
        format!("{}{}", self.0, slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
