/// Metadata for a stored document, as reported by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Server-assigned document identifier.
    pub id: String,
    pub title: String,
    /// Number of rendered pages.
    pub page_count: u32,
    /// Size of the rendered document in bytes.
    pub byte_size: u64,
}

/// Metadata for an uploaded asset, as reported by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetInfo {
    /// Server-assigned asset identifier.
    pub id: String,
    /// Name supplied at upload time.
    pub name: String,
    /// Size of the stored payload in bytes.
    pub byte_size: u64,
}
