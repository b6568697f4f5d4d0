/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// MEDIA COLLECTIONS
// =============================================================================

/// Collection for field-officer files answering a schema field
pub const COLLECTION_SUBMISSION_ATTACHMENTS: &str = "submission_attachments";

/// Collection for coordinator-provided report templates
pub const COLLECTION_TEMPLATES: &str = "templates";

/// Collection for coordinator-provided reference material
pub const COLLECTION_REFERENCES: &str = "references";
