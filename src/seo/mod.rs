//! Search-engine metadata: canonical URLs and hreflang alternates.

mod metadata;
mod tags;

pub use metadata::{
    alternate_url, canonical_url, generate_metadata, Alternates, Canonicalizer, MetadataRecord,
    X_DEFAULT,
};
pub use tags::{link_tags, LinkTag};
