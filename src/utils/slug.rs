//! Slug generation for output file names.
//!
//! Unicode is transliterated with `deunicode` before reduction to
//! `[a-z0-9-]`, so `Über Uns.md` becomes `uber-uns`.

use rustc_hash::FxHashSet;

/// Fallback slug for names that reduce to nothing.
const EMPTY_SLUG: &str = "page";

/// Convert any string to a clean slug.
///
/// - Lowercase alphanumeric characters and hyphens only
/// - No consecutive, leading or trailing hyphens
pub fn slugify(input: &str) -> String {
    let ascii = deunicode::deunicode(input);
    let mut slug = String::with_capacity(ascii.len());
    let mut last_was_hyphen = true; // avoids a leading hyphen

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Slug of a file reference with its extension removed.
///
/// `docs/Getting Started.md` -> `docs-getting-started`
pub fn slugify_reference(reference: &str) -> String {
    let stem = match reference.rfind('.') {
        Some(dot) if dot > 0 && !reference[dot..].contains('/') => &reference[..dot],
        _ => reference,
    };
    slugify(stem)
}

/// Hands out unique slugs, suffixing `-2`, `-3`, ... on collision.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    used: FxHashSet<String>,
}

impl SlugAllocator {
    /// Create an allocator with some names already taken.
    pub fn with_reserved<'a>(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            used: reserved.into_iter().map(str::to_string).collect(),
        }
    }

    /// Allocate a unique slug derived from `base`.
    pub fn allocate(&mut self, base: String) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
