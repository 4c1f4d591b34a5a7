//! The one identifier grammar shared by package names, variant names,
//! compiler names, and architecture tokens: `[A-Za-z0-9_][A-Za-z0-9_.-]*`,
//! with the `.` character reserved for version ids (§4.1).

/// True if `s` matches the base id grammar, not allowing `.`.
///
/// This is what a package/variant/compiler/architecture name must satisfy.
pub fn is_valid_id(s: &str) -> bool {
    is_valid_id_with(s, false)
}

/// True if `s` matches the id grammar used inside a version, which is the
/// only place `.` is a legal id character.
pub fn is_valid_version_id(s: &str) -> bool {
    is_valid_id_with(s, true)
}

fn is_valid_id_with(s: &str, allow_dot: bool) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphanumeric() || first == '_') {
        return false;
    }
    chars.all(|c| {
        c.is_ascii_alphanumeric() || c == '_' || c == '-' || (allow_dot && c == '.')
    })
}

#[cfg(test)]
#[path = "./name_test.rs"]
mod name_test;
