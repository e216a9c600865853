/// Compare two names for identifier equivalence.
///
/// Every name comparison in the decode engine (document-node lookup,
/// record-field matching, enumeration constant matching) goes through this
/// relation. It is case-insensitive and indifferent to dash/underscore
/// distinctions: `license-file`, `license_file`, and `licenseFile` are all
/// equivalent.
///
/// The exact rule: `-` and `_` are skipped wherever they occur, and the
/// remaining characters are compared under ASCII case folding. Non-ASCII
/// characters compare verbatim.
///
/// # Example
/// ```rust
/// # use doctree::*;
/// assert!(eq_ident("license-file", "licenseFile"));
/// assert!(eq_ident("license_file", "LICENSE-FILE"));
/// assert!(!eq_ident("license", "licensee"));
/// ```
pub fn eq_ident(a: &str, b: &str) -> bool {
    fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
        s.chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
    }

    folded(a).eq(folded(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_folding() {
        assert!(eq_ident("name", "NAME"));
        assert!(eq_ident("licenseFile", "licensefile"));
        assert!(!eq_ident("name", "mane"));
    }

    #[test]
    fn separator_folding() {
        assert!(eq_ident("license-file", "license_file"));
        assert!(eq_ident("license-file", "licenseFile"));
        assert!(eq_ident("a-b-c", "abc"));
    }

    // the edges of the rule, pinned deliberately
    #[test]
    fn separator_runs_collapse() {
        assert!(eq_ident("a--b", "a_b"));
        assert!(eq_ident("-a-", "a"));
        assert!(eq_ident("--", ""));
    }

    #[test]
    fn non_ascii_compares_verbatim() {
        assert!(eq_ident("naïve", "naïve"));
        // no Unicode case folding
        assert!(!eq_ident("naïve", "naÏve"));
    }

    #[test]
    fn prefixes_do_not_match() {
        assert!(!eq_ident("license", "license-file"));
        assert!(!eq_ident("license-file-x", "license-file"));
    }
}
