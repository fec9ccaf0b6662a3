//! Hash domain governance.
//!
//! Every digest in the workspace is taken under a [`HashDomain`]; this file
//! pins the domain set and keeps separator bytes out of other source files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use graft_kernel::proof::hash::HashDomain;

#[test]
fn domain_set_is_pinned() {
    let names: Vec<String> = HashDomain::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(
        names,
        [
            "StateIdentity",
            "ActionLibrary",
            "SearchPolicy",
            "SearchGraph",
            "Plan",
            "BenchGuard",
        ],
        "domain added or reordered; update this list deliberately"
    );
}

#[test]
fn domain_bytes_are_distinct_and_well_formed() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(seen.insert(bytes), "{domain} collides with another domain");
        assert!(bytes.starts_with(b"GRAFT::"), "{domain}: missing GRAFT:: prefix");
        assert!(bytes.ends_with(b"::V1\0"), "{domain}: missing ::V1 and terminator");
        assert_eq!(
            bytes.iter().filter(|b| **b == 0).count(),
            1,
            "{domain}: interior null byte"
        );
    }
}

/// Production code names domains through the enum only. Test modules sit at
/// the end of each file, so scanning stops at the first `#[cfg(test)]`.
#[test]
fn no_separator_literals_outside_hash_domain() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let mut violations = Vec::new();

    for crate_dir in ["kernel", "search", "diff", "benchmarks"] {
        let src = root.join(crate_dir).join("src");
        assert!(src.is_dir(), "missing {}", src.display());
        for file in rust_files(&src) {
            if file.file_name().is_some_and(|n| n == "hash_domain.rs") {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&file) else {
                continue;
            };
            for (i, line) in content.lines().enumerate() {
                let trimmed = line.trim_start();
                if trimmed.starts_with("#[cfg(test)]") {
                    break;
                }
                if !trimmed.starts_with("//") && trimmed.contains("b\"GRAFT::") {
                    violations.push(format!("{}:{}", file.display(), i + 1));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "separator literals outside hash_domain.rs:\n{}",
        violations.join("\n")
    );
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return out;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            out.extend(rust_files(&path));
        } else if path.extension().is_some_and(|e| e == "rs") {
            out.push(path);
        }
    }
    out
}
