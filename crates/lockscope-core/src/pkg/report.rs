//! Combine identifiers and sizes into the printed result.
//!
//! Stages run in a fixed order, each taking and returning plain values:
//! duplicate filter, size join, size sort, reverse.

use super::duplicates::find_duplicates;
use super::ident::PackageId;
use super::lockfile::LockDocument;
use super::size::SizeToken;
use super::store::SizeMap;
use crate::error::Result;
use serde::Serialize;
use std::fmt::Write;

/// Which optional stages to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Keep only packages installed in more than one version.
    pub duplicates_only: bool,
    /// Order by size (unit first, then magnitude) instead of by identifier.
    pub sort_by_size: bool,
    /// Reverse the final order.
    pub reverse: bool,
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRow {
    pub id: PackageId,
    /// Size token from the store report; `None` when the package has no store entry.
    pub size: Option<String>,
}

/// Ordered analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub packages: Vec<AnalysisRow>,
    #[serde(skip)]
    with_sizes: bool,
}

impl Analysis {
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Whether size data was joined in.
    #[must_use]
    pub fn with_sizes(&self) -> bool {
        self.with_sizes
    }

    /// Render one line per row: the bare identifier, or `size<TAB>identifier`
    /// when sizes were joined (missing sizes leave the first field empty).
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for row in &self.packages {
            if self.with_sizes {
                let _ = writeln!(out, "{}\t{}", row.size.as_deref().unwrap_or(""), row.id);
            } else {
                let _ = writeln!(out, "{}", row.id);
            }
        }
        out
    }
}

/// Run the analysis pipeline over a parsed lock document.
///
/// # Errors
/// Returns `Error::SizeParse` when sorting by size and a joined size token is
/// malformed. Nothing is partially ordered in that case.
pub fn analyze(
    doc: &LockDocument,
    sizes: Option<&SizeMap>,
    options: &AnalyzeOptions,
) -> Result<Analysis> {
    let selected = if options.duplicates_only {
        find_duplicates(&doc.packages)
    } else {
        doc.packages.clone()
    };

    let mut rows: Vec<AnalysisRow> = selected
        .into_iter()
        .map(|id| {
            let size = sizes.and_then(|m| m.get(&id)).map(str::to_string);
            AnalysisRow { id, size }
        })
        .collect();

    if options.sort_by_size {
        rows = sort_by_size(rows)?;
    }

    if options.reverse {
        rows.reverse();
    }

    Ok(Analysis {
        packages: rows,
        with_sizes: sizes.is_some(),
    })
}

/// Stable sort, so equal sizes keep identifier order.
fn sort_by_size(rows: Vec<AnalysisRow>) -> Result<Vec<AnalysisRow>> {
    let mut keyed = rows
        .into_iter()
        .map(|row| {
            let token = row.size.as_deref().map(SizeToken::parse).transpose()?;
            Ok((token, row))
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|a, b| SizeToken::compare_opt(a.0.as_ref(), b.0.as_ref()));

    Ok(keyed.into_iter().map(|(_, row)| row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;
    use crate::pkg::ident::SortedPackages;

    fn doc(ids: &[&str]) -> LockDocument {
        LockDocument {
            lockfile_version: None,
            packages: ids.iter().copied().map(PackageId::from).collect::<SortedPackages>(),
        }
    }

    fn sizes(pairs: &[(&str, &str)]) -> SizeMap {
        pairs
            .iter()
            .map(|(id, size)| (PackageId::from(*id), (*size).to_string()))
            .collect()
    }

    fn ids(analysis: &Analysis) -> Vec<&str> {
        analysis.packages.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_plain_listing() {
        let analysis = analyze(&doc(&["b@1.0.0", "a@1.0.0"]), None, &AnalyzeOptions::default())
            .unwrap();

        assert_eq!(ids(&analysis), vec!["a@1.0.0", "b@1.0.0"]);
        assert!(!analysis.with_sizes());
        assert_eq!(analysis.render_text(), "a@1.0.0\nb@1.0.0\n");
    }

    #[test]
    fn test_duplicates_only() {
        let options = AnalyzeOptions {
            duplicates_only: true,
            ..Default::default()
        };
        let analysis = analyze(
            &doc(&["foo@1.0.0", "bar@1.0.0", "foo@2.0.0"]),
            None,
            &options,
        )
        .unwrap();

        assert_eq!(ids(&analysis), vec!["foo@1.0.0", "foo@2.0.0"]);
    }

    #[test]
    fn test_size_join_renders_tab_separated() {
        let sizes = sizes(&[("a@1.0.0", "4.0K")]);
        let analysis = analyze(
            &doc(&["a@1.0.0", "b@1.0.0"]),
            Some(&sizes),
            &AnalyzeOptions::default(),
        )
        .unwrap();

        assert!(analysis.with_sizes());
        assert_eq!(analysis.render_text(), "4.0K\ta@1.0.0\n\tb@1.0.0\n");
    }

    #[test]
    fn test_peer_qualified_lock_keys_get_store_sizes() {
        let lock = "\
lockfileVersion: '6.0'
packages:
  /@mui/base@5.0.0(react@18.2.0):
    resolution: {integrity: sha512-aaa}
  /react@18.2.0:
    resolution: {integrity: sha512-bbb}
";
        let report = "\
4.0M\tnode_modules/.pnpm/@mui+base@5.0.0_react@18.2.0
120K\tnode_modules/.pnpm/react@18.2.0
";
        let lock_doc = LockDocument::parse(
            lock,
            std::path::Path::new("pnpm-lock.yaml"),
            &crate::pkg::ParseOptions::default(),
        )
        .unwrap();
        let sizes = SizeMap::from_report(report, std::path::Path::new("node_modules/.pnpm"));

        let analysis = analyze(&lock_doc, Some(&sizes), &AnalyzeOptions::default()).unwrap();

        assert_eq!(
            analysis.render_text(),
            "4.0M\t@mui/base@5.0.0(react@18.2.0)\n120K\treact@18.2.0\n"
        );
    }

    #[test]
    fn test_sort_by_size_and_reverse() {
        let sizes = sizes(&[
            ("a@1.0.0", "1G"),
            ("b@1.0.0", "512B"),
            ("c@1.0.0", "1M"),
            ("d@1.0.0", "2K"),
        ]);
        let package_doc = doc(&["a@1.0.0", "b@1.0.0", "c@1.0.0", "d@1.0.0", "e@1.0.0"]);

        let options = AnalyzeOptions {
            sort_by_size: true,
            ..Default::default()
        };
        let analysis = analyze(&package_doc, Some(&sizes), &options).unwrap();
        assert_eq!(
            ids(&analysis),
            vec!["e@1.0.0", "b@1.0.0", "d@1.0.0", "c@1.0.0", "a@1.0.0"]
        );

        let options = AnalyzeOptions {
            sort_by_size: true,
            reverse: true,
            ..Default::default()
        };
        let analysis = analyze(&package_doc, Some(&sizes), &options).unwrap();
        assert_eq!(
            ids(&analysis),
            vec!["a@1.0.0", "c@1.0.0", "d@1.0.0", "b@1.0.0", "e@1.0.0"]
        );
    }

    #[test]
    fn test_sort_by_size_is_stable_for_ties() {
        let sizes = sizes(&[("a@1.0.0", "4.0K"), ("b@1.0.0", "4.0K"), ("c@1.0.0", "4K")]);
        let options = AnalyzeOptions {
            sort_by_size: true,
            ..Default::default()
        };
        let analysis =
            analyze(&doc(&["c@1.0.0", "b@1.0.0", "a@1.0.0"]), Some(&sizes), &options).unwrap();
        assert_eq!(ids(&analysis), vec!["a@1.0.0", "b@1.0.0", "c@1.0.0"]);
    }

    #[test]
    fn test_sort_by_size_without_sizes_keeps_order() {
        let options = AnalyzeOptions {
            sort_by_size: true,
            ..Default::default()
        };
        let analysis = analyze(&doc(&["b@1.0.0", "a@1.0.0"]), None, &options).unwrap();
        assert_eq!(ids(&analysis), vec!["a@1.0.0", "b@1.0.0"]);
    }

    #[test]
    fn test_malformed_size_aborts_sort() {
        let sizes = sizes(&[("a@1.0.0", "4.0K"), ("b@1.0.0", "3.5T")]);
        let options = AnalyzeOptions {
            sort_by_size: true,
            ..Default::default()
        };
        let err = analyze(&doc(&["a@1.0.0", "b@1.0.0"]), Some(&sizes), &options).unwrap_err();
        assert_eq!(err.code(), codes::SIZE_TOKEN_INVALID);
    }

    #[test]
    fn test_malformed_size_is_fine_without_sort() {
        let sizes = sizes(&[("a@1.0.0", "3.5T")]);
        let analysis =
            analyze(&doc(&["a@1.0.0"]), Some(&sizes), &AnalyzeOptions::default()).unwrap();
        assert_eq!(analysis.render_text(), "3.5T\ta@1.0.0\n");
    }

    #[test]
    fn test_empty_document() {
        let analysis = analyze(&doc(&[]), None, &AnalyzeOptions::default()).unwrap();
        assert!(analysis.is_empty());
        assert_eq!(analysis.render_text(), "");
    }

    #[test]
    fn test_json_shape() {
        let sizes = sizes(&[("a@1.0.0", "4.0K")]);
        let analysis = analyze(
            &doc(&["a@1.0.0", "b@1.0.0"]),
            Some(&sizes),
            &AnalyzeOptions::default(),
        )
        .unwrap();

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "packages": [
                    {"id": "a@1.0.0", "size": "4.0K"},
                    {"id": "b@1.0.0", "size": null}
                ]
            })
        );
    }
}
