//! Rendering of the scheduler's `<input>` element.

use std::path::absolute;

use anyhow::Context;
use anyhow::Result;
use path_clean::PathClean;

use crate::config::InputSource;

/// The catalog host queried for catalog inputs.
const CATALOG_HOST: &str = "star.bnl.gov";

/// Renders the `<input>` element for an input source.
///
/// Catalog queries are inserted verbatim. Filelist paths are made absolute
/// against the current directory.
pub fn input_element(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Catalog(query) => Ok(format!(
            r#"<input URL="catalog:{CATALOG_HOST}?{query}" nFiles="all" />"#
        )),
        InputSource::FileList(path) => {
            let path = absolute(path)
                .with_context(|| format!("failed to make `{path}` absolute", path = path.display()))?
                .clean();
            Ok(format!(
                r#"<input URL="filelist:{path}" nFiles="all" />"#,
                path = path.display()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn catalog_query_is_verbatim() {
        let query = "trgsetupname=pp500_production_2017&filetype=daq_reco_picoDst&storage=local";
        let element = input_element(&InputSource::Catalog(query.into())).unwrap();
        assert_eq!(
            element,
            format!(r#"<input URL="catalog:star.bnl.gov?{query}" nFiles="all" />"#)
        );
    }

    #[test]
    fn absolute_filelist() {
        let element = input_element(&InputSource::FileList("/data/list.txt".into())).unwrap();
        assert_eq!(
            element,
            r#"<input URL="filelist:/data/list.txt" nFiles="all" />"#
        );
    }

    #[test]
    fn relative_filelist_is_resolved() {
        let cwd = std::env::current_dir().unwrap();
        let element = input_element(&InputSource::FileList("lists/../list.txt".into())).unwrap();
        assert_eq!(
            element,
            format!(
                r#"<input URL="filelist:{path}" nFiles="all" />"#,
                path = cwd.join("list.txt").display()
            )
        );
    }
}
