use crate::{DocumentError, Version};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

static HEADER_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("thead tr").expect("static selector"));
static BODY_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody tr").expect("static selector"));
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("static selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("static selector"));

/// The cell text meaning "not available in this version".
const UNSUPPORTED: &str = "-";

/// The version table of a page, reduced to the supported versions of each row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionMatrix {
    pub versions: Vec<Version>,
    pub support: Vec<Vec<Version>>,
}

impl VersionMatrix {
    /// Reads the `versions` table. The last header row labels the columns, and the first
    /// column of every row is the entity name.
    pub fn parse(table: ElementRef) -> Result<Self, DocumentError> {
        let versions = table
            .select(&HEADER_ROW)
            .last()
            .ok_or(DocumentError::MissingRegion("versions header"))?
            .select(&TH)
            .skip(1)
            .map(|th| parse_version(&th.text().collect::<String>()))
            .collect::<Result<Vec<_>, _>>()?;

        let support = table
            .select(&BODY_ROW)
            .map(|tr| {
                let cells: Vec<String> = tr
                    .select(&TD)
                    .skip(1)
                    .map(|td| td.text().collect())
                    .collect();
                supported_versions(&versions, &cells)
            })
            .collect();

        Ok(Self { versions, support })
    }

    /// The versions for the `index`th declaration of a page.
    ///
    /// Pages sometimes list more overloads than the table has rows. Every declaration past
    /// the end of the table shares the last row.
    pub fn for_declaration(&self, index: usize) -> Result<&[Version], DocumentError> {
        support_row(index, self.support.len())
            .map(|row| self.support[row].as_slice())
            .ok_or(DocumentError::EmptyVersionTable)
    }
}

/// Clamps a declaration index onto the rows of a support table. `None` when there are no rows.
pub fn support_row(index: usize, rows: usize) -> Option<usize> {
    rows.checked_sub(1).map(|last| index.min(last))
}

/// Keeps each version whose cell isn't the `-` placeholder.
pub fn supported_versions<S: AsRef<str>>(versions: &[Version], cells: &[S]) -> Vec<Version> {
    versions
        .iter()
        .zip(cells)
        .filter(|(_, cell)| cell.as_ref().trim() != UNSUPPORTED)
        .map(|(version, _)| *version)
        .collect()
}

/// `3.1` becomes `31`, `1.50` becomes `150`.
pub fn parse_version(label: &str) -> Result<Version, DocumentError> {
    label
        .trim()
        .replace('.', "")
        .parse()
        .map_err(|_| DocumentError::BadVersion(label.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn dashes_are_unsupported() {
        assert_eq!(supported_versions(&[1, 2, 3, 4], &["-", "x", "-", "x"]), vec![2, 4]);
        assert_eq!(supported_versions(&[1, 2], &[" ✔ ", ""]), vec![1, 2]);
    }

    #[test]
    fn labels() {
        assert_eq!(parse_version(" 3.1 ").unwrap(), 31);
        assert_eq!(parse_version("4.50").unwrap(), 450);
        assert!(matches!(
            parse_version("ES 3"),
            Err(DocumentError::BadVersion(label)) if label == "ES 3"
        ));
    }

    #[test]
    fn clamp_to_last_row() {
        assert_eq!(support_row(0, 3), Some(0));
        assert_eq!(support_row(2, 3), Some(2));
        assert_eq!(support_row(3, 3), Some(2));
        assert_eq!(support_row(7, 1), Some(0));
        assert_eq!(support_row(0, 0), None);
    }

    #[test]
    fn parse_table() {
        let doc = Html::parse_fragment(
            r#"<table id="versions">
                <thead>
                    <tr><th></th><th colspan="3">OpenGL ES Shading Language Version</th></tr>
                    <tr><th>Function Name</th><th>1.00</th><th>3.00</th><th>3.10</th></tr>
                </thead>
                <tbody>
                    <tr><td>texture</td><td>-</td><td>✔</td><td>✔</td></tr>
                    <tr><td>textureOffset</td><td>-</td><td>-</td><td>✔</td></tr>
                </tbody>
            </table>"#,
        );
        let table = doc.select(&Selector::parse("table").unwrap()).next().unwrap();
        let matrix = VersionMatrix::parse(table).unwrap();

        assert_eq!(matrix.versions, vec![100, 300, 310]);
        assert_eq!(matrix.support, vec![vec![300, 310], vec![310]]);
        assert_eq!(matrix.for_declaration(0).unwrap(), &[300, 310]);
        assert_eq!(matrix.for_declaration(5).unwrap(), &[310]);
    }

    #[test]
    fn missing_header() {
        let doc = Html::parse_fragment(
            r#"<table id="versions">
                <tr><th>Function Name</th><th>4.00</th></tr>
                <tr><td>abs</td><td>✔</td></tr>
            </table>"#,
        );
        let table = doc.select(&Selector::parse("table").unwrap()).next().unwrap();

        assert!(matches!(
            VersionMatrix::parse(table),
            Err(DocumentError::MissingRegion("versions header"))
        ));
    }

    #[test]
    fn empty_body() {
        let matrix = VersionMatrix::default();
        assert!(matches!(
            matrix.for_declaration(0),
            Err(DocumentError::EmptyVersionTable)
        ));
    }
}
