//! Folio HTML loader
//!
//! Parses HTML5 with html5ever and converts the result into a
//! [`folio_dom::Document`].

mod parser;

pub use parser::HtmlParser;

use folio_dom::Document;

/// Parse an HTML string into a document still in the `Loading` state
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("document has no <body>")]
    MissingBody,
}
