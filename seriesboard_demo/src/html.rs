// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-page HTML report wrapping the rendered charts.

use std::fmt::Write as _;

use crate::svg::escape_xml;

/// One chart in the report.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) svg: String,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let title = escape_xml(title);
    let mut out = String::new();
    let _ = write!(
        out,
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 24px; background: #f4f4f4; }}\n\
         section {{ margin-bottom: 32px; }}\n\
         p {{ color: #555; max-width: 60em; }}\n\
         </style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );
    for section in sections {
        let _ = write!(
            out,
            "<section>\n<h2>{}</h2>\n<p>{}</p>\n{}</section>\n",
            escape_xml(&section.title),
            escape_xml(&section.description),
            section.svg
        );
    }
    out.push_str("</body>\n</html>\n");
    out
}
