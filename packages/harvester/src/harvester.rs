//! Main harvester service that ties all components together.

use scraper::Html;

use crate::config::validate_url;
use crate::decompose::{ArticleSplitStrategy, Decomposer, StructureParser};
use crate::error::Result;
use crate::http::PageFetcher;
use crate::layout::SourceLayout;
use crate::types::SectionDocument;

/// Fetch one edition page and decompose it into section documents.
///
/// # Arguments
/// * `fetcher` - Page source
/// * `layout` - Markup conventions of the portal
/// * `url` - Portal URL of the edition; references are built from it
///
/// # Returns
/// The edition's sections in reading order, sharing one validity window
pub fn harvest_edition<F: PageFetcher + ?Sized>(
    fetcher: &F,
    layout: &SourceLayout,
    url: &str,
) -> Result<Vec<SectionDocument>> {
    validate_url(url)?;

    let html = fetcher.fetch(&layout.download_url(url))?;
    let sections = parse_edition(&html, url, layout)?;

    tracing::info!(url = %url, sections = sections.len(), "Harvested edition");
    Ok(sections)
}

/// Decompose already fetched edition markup.
pub fn parse_edition(html: &str, url: &str, layout: &SourceLayout) -> Result<Vec<SectionDocument>> {
    let edition = StructureParser::new(layout).parse(html, url)?;
    let decomposer = Decomposer::new(ArticleSplitStrategy::new(layout));
    Ok(decomposer.decompose(&edition, url))
}

/// Fetch an amending act and return the plain text of its statute body.
///
/// Used to read the full text of an act linked from an amendment list;
/// the URL is resolved with [`SourceLayout::act_url`].
pub fn fetch_statute_text<F: PageFetcher + ?Sized>(
    fetcher: &F,
    layout: &SourceLayout,
    url: &str,
) -> Result<String> {
    validate_url(url)?;
    let html = fetcher.fetch(&layout.act_url(url))?;
    extract_statute_text(&html, layout)
}

/// Plain text of the statute body in already fetched markup.
///
/// Lines are trimmed and blank lines dropped. Pages without the root
/// container are returned unchanged.
pub fn extract_statute_text(html: &str, layout: &SourceLayout) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = layout.root()?;
    let Some(root) = document.select(&selector).next() else {
        tracing::debug!(selector = %layout.root_selector, "No statute root, returning raw page");
        return Ok(html.to_string());
    };

    let text: String = root.text().collect();
    Ok(text
        .lines()
        .map(crate::html::normalize_text)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarvesterError;
    use std::cell::RefCell;

    struct StaticFetcher {
        html: String,
        requested: RefCell<Vec<String>>,
    }

    impl PageFetcher for StaticFetcher {
        fn fetch(&self, url: &str) -> Result<String> {
            self.requested.borrow_mut().push(url.to_string());
            Ok(self.html.clone())
        }
    }

    const PAGE: &str = r#"<html><body><div class="WordSection1">
        <div id="part_top">
          <p class="MsoNormal">Suvestinė redakcija nuo 2020-01-01 iki 2020-06-30</p>
          <p class="MsoNormal"><b>LIETUVOS RESPUBLIKOS ĮSTATYMAS</b></p>
          <div id="part_a1">
            <p class="MsoNormal"><b>1 straipsnis. Paskirtis</b></p>
            <p class="MsoNormal">Įstatymas nustato tvarką.</p>
          </div>
        </div>
    </div></body></html>"#;

    #[test]
    fn test_harvest_fetches_download_url() {
        let fetcher = StaticFetcher {
            html: PAGE.to_string(),
            requested: RefCell::new(Vec::new()),
        };
        let layout = SourceLayout::eseimas();
        let url = "https://e-seimas.lrs.lt/portal/legalAct/lt/TAD/X1/asr";

        let sections = harvest_edition(&fetcher, &layout, url).unwrap();

        assert_eq!(
            fetcher.requested.borrow().as_slice(),
            ["https://e-seimas.lrs.lt/rs/actualedition/X1/asr/"]
        );
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].reference, format!("{url}#part_a1"));
        assert_eq!(sections[1].article_no.as_deref(), Some("1"));
    }

    #[test]
    fn test_harvest_rejects_invalid_url() {
        let fetcher = StaticFetcher {
            html: PAGE.to_string(),
            requested: RefCell::new(Vec::new()),
        };
        let err = harvest_edition(&fetcher, &SourceLayout::eseimas(), "not a url").unwrap_err();
        assert!(matches!(err, HarvesterError::InvalidUrl(_)));
        assert!(fetcher.requested.borrow().is_empty());
    }

    #[test]
    fn test_extract_statute_text() {
        let text = extract_statute_text(PAGE, &SourceLayout::eseimas()).unwrap();
        assert_eq!(
            text,
            "Suvestinė redakcija nuo 2020-01-01 iki 2020-06-30\nLIETUVOS RESPUBLIKOS ĮSTATYMAS\n1 straipsnis. Paskirtis\nĮstatymas nustato tvarką."
        );
    }

    #[test]
    fn test_statute_text_of_etar_act() {
        let fetcher = StaticFetcher {
            html: PAGE.to_string(),
            requested: RefCell::new(Vec::new()),
        };
        let layout = SourceLayout::eseimas();

        let text = fetch_statute_text(
            &fetcher,
            &layout,
            "https://www.e-tar.lt/portal/lt/legalAct/TAR.ABC?jfwid=q1",
        )
        .unwrap();
        fetch_statute_text(
            &fetcher,
            &layout,
            "https://www.e-tar.lt/portal/lt/legalAct.html?documentId=a1b2c3",
        )
        .unwrap();

        assert_eq!(
            fetcher.requested.borrow().as_slice(),
            [
                "https://www.e-tar.lt/portal/lt/legalAct/TAR.ABC?jfwid=q1",
                "https://www.e-tar.lt/rs/legalact/a1b2c3/",
            ]
        );
        assert!(text.starts_with("Suvestinė redakcija nuo 2020-01-01"));
    }

    #[test]
    fn test_statute_text_without_root_is_raw_page() {
        let page = "<html><body><p>Įstatymo tekstas</p></body></html>";
        let fetcher = StaticFetcher {
            html: page.to_string(),
            requested: RefCell::new(Vec::new()),
        };

        let text = fetch_statute_text(
            &fetcher,
            &SourceLayout::eseimas(),
            "https://www.e-tar.lt/rs/legalact/a1b2c3/",
        )
        .unwrap();

        assert_eq!(text, page);
    }
}
