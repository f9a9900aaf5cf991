//! Markup conventions of the publishing portal.
//!
//! Everything the parser needs to know about how an edition page is laid
//! out lives in one [`SourceLayout`] value, so the decomposition code never
//! hardcodes selectors or phrases.

use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

use crate::config::AMENDMENT_MARKER_TITLE;
use crate::error::{HarvesterError, Result};
use crate::window::EditionWindow;

/// Preamble sentence stating the edition's validity window.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ESEIMAS_PREAMBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Suvestinė redakcija nuo (\d{4}-\d{2}-\d{2})(?: iki (\d{4}-\d{2}-\d{2}))?")
        .expect("valid regex")
});

/// Article heading: `12 straipsnis`, `10.1 straipsnis`, `37(1) straipsnis`,
/// or `5 1 straipsnis` (a superscript read as a separate word).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ESEIMAS_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+|\(\d\)| \d)*) straipsnis").expect("valid regex")
});

/// `documentId` query parameter of an e-tar.lt act page.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOCUMENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"documentId=([a-fA-F0-9]+)").expect("valid regex"));

/// Endpoint serving the bare text of an act registered on e-tar.lt.
pub const ETAR_LEGAL_ACT_URL: &str = "https://www.e-tar.lt/rs/legalact";

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARENTHESIZED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\((\d+)\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(\d+)").expect("valid regex"));

/// Canonical form of an article number.
///
/// Suffix numbers written as `(N)`, ` N` or a superscript become `-N`;
/// a trailing period and a `straipsnis` word are dropped.
///
/// # Examples
/// ```
/// use statute_harvester::layout::canonical_article_no;
///
/// assert_eq!(canonical_article_no("10.1(2)"), "10.1-2");
/// assert_eq!(canonical_article_no("37(1)"), "37-1");
/// assert_eq!(canonical_article_no("5 1"), "5-1");
/// assert_eq!(canonical_article_no("38-2"), "38-2");
/// assert_eq!(canonical_article_no(" 12. "), "12");
/// ```
#[must_use]
pub fn canonical_article_no(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_suffix("straipsnis")
        .unwrap_or(trimmed)
        .trim()
        .trim_end_matches('.');
    let unsuperscripted = trimmed.replace('^', " ");
    let parenthesized = PARENTHESIZED_SUFFIX.replace_all(&unsuperscripted, "-$1");
    SPACED_SUFFIX.replace_all(&parenthesized, "-$1").into_owned()
}

/// Markup conventions of one publishing portal.
#[derive(Debug, Clone)]
pub struct SourceLayout {
    /// CSS selector of the container holding the statute body.
    pub root_selector: String,

    /// Tag of structural containers.
    pub part_tag: String,

    /// Id prefix identifying structural containers.
    pub part_id_prefix: String,

    /// Class of the paragraphs that may carry a heading.
    pub heading_class: String,

    /// Class of tables that are kept as raw HTML.
    pub table_class: String,

    /// Preamble pattern; group 1 is the start date, optional group 2 the end date.
    pub preamble: Regex,

    /// Article heading pattern, matched against the lowercased title;
    /// group 1 is the raw article number.
    pub article_heading: Regex,

    /// Title of the amendment list section.
    pub amendment_title: String,

    /// Path segment of human-facing portal URLs.
    pub portal_path: String,

    /// Path segment that serves the bare edition document instead.
    pub download_path: String,
}

impl SourceLayout {
    /// Layout of consolidated editions on e-seimas.lrs.lt.
    #[must_use]
    pub fn eseimas() -> Self {
        Self {
            root_selector: "div.WordSection1".to_string(),
            part_tag: "div".to_string(),
            part_id_prefix: "part".to_string(),
            heading_class: "MsoNormal".to_string(),
            table_class: "MsoNormalTable".to_string(),
            preamble: ESEIMAS_PREAMBLE.clone(),
            article_heading: ESEIMAS_ARTICLE.clone(),
            amendment_title: AMENDMENT_MARKER_TITLE.to_string(),
            portal_path: "portal/legalAct/lt/TAD".to_string(),
            download_path: "rs/actualedition".to_string(),
        }
    }

    /// Set the root container selector.
    #[must_use]
    pub fn with_root_selector(mut self, selector: impl Into<String>) -> Self {
        self.root_selector = selector.into();
        self
    }

    /// Parse the root container selector.
    pub fn root(&self) -> Result<Selector> {
        Selector::parse(&self.root_selector).map_err(|e| HarvesterError::InvalidSelector {
            selector: self.root_selector.clone(),
            message: e.to_string(),
        })
    }

    /// Whether an element with this tag and id is a structural container.
    #[must_use]
    pub fn is_part(&self, tag: &str, id: Option<&str>) -> bool {
        tag == self.part_tag && id.is_some_and(|id| id.starts_with(&self.part_id_prefix))
    }

    /// URL that serves the bare edition document for a portal URL.
    ///
    /// # Examples
    /// ```
    /// use statute_harvester::layout::SourceLayout;
    ///
    /// let layout = SourceLayout::eseimas();
    /// assert_eq!(
    ///     layout.download_url("https://e-seimas.lrs.lt/portal/legalAct/lt/TAD/TAIS.1/asr"),
    ///     "https://e-seimas.lrs.lt/rs/actualedition/TAIS.1/asr/"
    /// );
    /// ```
    #[must_use]
    pub fn download_url(&self, portal_url: &str) -> String {
        let mut url = portal_url.replace(&self.portal_path, &self.download_path);
        if !url.ends_with('/') {
            url.push('/');
        }
        url
    }

    /// URL to fetch for an act linked from an amendment list.
    ///
    /// A `documentId` parameter is resolved to the e-tar.lt document
    /// endpoint, portal URLs of this layout go through [`Self::download_url`],
    /// and any other URL is fetched as given.
    ///
    /// # Examples
    /// ```
    /// use statute_harvester::layout::SourceLayout;
    ///
    /// let layout = SourceLayout::eseimas();
    /// assert_eq!(
    ///     layout.act_url("https://www.e-tar.lt/portal/lt/legalAct.html?documentId=a1b2c3"),
    ///     "https://www.e-tar.lt/rs/legalact/a1b2c3/"
    /// );
    /// assert_eq!(
    ///     layout.act_url("https://www.e-tar.lt/portal/lt/legalAct/TAR.ABC?jfwid=q1"),
    ///     "https://www.e-tar.lt/portal/lt/legalAct/TAR.ABC?jfwid=q1"
    /// );
    /// ```
    #[must_use]
    pub fn act_url(&self, url: &str) -> String {
        if let Some(caps) = DOCUMENT_ID.captures(url) {
            return format!("{ETAR_LEGAL_ACT_URL}/{}/", &caps[1]);
        }
        if url.contains(&self.portal_path) {
            return self.download_url(url);
        }
        url.to_string()
    }

    /// Parse the edition window from a preamble line.
    ///
    /// Returns `None` when the line is not a preamble.
    pub fn parse_window(&self, line: &str) -> Option<Result<EditionWindow>> {
        let caps = self.preamble.captures(line.trim())?;
        let from = caps.get(1)?.as_str();
        let to = caps.get(2).map(|m| m.as_str());
        Some(EditionWindow::parse(from, to))
    }

    /// Whether a section title is an article heading.
    #[must_use]
    pub fn is_article_title(&self, title: &str) -> bool {
        self.article_heading.is_match(&title.to_lowercase())
    }

    /// Canonical article number of an article heading, if it is one.
    #[must_use]
    pub fn article_no(&self, title: &str) -> Option<String> {
        let lowered = title.to_lowercase();
        let caps = self.article_heading.captures(&lowered)?;
        caps.get(1).map(|m| canonical_article_no(m.as_str()))
    }
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self::eseimas()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OPEN_ENDED;

    #[test]
    fn test_parse_window_with_end() {
        let layout = SourceLayout::eseimas();
        let window = layout
            .parse_window("Suvestinė redakcija nuo 2020-01-01 iki 2020-06-30")
            .unwrap()
            .unwrap();
        assert_eq!(window.effective_from, 20200101);
        assert_eq!(window.effective_to, 20200630);
    }

    #[test]
    fn test_parse_window_open_ended() {
        let layout = SourceLayout::eseimas();
        let window = layout
            .parse_window("Suvestinė redakcija nuo 2020-07-01")
            .unwrap()
            .unwrap();
        assert_eq!(window.effective_to, OPEN_ENDED);
    }

    #[test]
    fn test_parse_window_not_a_preamble() {
        let layout = SourceLayout::eseimas();
        assert!(layout.parse_window("Redakcija galioja nuo 2020-07-01").is_none());
    }

    #[test]
    fn test_article_titles() {
        let layout = SourceLayout::eseimas();
        assert!(layout.is_article_title("1 straipsnis. Įstatymo paskirtis"));
        assert!(layout.is_article_title("10.1 STRAIPSNIS. Sąvokos"));
        assert!(layout.is_article_title("37(1) straipsnis."));
        assert!(layout.is_article_title("5 1 straipsnis."));
        assert!(!layout.is_article_title("I SKYRIUS BENDROSIOS NUOSTATOS"));
        assert!(!layout.is_article_title("straipsnis 1"));
    }

    #[test]
    fn test_article_no() {
        let layout = SourceLayout::eseimas();
        assert_eq!(layout.article_no("1 straipsnis. Paskirtis"), Some("1".to_string()));
        assert_eq!(layout.article_no("5 1 straipsnis."), Some("5-1".to_string()));
        assert_eq!(layout.article_no("10.1(2) straipsnis."), Some("10.1-2".to_string()));
        assert_eq!(layout.article_no("37(1) straipsnis."), Some("37-1".to_string()));
        assert_eq!(layout.article_no("Pakeitimai:"), None);
    }

    #[test]
    fn test_is_part() {
        let layout = SourceLayout::eseimas();
        assert!(layout.is_part("div", Some("part_abc")));
        assert!(!layout.is_part("div", Some("section_abc")));
        assert!(!layout.is_part("div", None));
        assert!(!layout.is_part("p", Some("part_abc")));
    }

    #[test]
    fn test_root_selector() {
        assert!(SourceLayout::eseimas().root().is_ok());
        assert!(SourceLayout::eseimas().with_root_selector("div[").root().is_err());
    }

    #[test]
    fn test_download_url_keeps_trailing_slash() {
        let layout = SourceLayout::eseimas();
        assert_eq!(
            layout.download_url("https://e-seimas.lrs.lt/portal/legalAct/lt/TAD/X/"),
            "https://e-seimas.lrs.lt/rs/actualedition/X/"
        );
    }

    #[test]
    fn test_act_url() {
        let layout = SourceLayout::eseimas();
        assert_eq!(
            layout.act_url("https://www.e-tar.lt/portal/lt/legalAct.html?documentId=0F3a9c&jfwid=x"),
            "https://www.e-tar.lt/rs/legalact/0F3a9c/"
        );
        assert_eq!(
            layout.act_url("https://www.e-tar.lt/portal/lt/legalAct/TAR.ABC?jfwid=q1"),
            "https://www.e-tar.lt/portal/lt/legalAct/TAR.ABC?jfwid=q1"
        );
        assert_eq!(
            layout.act_url("https://e-seimas.lrs.lt/portal/legalAct/lt/TAD/X1/asr"),
            "https://e-seimas.lrs.lt/rs/actualedition/X1/asr/"
        );
    }
}
