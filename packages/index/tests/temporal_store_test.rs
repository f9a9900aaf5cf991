//! End-to-end tests of the temporal store over two consecutive editions.
//!
//! Edition 1 is in force from 2020-01-01 to 2020-06-30 and lists five
//! amending acts; edition 2 is in force from 2020-07-01 and lists eight.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use statute_harvester::{parse_edition, Chunker, EditionWindow, HarvesterError, PageFetcher, SourceLayout};
use statute_index::embedding::HashingEmbedder;
use statute_index::index::{FilterableIndex, MemoryIndex};
use statute_index::ingest::ingest_editions;
use statute_index::store::{Lookup, TemporalStore};
use tempfile::TempDir;

const E1_URL: &str = "https://e-seimas.lrs.lt/portal/legalAct/lt/TAD/TAIS.29231/E1";
const E2_URL: &str = "https://e-seimas.lrs.lt/portal/legalAct/lt/TAD/TAIS.29231/E2";

struct MapFetcher(HashMap<String, String>);

impl PageFetcher for MapFetcher {
    fn fetch(&self, url: &str) -> statute_harvester::Result<String> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| HarvesterError::InvalidUrl(url.to_string()))
    }
}

fn paragraph(text: &str) -> String {
    format!("<p class=\"MsoNormal\">{text}</p>\n")
}

fn amendment(number: u32) -> String {
    format!(
        "{}{}{}{}",
        paragraph(&format!("{number}.")),
        paragraph("Lietuvos Respublikos Seimas, Įstatymas"),
        paragraph(&format!(
            "Nr. <a href=\"https://www.e-tar.lt/portal/lt/legalAct/TAR.{number}\">XIII-{number}</a>, 2019-0{}-01, paskelbta TAR",
            number.min(9)
        )),
        paragraph(&format!("Asmens duomenų teisinės apsaugos įstatymo pakeitimas Nr. {number}")),
    )
}

fn definitions() -> String {
    (1..=9)
        .map(|i| {
            paragraph(&format!(
                "{i}. Sąvoka nr. {i} reiškia bet kokią operaciją ar operacijų seką, atliekamą su asmens \
                 duomenimis automatizuotomis arba neautomatizuotomis priemonėmis, įskaitant rinkimą ir saugojimą."
            ))
        })
        .collect()
}

/// Markup of one consolidated edition.
fn edition_page(preamble: &str, article_one: &str, amendments: u32) -> String {
    let mut html = String::from("<html><body><div class=\"WordSection1\">\n<div id=\"part_top\">\n");
    html.push_str(&paragraph(preamble));
    html.push_str(&paragraph("<b>ASMENS DUOMENŲ TEISINĖS APSAUGOS ĮSTATYMAS</b>"));

    html.push_str("<div id=\"part_a1\">\n");
    html.push_str(&paragraph("<b>1 straipsnis. Įstatymo paskirtis</b>"));
    html.push_str(&paragraph(article_one));
    html.push_str("</div>\n<div id=\"part_a2\">\n");
    html.push_str(&paragraph("<b>2 straipsnis. Sąvokos</b>"));
    html.push_str(&definitions());
    html.push_str("</div>\n<div id=\"part_a5_1\">\n");
    html.push_str(&paragraph("<b>5<sup>1</sup> straipsnis. Duomenų tvarkymas žurnalistikos tikslais</b>"));
    html.push_str(&paragraph("Žurnalistikos tikslais tvarkomiems duomenims taikomos išimtys."));
    html.push_str("</div>\n</div>\n<div id=\"part_changes\">\n");
    html.push_str(&paragraph("<b>Pakeitimai:</b>"));
    for n in 1..=amendments {
        html.push_str(&amendment(n));
    }
    html.push_str("</div>\n</div></body></html>");
    html
}

fn pages() -> HashMap<String, String> {
    let layout = SourceLayout::eseimas();
    HashMap::from([
        (
            layout.download_url(E1_URL),
            edition_page(
                "Suvestinė redakcija nuo 2020-01-01 iki 2020-06-30",
                "Senoji įstatymo paskirties redakcija.",
                5,
            ),
        ),
        (
            layout.download_url(E2_URL),
            edition_page(
                "Suvestinė redakcija nuo 2020-07-01",
                "Naujoji įstatymo paskirties redakcija.",
                8,
            ),
        ),
    ])
}

fn urls() -> Vec<String> {
    vec![E1_URL.to_string(), E2_URL.to_string()]
}

fn ingested_store() -> TemporalStore<MemoryIndex<HashingEmbedder>> {
    let mut store = TemporalStore::new(MemoryIndex::new(HashingEmbedder::default()));
    let report = ingest_editions(
        &MapFetcher(pages()),
        &SourceLayout::eseimas(),
        &Chunker::default(),
        &mut store,
        &urls(),
    );
    assert!(report.is_success(), "{:?}", report.failed);
    store
}

fn numbers(entries: &[statute_index::AmendmentEntry]) -> Vec<u32> {
    entries.iter().map(|e| e.number).collect()
}

#[test]
fn test_changes_lists_only_new_amendments() {
    let store = ingested_store();
    let changes = store.changes("2020-07-15").unwrap();

    assert_eq!(numbers(&changes), vec![6, 7, 8]);
    assert_eq!(
        changes[0].url,
        "https://www.e-tar.lt/portal/lt/legalAct/TAR.6"
    );
    assert_eq!(
        changes[0].text,
        "Lietuvos Respublikos Seimas, Įstatymas\n\
         Nr. XIII-6, 2019-06-01, paskelbta TAR\n\
         Asmens duomenų teisinės apsaugos įstatymo pakeitimas Nr. 6"
    );
}

#[test]
fn test_changes_without_previous_edition_is_empty() {
    let store = ingested_store();
    assert!(store.changes("2020-03-01").unwrap().is_empty());
    assert!(store.changes("2019-12-31").unwrap().is_empty());
}

#[test]
fn test_changes_on_first_day_of_edition() {
    let store = ingested_store();
    assert_eq!(numbers(&store.changes("2020-07-01").unwrap()), vec![6, 7, 8]);
}

#[test]
fn test_article_text_follows_date() {
    let store = ingested_store();

    let old = store.full_section("1", "2020-06-30").unwrap().unwrap();
    assert!(old.text.ends_with("Senoji įstatymo paskirties redakcija."));
    assert_eq!(old.window, EditionWindow::new(20200101, 20200630).unwrap());

    let new = store.full_section("1", "2020-07-01").unwrap().unwrap();
    assert!(new.text.ends_with("Naujoji įstatymo paskirties redakcija."));
    assert!(new.window.is_open_ended());

    assert!(store.full_section("1", "2019-12-31").unwrap().is_none());
}

#[test]
fn test_superscript_article_lookup() {
    let store = ingested_store();
    let doc = store.full_section("5 1", "2020-08-01").unwrap().unwrap();
    assert_eq!(doc.title, "5 1 straipsnis. Duomenų tvarkymas žurnalistikos tikslais");
    assert!(store.full_section("5-1", "2020-08-01").unwrap().is_some());
}

#[test]
fn test_multi_chunk_article_reassembles_exactly() {
    let store = ingested_store();
    let sections = parse_edition(
        &pages()[&SourceLayout::eseimas().download_url(E2_URL)],
        E2_URL,
        &SourceLayout::eseimas(),
    )
    .unwrap();
    let original = sections
        .iter()
        .find(|s| s.article_no.as_deref() == Some("2"))
        .unwrap();

    let chunks = store
        .lookup(&Lookup::ArticleNo("2".to_string()), "2020-07-15")
        .unwrap();
    assert!(chunks.len() > 1);
    assert!(chunks.windows(2).all(|w| w[0].chunk_number + 1 == w[1].chunk_number));

    let rebuilt = store.full_section("2", "2020-07-15").unwrap().unwrap();
    assert_eq!(rebuilt.text, original.text);
    assert_eq!(rebuilt.breadcrumb, original.breadcrumb);
}

#[test]
fn test_query_returns_documents_of_the_dated_edition() {
    let store = ingested_store();
    let docs = store
        .query("duomenų tvarkymas žurnalistikos tikslais", "2020-07-15")
        .unwrap();

    assert!(!docs.is_empty());
    assert!(docs.len() <= 3);
    assert!(docs.iter().all(|d| d.url == E2_URL));
    assert!(docs.iter().all(|d| d.title != "Pakeitimai:"));
    assert!(docs
        .iter()
        .any(|d| d.title.contains("žurnalistikos tikslais")));
}

#[test]
fn test_lookup_window_boundaries() {
    let store = ingested_store();
    let marker = Lookup::AmendmentMarker;

    for (date, url) in [
        ("2020-01-01", E1_URL),
        ("2020-06-30", E1_URL),
        ("2020-07-01", E2_URL),
        ("2999-12-31", E2_URL),
    ] {
        let chunks = store.lookup(&marker, date).unwrap();
        assert!(!chunks.is_empty(), "no amendment list on {date}");
        assert!(chunks.iter().all(|c| c.url == url), "wrong edition on {date}");
    }
    assert!(store.lookup(&marker, "2019-12-31").unwrap().is_empty());
}

#[test]
fn test_edition_ranges() {
    let store = ingested_store();
    let ranges = store.edition_ranges().unwrap();

    assert_eq!(
        ranges,
        vec![
            EditionWindow::new(20200101, 20200630).unwrap(),
            EditionWindow::open_ended(20200701),
        ]
    );
    assert!(ranges.last().unwrap().is_open_ended());
}

#[test]
fn test_reingestion_does_not_duplicate() {
    let mut store = ingested_store();
    let before = store.index().len();

    let report = ingest_editions(
        &MapFetcher(pages()),
        &SourceLayout::eseimas(),
        &Chunker::default(),
        &mut store,
        &urls(),
    );

    assert!(report.is_success());
    assert_eq!(store.index().len(), before);
    assert_eq!(store.edition_ranges().unwrap().len(), 2);
}

#[test]
fn test_failed_source_is_isolated() {
    let mut store = TemporalStore::new(MemoryIndex::new(HashingEmbedder::default()));
    let mut pages = pages();
    pages.remove(&SourceLayout::eseimas().download_url(E1_URL));

    let report = ingest_editions(
        &MapFetcher(pages),
        &SourceLayout::eseimas(),
        &Chunker::default(),
        &mut store,
        &urls(),
    );

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].url, E1_URL);
    assert_eq!(report.succeeded.len(), 1);
    assert_eq!(
        store.edition_ranges().unwrap(),
        vec![EditionWindow::open_ended(20200701)]
    );
    // No preceding edition stored: nothing can be reported as new.
    assert!(store.changes("2020-07-15").unwrap().is_empty());
}

#[test]
fn test_persisted_store_reopens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("statute-index.json");

    {
        let mut store =
            TemporalStore::new(MemoryIndex::open(&path, HashingEmbedder::default()).unwrap());
        let report = ingest_editions(
            &MapFetcher(pages()),
            &SourceLayout::eseimas(),
            &Chunker::default(),
            &mut store,
            &urls(),
        );
        assert!(report.is_success());
    }

    let reopened =
        TemporalStore::new(MemoryIndex::open(&path, HashingEmbedder::default()).unwrap());
    assert_eq!(reopened.edition_ranges().unwrap().len(), 2);
    assert_eq!(numbers(&reopened.changes("2020-07-15").unwrap()), vec![6, 7, 8]);
}
