//! Baidu result page parser.
//!
//! Organic results sit in `.result` containers. The title link is
//! `.t a`, or `h3 a` when a container has no `.t`; the abstract is
//! `.c-abstract` or, for rich cards, `.c-span-last`. Result links are
//! Baidu redirect URLs and are returned as-is.

use scraper::Html;

use super::{element_text, selector};
use crate::error::Result;
use crate::types::{SearchEngine, SearchResult};

/// Parse a Baidu result page.
pub fn parse_baidu_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    let result_sel = selector(".result")?;
    let title_sel = selector(".t a")?;
    let heading_sel = selector("h3 a")?;
    let desc_sel = selector(".c-abstract, .c-span-last")?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        if results.len() >= max_results {
            break;
        }

        let Some(title_el) = element
            .select(&title_sel)
            .next()
            .or_else(|| element.select(&heading_sel).next())
        else {
            continue;
        };

        let title = element_text(title_el);
        let url = title_el.value().attr("href").unwrap_or_default().trim();
        if title.is_empty() || url.is_empty() {
            continue;
        }

        let description = element
            .select(&desc_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        results.push(SearchResult {
            title,
            url: url.to_owned(),
            description,
            source: SearchEngine::Baidu.name().to_owned(),
        });
    }

    tracing::debug!(count = results.len(), "Baidu results parsed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_BAIDU_HTML: &str = r#"<!DOCTYPE html>
<html><body><div id="content_left">
<div class="result c-container">
  <h3 class="t"><a href="http://www.baidu.com/link?url=aaa">北京天气预报</a></h3>
  <div class="c-abstract">北京今天晴，最高气温 25 度。</div>
</div>
<div class="result c-container">
  <h3 class="t"><a href="http://www.baidu.com/link?url=bbb">Weather Forecast</a></h3>
  <div class="c-span-last">Seven day forecast for Beijing.</div>
</div>
<div class="result c-container">
  <h3><a href="http://www.baidu.com/link?url=ccc">  Climate
     data  </a></h3>
</div>
<div class="result c-container">
  <div class="c-abstract">Entry without a title link is skipped.</div>
</div>
<div class="result c-container">
  <h3 class="t"><a href="">Empty link is skipped</a></h3>
</div>
</div></body></html>"#;

    #[test]
    fn parse_mock_html_returns_results() {
        let results = parse_baidu_html(MOCK_BAIDU_HTML, 10).expect("should parse");
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].title, "北京天气预报");
        assert_eq!(results[0].url, "http://www.baidu.com/link?url=aaa");
        assert!(results[0].description.contains("最高气温"));
        assert_eq!(results[0].source, "baidu");

        assert_eq!(results[1].description, "Seven day forecast for Beijing.");
    }

    #[test]
    fn title_whitespace_collapsed_and_missing_description_empty() {
        let results = parse_baidu_html(MOCK_BAIDU_HTML, 10).expect("should parse");
        assert_eq!(results[2].title, "Climate data");
        assert!(results[2].description.is_empty());
    }

    #[test]
    fn titled_link_preferred_over_earlier_heading() {
        let html = r#"<html><body>
<div class="result">
  <h3><a href="http://www.baidu.com/link?url=tag">Related tag</a></h3>
  <div class="t"><a href="http://www.baidu.com/link?url=main">Main title</a></div>
</div>
</body></html>"#;
        let results = parse_baidu_html(html, 10).expect("should parse");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Main title");
        assert_eq!(results[0].url, "http://www.baidu.com/link?url=main");
    }

    #[test]
    fn parse_respects_max_results() {
        let results = parse_baidu_html(MOCK_BAIDU_HTML, 2).expect("should parse");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let results = parse_baidu_html("<html><body></body></html>", 10).expect("should parse");
        assert!(results.is_empty());
    }
}
